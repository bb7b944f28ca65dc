//! Candidate loader for JSON applicant files

use crate::error::{HirePilotError, Result};
use crate::input::file_detector::FileType;
use crate::processing::candidate::Candidate;
use log::{info, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Parse a JSON array of candidate records.
///
/// The document must be an array; entries that are not objects are skipped
/// with a warning. Fields of the wrong type fall back to their defaults.
pub fn parse_candidates(text: &str) -> Result<Vec<Candidate>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| HirePilotError::MalformedCandidates(format!("Invalid JSON: {}", e)))?;

    let Value::Array(entries) = document else {
        return Err(HirePilotError::MalformedCandidates(
            "Expected a JSON array of candidate objects".to_string(),
        ));
    };

    let mut candidates = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!("Skipping entry {}: not a JSON object", position);
            continue;
        }
        candidates.push(serde_json::from_value(entry)?);
    }

    Ok(candidates)
}

pub struct CandidateLoader {
    cache: HashMap<String, Vec<Candidate>>,
    enable_cache: bool,
}

impl Default for CandidateLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn load(&mut self, path: &Path) -> Result<Vec<Candidate>> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached candidates for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(HirePilotError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let candidates = match self.detect_file_type(path)? {
            FileType::Json => {
                info!("Loading candidates from: {}", path.display());
                let text = std::fs::read_to_string(path)?;
                parse_candidates(&text)?
            }
            FileType::Unknown => {
                return Err(HirePilotError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };
        info!("Loaded {} candidates", candidates.len());

        if self.enable_cache {
            self.cache.insert(path_str, candidates.clone());
        }

        Ok(candidates)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                HirePilotError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
