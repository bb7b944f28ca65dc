//! Configuration management for hirepilot

use crate::error::{HirePilotError, Result};
use crate::processing::categorizer::Category;
use crate::processing::ranking::DEFAULT_PAGE_SIZE;
use crate::processing::scorer::{Weights, DEFAULT_WEIGHT, MAX_WEIGHT, MIN_WEIGHT};
use crate::processing::selector::SelectionOptions;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strsim::jaro_winkler;

const DEFAULT_BUDGET_AVG: u64 = 100_000;

/// Keys accepted by [`Config::set`]
pub const SETTABLE_KEYS: &[&str] = &[
    "scoring.frontend",
    "scoring.backend",
    "scoring.fullstack",
    "scoring.data_ml",
    "scoring.data_engineer",
    "scoring.devops_cloud",
    "scoring.product",
    "scoring.design",
    "selection.prefer_diversity",
    "selection.budget_avg",
    "output.format",
    "output.page_size",
    "output.blind",
    "output.color_output",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// Category weight multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_weight")]
    pub frontend: f64,
    #[serde(default = "default_weight")]
    pub backend: f64,
    #[serde(default = "default_weight")]
    pub fullstack: f64,
    #[serde(default = "default_weight")]
    pub data_ml: f64,
    #[serde(default = "default_weight")]
    pub data_engineer: f64,
    #[serde(default = "default_weight")]
    pub devops_cloud: f64,
    #[serde(default = "default_weight")]
    pub product: f64,
    #[serde(default = "default_weight")]
    pub design: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub prefer_diversity: bool,
    /// Target average salary of the shortlist, 0 disables budget repair
    pub budget_avg: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub page_size: usize,
    pub blind: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = HirePilotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(HirePilotError::Configuration(format!(
                "Invalid output format: {}. Supported: console, json, markdown",
                s
            ))),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            frontend: DEFAULT_WEIGHT,
            backend: DEFAULT_WEIGHT,
            fullstack: DEFAULT_WEIGHT,
            data_ml: DEFAULT_WEIGHT,
            data_engineer: DEFAULT_WEIGHT,
            devops_cloud: DEFAULT_WEIGHT,
            product: DEFAULT_WEIGHT,
            design: DEFAULT_WEIGHT,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            prefer_diversity: true,
            budget_avg: DEFAULT_BUDGET_AVG,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            page_size: DEFAULT_PAGE_SIZE,
            blind: false,
            color_output: true,
        }
    }
}

impl ScoringConfig {
    fn slot(&mut self, category: Category) -> Option<&mut f64> {
        match category {
            Category::Frontend => Some(&mut self.frontend),
            Category::Backend => Some(&mut self.backend),
            Category::Fullstack => Some(&mut self.fullstack),
            Category::DataMl => Some(&mut self.data_ml),
            Category::DataEngineer => Some(&mut self.data_engineer),
            Category::DevopsCloud => Some(&mut self.devops_cloud),
            Category::Product => Some(&mut self.product),
            Category::Design => Some(&mut self.design),
            Category::Qa | Category::Mobile => None,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Frontend => self.frontend,
            Category::Backend => self.backend,
            Category::Fullstack => self.fullstack,
            Category::DataMl => self.data_ml,
            Category::DataEngineer => self.data_engineer,
            Category::DevopsCloud => self.devops_cloud,
            Category::Product => self.product,
            Category::Design => self.design,
            Category::Qa | Category::Mobile => DEFAULT_WEIGHT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, writing the defaults there first if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            info!("Wrote default configuration to {}", path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("hirepilot")
            .join("config.toml")
    }

    /// Scoring weights with out-of-range values clamped
    pub fn weights(&self) -> Weights {
        Category::WEIGHTED
            .iter()
            .fold(Weights::new(), |w, c| w.with(*c, self.scoring.get(*c)))
    }

    pub fn selection_options(&self) -> SelectionOptions {
        SelectionOptions {
            prefer_diversity: self.selection.prefer_diversity,
            budget_avg: Some(self.selection.budget_avg).filter(|&b| b > 0),
        }
    }

    /// Set a value by dotted key, e.g. `scoring.frontend` or `output.page_size`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = key.split_once('.').unwrap_or((key, ""));
        match section {
            "scoring" => {
                let category: Category = field
                    .parse()
                    .map_err(|_| unknown_key(key))?;
                let slot = self.scoring.slot(category).ok_or_else(|| unknown_key(key))?;
                *slot = parse_weight(key, value)?;
            }
            "selection" => match field {
                "prefer_diversity" => self.selection.prefer_diversity = parse_value(key, value)?,
                "budget_avg" => self.selection.budget_avg = parse_value(key, value)?,
                _ => return Err(unknown_key(key)),
            },
            "output" => match field {
                "format" => self.output.format = value.parse()?,
                "page_size" => {
                    let size: usize = parse_value(key, value)?;
                    if size == 0 {
                        return Err(HirePilotError::Configuration(
                            "output.page_size must be at least 1".to_string(),
                        ));
                    }
                    self.output.page_size = size;
                }
                "blind" => self.output.blind = parse_value(key, value)?,
                "color_output" => self.output.color_output = parse_value(key, value)?,
                _ => return Err(unknown_key(key)),
            },
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        HirePilotError::Configuration(format!("Invalid value for {}: {}", key, value))
    })
}

fn parse_weight(key: &str, value: &str) -> Result<f64> {
    let weight: f64 = parse_value(key, value)?;
    if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        return Err(HirePilotError::Configuration(format!(
            "{} must be between {} and {}, got {}",
            key, MIN_WEIGHT, MAX_WEIGHT, value
        )));
    }
    Ok(weight)
}

fn unknown_key(key: &str) -> HirePilotError {
    let suggestion = SETTABLE_KEYS
        .iter()
        .map(|k| (k, jaro_winkler(key, k)))
        .filter(|(_, similarity)| *similarity >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match suggestion {
        Some((k, _)) => HirePilotError::Configuration(format!(
            "Unknown configuration key: {} (did you mean '{}'?)",
            key, k
        )),
        None => HirePilotError::Configuration(format!("Unknown configuration key: {}", key)),
    }
}
