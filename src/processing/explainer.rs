//! Human-readable rationale for a single candidate

use crate::processing::candidate::{Candidate, Degree};
use crate::processing::categorizer::{categorize, Category};
use crate::processing::region::region_of;
use serde::{Deserialize, Serialize};

const MAX_COMPANIES: usize = 3;
const MAX_SKILLS: usize = 8;
const MISSING_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub role_categories: Vec<Category>,
    pub bullets: Vec<String>,
}

/// School of the first top-25 degree, falling back to the first top-50 one
fn pedigree(candidate: &Candidate) -> Option<&str> {
    let degrees = candidate.degrees();
    let school_where = move |flag: fn(&Degree) -> bool| {
        degrees
            .iter()
            .find(|&d| flag(d))
            .and_then(|d| d.original_school.as_deref())
            .filter(|s| !s.is_empty())
    };
    school_where(|d| d.is_top25).or_else(|| school_where(|d| d.is_top50))
}

pub fn explain(candidate: &Candidate) -> Explanation {
    let mut bullets = Vec::new();

    let companies: Vec<&str> = candidate
        .work_experiences
        .iter()
        .take(MAX_COMPANIES)
        .filter_map(|w| w.company.as_deref())
        .filter(|c| !c.is_empty())
        .collect();
    if !companies.is_empty() {
        bullets.push(format!("Experience at {}", companies.join(", ")));
    }

    let skills: Vec<&str> = candidate
        .skills
        .iter()
        .take(MAX_SKILLS)
        .map(String::as_str)
        .collect();
    if !skills.is_empty() {
        bullets.push(format!("Skills: {}", skills.join(", ")));
    }

    if let Some(school) = pedigree(candidate) {
        bullets.push(format!("Pedigree: {}", school));
    }

    bullets.push(format!(
        "Region: {}  •  Expected salary: {}",
        region_of(candidate.location.as_deref()),
        candidate
            .salary_text()
            .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string())
    ));

    Explanation {
        role_categories: categorize(candidate).into_iter().collect(),
        bullets,
    }
}
