//! Heuristic candidate scoring

use crate::processing::candidate::{
    education_tier, has_skill, parse_salary, years_experience, Candidate,
};
use crate::processing::categorizer::{categorize, Category};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_WEIGHT: f64 = 1.0;
pub const MIN_WEIGHT: f64 = 0.0;
pub const MAX_WEIGHT: f64 = 2.0;

/// Experience points are capped at this many roles
const EXPERIENCE_CAP: u32 = 8;

/// Flat bonuses awarded through `has_skill`, independent of category weights.
/// A group scores once if any of its terms matches.
const SKILL_BONUSES: &[(&[&str], f64)] = &[
    (&["react"], 4.0),
    (&["typescript"], 3.0),
    (&["aws", "azure", "gcp"], 3.0),
    (&["node"], 2.0),
    (&["python"], 2.0),
    (&["machine learning"], 2.0),
];

/// Per-category multipliers; categories without an entry weigh 1.0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    values: BTreeMap<Category, f64>,
}

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> f64 {
        self.values.get(&category).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Set a multiplier, clamped to the supported range
    pub fn set(&mut self, category: Category, weight: f64) {
        let weight = if weight.is_nan() {
            DEFAULT_WEIGHT
        } else {
            weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
        };
        self.values.insert(category, weight);
    }

    pub fn with(mut self, category: Category, weight: f64) -> Self {
        self.set(category, weight);
        self
    }

    /// Effective weight of every weighted category, in scoring order
    pub fn effective(&self) -> Vec<(Category, f64)> {
        Category::WEIGHTED
            .iter()
            .map(|c| (*c, self.get(*c)))
            .collect()
    }
}

/// Derived scoring result for one candidate; recomputed, never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMeta {
    pub score: f64,
    pub categories: BTreeSet<Category>,
    pub salary: Option<u64>,
}

/// Points contributed by the salary bracket
fn salary_adjustment(salary: u64) -> f64 {
    match salary {
        s if s < 80_000 => 5.0,
        s if s < 110_000 => 3.0,
        s if s < 140_000 => 1.0,
        _ => -1.0,
    }
}

/// Score a candidate against the given weights
pub fn compute_score(candidate: &Candidate, weights: &Weights) -> ScoreMeta {
    let categories = categorize(candidate);
    let mut score = 0.0;

    for category in Category::WEIGHTED {
        if let Some(base) = category.base_priority() {
            if categories.contains(&category) {
                score += weights.get(category) * f64::from(base);
            }
        }
    }

    for (terms, bonus) in SKILL_BONUSES {
        if terms.iter().any(|t| has_skill(candidate, t)) {
            score += bonus;
        }
    }

    score += f64::from(years_experience(candidate).min(EXPERIENCE_CAP));
    score += f64::from(2 * education_tier(candidate));

    let salary = parse_salary(candidate);
    if let Some(s) = salary {
        score += salary_adjustment(s);
    }

    if !candidate.skills.is_empty() {
        score += 1.0;
    }
    if !candidate.has_name() {
        score -= 1.0;
    }
    if candidate.is_available_full_time() {
        score += 2.0;
    }

    ScoreMeta {
        score,
        categories,
        salary,
    }
}
