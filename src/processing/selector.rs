//! Auto-selection of a diverse, budget-aware shortlist.
//!
//! Selection runs in two phases over candidates scored once up front:
//!
//! 1. [`select_coverage`] walks the fixed role groups in order and takes the
//!    best remaining member of each group, preferring unseen regions, then
//!    higher scores, then lower salaries.
//! 2. [`repair_budget`] swaps at most one pick for a cheaper member of the same
//!    role group when the average known salary exceeds the budget.

use crate::processing::candidate::Candidate;
use crate::processing::categorizer::Category;
use crate::processing::region::{region_of, Region};
use crate::processing::scorer::{compute_score, ScoreMeta, Weights};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Maximum number of picks produced by auto-selection
pub const SHORTLIST_SIZE: usize = 5;

/// Category clusters guaranteeing functional coverage, in selection order
pub const ROLE_GROUPS: [&[Category]; SHORTLIST_SIZE] = [
    &[Category::Frontend],
    &[Category::Backend],
    &[Category::DataMl, Category::DataEngineer],
    &[Category::DevopsCloud],
    &[Category::Product, Category::Design, Category::Fullstack],
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionOptions {
    pub prefer_diversity: bool,
    /// Target average salary; `None` or zero disables budget repair
    pub budget_avg: Option<u64>,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            prefer_diversity: true,
            budget_avg: None,
        }
    }
}

/// A candidate with its score and region, identified by its pool index
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub index: usize,
    pub candidate: &'a Candidate,
    pub meta: ScoreMeta,
    pub region: Region,
}

impl<'a> ScoredCandidate<'a> {
    pub fn new(index: usize, candidate: &'a Candidate, weights: &Weights) -> Self {
        Self {
            index,
            candidate,
            meta: compute_score(candidate, weights),
            region: region_of(candidate.location.as_deref()),
        }
    }

    /// Index of the first role group sharing a category with this candidate
    pub fn group_index(&self) -> Option<usize> {
        group_of(&self.meta.categories)
    }

    /// Salary for ordering, unknown salaries sort as most expensive
    fn salary_key(&self) -> f64 {
        self.meta.salary.map(|s| s as f64).unwrap_or(f64::INFINITY)
    }
}

/// Index of the first role group sharing a category with `categories`
pub fn group_of(categories: &BTreeSet<Category>) -> Option<usize> {
    ROLE_GROUPS
        .iter()
        .position(|group| group.iter().any(|c| categories.contains(c)))
}

/// Display label of a role group, e.g. "data_ml/data_engineer"
pub fn group_label(index: usize) -> Option<String> {
    let group = ROLE_GROUPS.get(index)?;
    Some(group.iter().map(Category::as_str).collect::<Vec<_>>().join("/"))
}

/// Score every candidate once
pub fn score_all<'a>(candidates: &'a [Candidate], weights: &Weights) -> Vec<ScoredCandidate<'a>> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| ScoredCandidate::new(index, candidate, weights))
        .collect()
}

/// Rounded mean of the known salaries among `picks`
pub fn average_known_salary<'p, 'a: 'p, I>(picks: I) -> Option<u64>
where
    I: IntoIterator<Item = &'p ScoredCandidate<'a>>,
{
    let known: Vec<u64> = picks.into_iter().filter_map(|p| p.meta.salary).collect();
    if known.is_empty() {
        return None;
    }
    let sum: u128 = known.iter().map(|&s| u128::from(s)).sum();
    Some((sum as f64 / known.len() as f64).round() as u64)
}

/// Phase 1: one pick per role group, favouring region novelty, score, then cost
pub fn select_coverage<'a>(
    scored: &[ScoredCandidate<'a>],
    prefer_diversity: bool,
) -> Vec<ScoredCandidate<'a>> {
    let mut picks: Vec<ScoredCandidate<'a>> = Vec::with_capacity(SHORTLIST_SIZE);
    let mut used_regions: HashSet<Region> = HashSet::new();

    for (group_idx, group) in ROLE_GROUPS.iter().enumerate() {
        let novelty = |s: &ScoredCandidate| -> u8 {
            u8::from(prefer_diversity && s.region.is_known() && !used_regions.contains(&s.region))
        };

        let best = scored
            .iter()
            .filter(|s| group.iter().any(|c| s.meta.categories.contains(c)))
            .filter(|s| !picks.iter().any(|p| p.index == s.index))
            .min_by(|a, b| {
                novelty(*b)
                    .cmp(&novelty(*a))
                    .then_with(|| b.meta.score.total_cmp(&a.meta.score))
                    .then_with(|| a.salary_key().total_cmp(&b.salary_key()))
            })
            .cloned();

        match best {
            Some(pick) => {
                debug!(
                    "Group {} picked candidate #{} (score {}, region {})",
                    group_idx, pick.index, pick.meta.score, pick.region
                );
                used_regions.insert(pick.region);
                picks.push(pick);
            }
            None => debug!("Group {} has no eligible candidate", group_idx),
        }
    }

    picks
}

/// Phase 2: commit the first single same-group swap that meets the budget.
///
/// Slots are tried from most to least expensive (unknown salary first); for
/// each slot, cheaper alternatives are tried cheapest first, higher score
/// breaking ties. The pass stops after the first accepted swap even if other
/// slots remain expensive.
pub fn repair_budget<'a>(
    scored: &[ScoredCandidate<'a>],
    mut picks: Vec<ScoredCandidate<'a>>,
    budget_avg: u64,
) -> Vec<ScoredCandidate<'a>> {
    let Some(current_avg) = average_known_salary(&picks) else {
        debug!("Budget repair skipped: no pick has a known salary");
        return picks;
    };
    if current_avg <= budget_avg {
        return picks;
    }
    debug!(
        "Average salary {} exceeds budget {}, attempting a swap",
        current_avg, budget_avg
    );

    // Stable sort keeps slot order among equal salaries
    let mut slots: Vec<usize> = (0..picks.len()).collect();
    slots.sort_by(|&a, &b| picks[b].salary_key().total_cmp(&picks[a].salary_key()));

    for slot in slots {
        let group = picks[slot].group_index();
        let ceiling = picks[slot].salary_key();

        let mut alternatives: Vec<&ScoredCandidate<'a>> = scored
            .iter()
            .filter(|s| s.group_index() == group)
            .filter(|s| !picks.iter().any(|p| p.index == s.index))
            .filter(|s| s.meta.salary.is_some() && s.salary_key() < ceiling)
            .collect();
        alternatives.sort_by(|a, b| {
            a.salary_key()
                .total_cmp(&b.salary_key())
                .then_with(|| b.meta.score.total_cmp(&a.meta.score))
        });

        for alt in alternatives {
            let trial = picks
                .iter()
                .enumerate()
                .map(|(i, p)| if i == slot { alt } else { p });
            if let Some(new_avg) = average_known_salary(trial) {
                if new_avg <= budget_avg {
                    debug!(
                        "Swapped slot {} (#{}) for #{}, average {} -> {}",
                        slot, picks[slot].index, alt.index, current_avg, new_avg
                    );
                    picks[slot] = alt.clone();
                    return picks;
                }
            }
        }
    }

    debug!("No single swap brings the average within budget");
    picks
}

/// Pick up to five candidates covering the role groups, then repair the budget
pub fn auto_pick<'a>(
    candidates: &'a [Candidate],
    weights: &Weights,
    options: &SelectionOptions,
) -> Vec<&'a Candidate> {
    let scored = score_all(candidates, weights);
    let mut picks = select_coverage(&scored, options.prefer_diversity);

    if let Some(budget) = options.budget_avg.filter(|&b| b > 0) {
        picks = repair_budget(&scored, picks, budget);
    }

    picks.into_iter().map(|p| p.candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cand(name: &str, skills: &[&str], location: &str, salary: Option<u64>) -> Candidate {
        let mut value = json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "skills": skills,
            "location": location,
        });
        if let Some(s) = salary {
            value["annual_salary_expectation"] = json!({"full-time": format!("${}", s)});
        }
        serde_json::from_value(value).unwrap()
    }

    fn names(picks: &[&Candidate]) -> Vec<String> {
        picks.iter().map(|c| c.name.clone().unwrap_or_default()).collect()
    }

    fn diverse_pool() -> Vec<Candidate> {
        vec![
            cand("Fe", &["Vue"], "Toronto", Some(95_000)),
            cand("Be", &["Django"], "Mumbai, India", Some(95_000)),
            cand("Dm", &["Pandas"], "London", Some(95_000)),
            cand("Dc", &["Docker"], "Amman", Some(95_000)),
            cand("Pd", &["Figma"], "Bogotá", Some(95_000)),
        ]
    }

    #[test]
    fn test_one_pick_per_group() {
        let pool = diverse_pool();
        let picks = auto_pick(&pool, &Weights::new(), &SelectionOptions::default());
        assert_eq!(names(&picks), vec!["Fe", "Be", "Dm", "Dc", "Pd"]);
    }

    #[test]
    fn test_empty_pool() {
        let picks = auto_pick(&[], &Weights::new(), &SelectionOptions::default());
        assert!(picks.is_empty());
    }

    #[test]
    fn test_missing_group_shortens_list() {
        let pool = vec![
            cand("Fe", &["Vue"], "", None),
            cand("Be", &["Django"], "", None),
        ];
        let picks = auto_pick(&pool, &Weights::new(), &SelectionOptions::default());
        assert_eq!(names(&picks), vec!["Fe", "Be"]);
    }

    #[test]
    fn test_never_repeats_candidate() {
        // One candidate spanning every group can only be picked once
        let pool = vec![cand("All", &["Vue", "Django", "Pandas", "Docker", "Figma"], "", None)];
        let picks = auto_pick(&pool, &Weights::new(), &SelectionOptions::default());
        assert_eq!(picks.len(), 1);
    }

    #[test]
    fn test_diversity_prefers_new_region() {
        let pool = vec![
            cand("FeUsa", &["Vue"], "Philadelphia", Some(90_000)),
            cand("BeUsaStrong", &["Django", "Python"], "Philadelphia", Some(90_000)),
            cand("BeIndia", &["Django"], "Nepal", Some(90_000)),
        ];
        let diverse = auto_pick(&pool, &Weights::new(), &SelectionOptions::default());
        assert_eq!(names(&diverse), vec!["FeUsa", "BeIndia"]);

        let options = SelectionOptions {
            prefer_diversity: false,
            budget_avg: None,
        };
        let by_score = auto_pick(&pool, &Weights::new(), &options);
        assert_eq!(names(&by_score), vec!["FeUsa", "BeUsaStrong"]);
    }

    #[test]
    fn test_unknown_region_is_never_novel() {
        let pool = vec![
            cand("Fe", &["Vue", "Angular"], "Somewhere", Some(90_000)),
            cand("FeKnown", &["Vue"], "Seville", Some(90_000)),
        ];
        let picks = auto_pick(&pool, &Weights::new(), &SelectionOptions::default());
        assert_eq!(names(&picks), vec!["FeKnown"]);
    }

    #[test]
    fn test_cheaper_salary_breaks_ties() {
        let pool = vec![
            cand("Pricey", &["Vue"], "", Some(100_000)),
            cand("Unknown", &["Vue"], "", None),
            cand("Cheap", &["Vue"], "", Some(90_000)),
        ];
        let options = SelectionOptions {
            prefer_diversity: false,
            budget_avg: None,
        };
        // Same bracket bonus for the two known salaries; unknown loses the +3
        let picks = auto_pick(&pool, &Weights::new(), &options);
        assert_eq!(names(&picks), vec!["Cheap"]);
    }

    #[test]
    fn test_budget_repair_swaps_most_expensive_slot() {
        let mut pool = diverse_pool();
        pool[3] = cand("Dc", &["Docker", "AWS"], "Amman", Some(200_000));
        pool.push(cand("DcCheap", &["Docker"], "", Some(30_000)));
        pool.push(cand("DcCheaper", &["Docker"], "", Some(20_000)));

        let options = SelectionOptions {
            prefer_diversity: true,
            budget_avg: Some(80_000),
        };
        let picks = auto_pick(&pool, &Weights::new(), &options);
        // (4 × 95k + 20k) / 5 = 80k
        assert_eq!(names(&picks), vec!["Fe", "Be", "Dm", "DcCheaper", "Pd"]);
    }

    #[test]
    fn test_budget_repair_stays_within_group() {
        let mut pool = diverse_pool();
        pool.push(cand("FeCheap", &["Vue"], "", Some(10_000)));
        let scored = score_all(&pool, &Weights::new());
        let picks = select_coverage(&scored, true);
        let before = average_known_salary(&picks).unwrap();

        let repaired = repair_budget(&scored, picks.clone(), 80_000);
        let after = average_known_salary(&repaired).unwrap();
        assert!(after <= before);
        for (old, new) in picks.iter().zip(repaired.iter()) {
            assert_eq!(old.group_index(), new.group_index());
        }
        assert_eq!(repaired[0].candidate.name.as_deref(), Some("FeCheap"));
    }

    #[test]
    fn test_budget_repair_single_swap_only() {
        let pool = vec![
            cand("Fe", &["Vue"], "", Some(150_000)),
            cand("Be", &["Django"], "", Some(150_000)),
            cand("FeAlt", &["Vue"], "", Some(100_000)),
            cand("BeAlt", &["Django"], "", Some(100_000)),
        ];
        let scored = score_all(&pool, &Weights::new());
        let picks = vec![scored[0].clone(), scored[1].clone()];
        // No single swap reaches 50k, so nothing is committed
        let repaired = repair_budget(&scored, picks, 50_000);
        let indices: Vec<usize> = repaired.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_budget_skipped_without_known_salaries() {
        let pool = vec![
            cand("Fe", &["Vue"], "", None),
            cand("FeCheap", &["Vue"], "", Some(10_000)),
        ];
        let scored = score_all(&pool, &Weights::new());
        // FeCheap wins phase 1 on score (salary bracket), so force the unknown pick
        let picks = vec![scored[0].clone()];
        let repaired = repair_budget(&scored, picks, 50_000);
        assert_eq!(repaired[0].index, 0);
    }

    #[test]
    fn test_zero_budget_disables_repair() {
        let pool = vec![
            cand("Fe", &["React", "TypeScript"], "", Some(150_000)),
            cand("FeCheap", &["Vue"], "", Some(10_000)),
        ];
        let mut options = SelectionOptions {
            prefer_diversity: false,
            budget_avg: Some(0),
        };
        let picks = auto_pick(&pool, &Weights::new(), &options);
        assert_eq!(names(&picks), vec!["Fe"]);

        options.budget_avg = Some(50_000);
        let picks = auto_pick(&pool, &Weights::new(), &options);
        assert_eq!(names(&picks), vec!["FeCheap"]);
    }

    #[test]
    fn test_average_known_salary_rounds() {
        let pool = vec![
            cand("A", &[], "", Some(1)),
            cand("B", &[], "", Some(2)),
            cand("C", &[], "", None),
        ];
        let scored = score_all(&pool, &Weights::new());
        assert_eq!(average_known_salary(&scored), Some(2));
        assert_eq!(average_known_salary(&scored[2..]), None);
    }
}
