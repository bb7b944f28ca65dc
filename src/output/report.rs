//! Report structures for listings, shortlists, explanations and snapshots

use crate::processing::candidate::Candidate;
use crate::processing::categorizer::Category;
use crate::processing::explainer::{explain, Explanation};
use crate::processing::ranking::{average_salary, region_counts, Page};
use crate::processing::region::{region_of, Region};
use crate::processing::scorer::{compute_score, Weights};
use crate::processing::selector::{group_label, group_of, ScoredCandidate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Any report the formatters know how to render
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Ranking(RankingReport),
    Shortlist(ShortlistReport),
    Explanation(ExplanationReport),
    Snapshot(SnapshotReport),
}

/// Report metadata and generation info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub source_file: String,
    pub blind: bool,
}

impl ReportMetadata {
    pub fn new(source_file: &str, blind: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            source_file: source_file.to_string(),
            blind,
        }
    }
}

/// Name shown for a candidate; blind mode hides identity behind a position
pub fn candidate_label(candidate: &Candidate, blind: bool, position: Option<usize>) -> String {
    match (blind, position) {
        (true, Some(n)) => format!("Candidate {}", n),
        (true, None) => "Candidate".to_string(),
        (false, _) => candidate.display_name().to_string(),
    }
}

fn visible_email(candidate: &Candidate, blind: bool) -> Option<String> {
    if blind {
        None
    } else {
        candidate.email.clone().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRow {
    pub rank: usize,
    pub label: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub region: Region,
    pub score: f64,
    pub categories: Vec<Category>,
    pub salary: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub query: Option<String>,
    pub total_candidates: usize,
    pub page: Page,
    pub weights: Vec<(Category, f64)>,
    pub rows: Vec<RankedRow>,
}

impl RankingReport {
    /// Build one page of a ranked, already filtered listing
    pub fn build(
        metadata: ReportMetadata,
        query: Option<String>,
        total_candidates: usize,
        ranked: &[ScoredCandidate<'_>],
        page: Page,
        weights: &Weights,
    ) -> Self {
        let blind = metadata.blind;
        let rows = ranked[page.range()]
            .iter()
            .zip(page.range())
            .map(|(scored, i)| RankedRow {
                rank: i + 1,
                label: candidate_label(scored.candidate, blind, None),
                email: visible_email(scored.candidate, blind),
                location: scored.candidate.location.clone(),
                region: scored.region,
                score: scored.meta.score,
                categories: scored.meta.categories.iter().copied().collect(),
                salary: scored.meta.salary,
            })
            .collect();

        Self {
            metadata,
            query,
            total_candidates,
            page,
            weights: weights.effective(),
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub label: String,
    pub email: Option<String>,
    pub region: Region,
    pub score: f64,
    pub role_group: Option<String>,
    pub salary: Option<u64>,
    pub explanation: Explanation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistReport {
    pub metadata: ReportMetadata,
    pub entries: Vec<ShortlistEntry>,
    pub average_salary: Option<u64>,
    pub budget_avg: Option<u64>,
    pub regions_covered: usize,
    pub export_path: Option<String>,
}

impl ShortlistReport {
    pub fn build(
        metadata: ReportMetadata,
        shortlist: &[Candidate],
        weights: &Weights,
        budget_avg: Option<u64>,
    ) -> Self {
        let blind = metadata.blind;
        let entries: Vec<ShortlistEntry> = shortlist
            .iter()
            .enumerate()
            .map(|(i, candidate)| {
                let meta = compute_score(candidate, weights);
                ShortlistEntry {
                    label: candidate_label(candidate, blind, Some(i + 1)),
                    email: visible_email(candidate, blind),
                    region: region_of(candidate.location.as_deref()),
                    score: meta.score,
                    role_group: group_of(&meta.categories).and_then(group_label),
                    salary: meta.salary,
                    explanation: explain(candidate),
                }
            })
            .collect();

        let mut regions: Vec<Region> = entries
            .iter()
            .map(|e| e.region)
            .filter(Region::is_known)
            .collect();
        regions.sort();
        regions.dedup();

        Self {
            metadata,
            entries,
            average_salary: average_salary(shortlist),
            budget_avg,
            regions_covered: regions.len(),
            export_path: None,
        }
    }

    /// True when the known-salary average is within the budget, `None` if undecidable
    pub fn within_budget(&self) -> Option<bool> {
        Some(self.average_salary? <= self.budget_avg?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationReport {
    pub metadata: ReportMetadata,
    pub label: String,
    pub score: f64,
    pub region: Region,
    pub explanation: Explanation,
}

impl ExplanationReport {
    pub fn build(metadata: ReportMetadata, candidate: &Candidate, weights: &Weights) -> Self {
        let label = candidate_label(candidate, metadata.blind, None);
        Self {
            label,
            score: compute_score(candidate, weights).score,
            region: region_of(candidate.location.as_deref()),
            explanation: explain(candidate),
            metadata,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCount {
    pub region: Region,
    pub count: usize,
}

/// Pool-wide region counts next to the shortlist's size and average salary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub metadata: ReportMetadata,
    pub total_candidates: usize,
    pub regions: Vec<RegionCount>,
    pub pool_average_salary: Option<u64>,
    pub shortlist_count: usize,
    pub shortlist_average_salary: Option<u64>,
}

impl SnapshotReport {
    pub fn build(metadata: ReportMetadata, candidates: &[Candidate], shortlist: &[Candidate]) -> Self {
        Self {
            metadata,
            total_candidates: candidates.len(),
            regions: region_counts(candidates)
                .into_iter()
                .map(|(region, count)| RegionCount { region, count })
                .collect(),
            pool_average_salary: average_salary(candidates),
            shortlist_count: shortlist.len(),
            shortlist_average_salary: average_salary(shortlist),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ranking::rank;
    use serde_json::json;

    fn pool() -> Vec<Candidate> {
        serde_json::from_value(json!([
            {"name": "Ana", "email": "ana@x.io", "skills": ["React"], "location": "Lisbon, Spain",
             "annual_salary_expectation": {"full-time": "$90,000"}},
            {"name": "Bo", "email": "bo@x.io", "skills": ["Django"], "location": "Toronto"},
            {"name": "Cy", "skills": ["Figma"]}
        ]))
        .unwrap()
    }

    #[test]
    fn test_blind_labels() {
        let candidates = pool();
        assert_eq!(candidate_label(&candidates[0], false, Some(1)), "Ana");
        assert_eq!(candidate_label(&candidates[0], true, Some(3)), "Candidate 3");
        assert_eq!(candidate_label(&candidates[0], true, None), "Candidate");
    }

    #[test]
    fn test_ranking_page_rows() {
        let candidates = pool();
        let weights = Weights::new();
        let ranked = rank(&candidates, &weights);
        let page = Page::new(ranked.len(), 2, 2);

        let report = RankingReport::build(
            ReportMetadata::new("pool.json", true),
            None,
            candidates.len(),
            &ranked,
            page,
            &weights,
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].rank, 3);
        assert_eq!(report.rows[0].label, "Candidate");
        assert_eq!(report.rows[0].email, None);
        assert_eq!(report.weights.len(), 8);
    }

    #[test]
    fn test_shortlist_report() {
        let candidates = pool();
        let report = ShortlistReport::build(
            ReportMetadata::new("pool.json", false),
            &candidates[..2],
            &Weights::new(),
            Some(80_000),
        );
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].role_group.as_deref(), Some("frontend"));
        assert_eq!(report.entries[1].role_group.as_deref(), Some("backend"));
        assert_eq!(report.entries[1].email.as_deref(), Some("bo@x.io"));
        assert_eq!(report.regions_covered, 2);
        assert_eq!(report.average_salary, Some(90_000));
        assert_eq!(report.within_budget(), Some(false));
    }

    #[test]
    fn test_snapshot_report() {
        let candidates = pool();
        let report = SnapshotReport::build(
            ReportMetadata::new("pool.json", false),
            &candidates,
            &candidates[1..],
        );
        assert_eq!(report.total_candidates, 3);
        assert_eq!(report.pool_average_salary, Some(90_000));
        assert_eq!(report.shortlist_count, 2);
        assert_eq!(report.shortlist_average_salary, None);
        let total: usize = report.regions.iter().map(|r| r.count).sum();
        assert_eq!(total, 3);
        assert_eq!(report.regions[5].region, Region::Unknown);
        assert_eq!(report.regions[5].count, 1);
    }

    #[test]
    fn test_report_json_is_tagged() {
        let candidates = pool();
        let report = Report::Snapshot(SnapshotReport::build(
            ReportMetadata::new("pool.json", false),
            &candidates,
            &candidates[..1],
        ));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["kind"], "snapshot");
        assert_eq!(value["regions"][0]["region"], "APAC");
        assert_eq!(value["shortlist_count"], 1);
        assert_eq!(value["shortlist_average_salary"], 90_000);
    }
}
