//! Score-ordered listings, pagination and region snapshots

use crate::processing::candidate::{parse_salary, Candidate};
use crate::processing::region::{region_of, Region};
use crate::processing::scorer::Weights;
use crate::processing::selector::{score_all, ScoredCandidate};
use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Number of page links shown around the current page
const PAGE_WINDOW: usize = 5;

/// Score every candidate and order by score, highest first (stable on ties)
pub fn rank<'a>(candidates: &'a [Candidate], weights: &Weights) -> Vec<ScoredCandidate<'a>> {
    let mut scored = score_all(candidates, weights);
    scored.sort_by(|a, b| b.meta.score.total_cmp(&a.meta.score));
    scored
}

/// One page of a ranked listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub size: usize,
    pub total_rows: usize,
    pub page_count: usize,
}

impl Page {
    /// Build a page, clamping `number` into `1..=page_count`
    pub fn new(total_rows: usize, number: usize, size: usize) -> Self {
        let size = size.max(1);
        let page_count = total_rows.div_ceil(size).max(1);
        Self {
            number: number.clamp(1, page_count),
            size,
            total_rows,
            page_count,
        }
    }

    /// Row indices covered by this page
    pub fn range(&self) -> Range<usize> {
        let start = ((self.number - 1) * self.size).min(self.total_rows);
        let end = (start + self.size).min(self.total_rows);
        start..end
    }

    /// 1-based bounds for a "showing a-b of n" label
    pub fn showing(&self) -> (usize, usize) {
        let first = ((self.number - 1) * self.size + 1).min(self.total_rows);
        let last = (self.number * self.size).min(self.total_rows);
        (first, last)
    }

    /// Up to five page numbers starting two before the current page
    pub fn window(&self) -> Vec<usize> {
        let start = self.number.saturating_sub(2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(self.page_count);
        (start..=end).collect()
    }

    pub fn is_first(&self) -> bool {
        self.number == 1
    }

    pub fn is_last(&self) -> bool {
        self.number == self.page_count
    }
}

/// Candidate count per region, in display order
pub fn region_counts<'a, I>(candidates: I) -> Vec<(Region, usize)>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut counts: Vec<(Region, usize)> = Region::ALL.iter().map(|r| (*r, 0)).collect();
    for candidate in candidates {
        let region = region_of(candidate.location.as_deref());
        if let Some(entry) = counts.iter_mut().find(|(r, _)| *r == region) {
            entry.1 += 1;
        }
    }
    counts
}

/// Rounded mean of the parsable full-time salaries
pub fn average_salary<'a, I>(candidates: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let known: Vec<u64> = candidates.into_iter().filter_map(parse_salary).collect();
    if known.is_empty() {
        return None;
    }
    let sum: u128 = known.iter().map(|&s| u128::from(s)).sum();
    Some((sum as f64 / known.len() as f64).round() as u64)
}
