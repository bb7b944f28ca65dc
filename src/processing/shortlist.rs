//! Caller-owned shortlist of chosen candidates

use crate::error::Result;
use crate::processing::candidate::Candidate;
use crate::processing::ranking::average_salary;
use serde::{Deserialize, Serialize};

/// Ordered set of shortlisted candidates.
///
/// Two records are the same entry when both carry a non-empty email and the
/// emails match ignoring case; records without an email compare by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shortlist {
    entries: Vec<Candidate>,
}

fn email_key(candidate: &Candidate) -> Option<String> {
    candidate
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
}

fn same_entry(a: &Candidate, b: &Candidate) -> bool {
    match (email_key(a), email_key(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

impl Shortlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.entries.iter().any(|e| same_entry(e, candidate))
    }

    /// Append a candidate; returns false if it is already shortlisted
    pub fn add(&mut self, candidate: Candidate) -> bool {
        if self.contains(&candidate) {
            return false;
        }
        self.entries.push(candidate);
        true
    }

    /// Remove a candidate; returns false if it was not shortlisted
    pub fn remove(&mut self, candidate: &Candidate) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !same_entry(e, candidate));
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the contents wholesale, e.g. with an auto-pick result.
    ///
    /// Entries are taken as given, without the email check `add` applies.
    pub fn replace<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = Candidate>,
    {
        self.entries = candidates.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn average_salary(&self) -> Option<u64> {
        average_salary(&self.entries)
    }

    /// Pretty-printed JSON array of the shortlisted records
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

impl<'a> IntoIterator for &'a Shortlist {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::Weights;
    use crate::processing::selector::{auto_pick, SelectionOptions};
    use serde_json::json;

    fn cand(value: serde_json::Value) -> Candidate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_add_is_idempotent_by_email() {
        let mut list = Shortlist::new();
        assert!(list.add(cand(json!({"name": "Ana", "email": "ana@x.io"}))));
        assert!(!list.add(cand(json!({"name": "Ana B.", "email": "ANA@x.io"}))));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_records_without_email_compare_by_value() {
        let mut list = Shortlist::new();
        assert!(list.add(cand(json!({"name": "Bo"}))));
        assert!(!list.add(cand(json!({"name": "Bo"}))));
        assert!(list.add(cand(json!({"name": "Bo", "email": ""}))));
        assert!(list.add(cand(json!({"name": "Cy"}))));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_no_cap_on_manual_adds() {
        let mut list = Shortlist::new();
        for i in 0..8 {
            list.add(cand(json!({"email": format!("c{}@x.io", i)})));
        }
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut list = Shortlist::new();
        let a = cand(json!({"email": "a@x.io"}));
        let b = cand(json!({"email": "b@x.io"}));
        list.add(a.clone());
        list.add(b.clone());

        assert!(list.remove(&a));
        assert!(!list.remove(&a));
        assert!(list.contains(&b));

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_replace_keeps_order() {
        let mut list = Shortlist::new();
        list.add(cand(json!({"email": "old@x.io"})));
        list.replace(vec![
            cand(json!({"email": "z@x.io"})),
            cand(json!({"email": "a@x.io"})),
        ]);
        let emails: Vec<_> = list.iter().filter_map(|c| c.email.as_deref()).collect();
        assert_eq!(emails, vec!["z@x.io", "a@x.io"]);
    }

    #[test]
    fn test_replace_keeps_shared_email_picks() {
        let pool = vec![
            cand(json!({"name": "Dup", "email": "dup@x.io", "skills": ["Vue"]})),
            cand(json!({"name": "Dup", "email": "dup@x.io", "skills": ["Django"]})),
        ];
        let picks = auto_pick(&pool, &Weights::new(), &SelectionOptions::default());
        assert_eq!(picks.len(), 2);

        let mut list = Shortlist::new();
        list.replace(picks.into_iter().cloned());
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice(), pool.as_slice());
    }

    #[test]
    fn test_average_salary_ignores_unknown() {
        let mut list = Shortlist::new();
        assert_eq!(list.average_salary(), None);
        list.add(cand(json!({"email": "a@x.io", "annual_salary_expectation": {"full-time": "$90,000"}})));
        list.add(cand(json!({"email": "b@x.io", "annual_salary_expectation": {"full-time": "$75,001"}})));
        list.add(cand(json!({"email": "c@x.io"})));
        assert_eq!(list.average_salary(), Some(82_501));
    }

    #[test]
    fn test_to_json_preserves_unknown_fields() {
        let mut list = Shortlist::new();
        list.add(cand(json!({"email": "a@x.io", "github": "ana-dev"})));
        let exported: serde_json::Value = serde_json::from_str(&list.to_json().unwrap()).unwrap();
        assert_eq!(exported[0]["github"], "ana-dev");
        assert_eq!(exported[0]["email"], "a@x.io");
    }
}
