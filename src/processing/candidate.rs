//! Candidate records and field extractors

use crate::processing::text_processor::normalize;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Employment type key used for salary lookups and availability checks
pub const FULL_TIME: &str = "full-time";

/// One applicant record as supplied by the caller.
///
/// Every field is decoded leniently: a value of the wrong JSON type becomes
/// the field's neutral default instead of rejecting the record. Fields this
/// crate does not interpret are kept in `extra` so exports round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub skills: Vec<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub work_experiences: Vec<WorkExperience>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,

    #[serde(default, deserialize_with = "lenient")]
    pub annual_salary_expectation: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub work_availability: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(
        rename = "roleName",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub role_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub degrees: Vec<Degree>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(
        rename = "originalSchool",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_school: Option<String>,

    #[serde(rename = "isTop25", default, deserialize_with = "lenient")]
    pub is_top25: bool,

    #[serde(rename = "isTop50", default, deserialize_with = "lenient")]
    pub is_top50: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode a field, falling back to its default when the JSON type is wrong
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list element by element; a bad element becomes its default and a
/// non-list value becomes the empty list
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

impl Candidate {
    /// Degrees listed under education, empty when absent
    pub fn degrees(&self) -> &[Degree] {
        self.education
            .as_ref()
            .map(|e| e.degrees.as_slice())
            .unwrap_or(&[])
    }

    /// True when the record carries a non-empty name
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// The raw full-time salary expectation as text, if present and non-empty
    pub fn salary_text(&self) -> Option<String> {
        let text = match self.annual_salary_expectation.get(FULL_TIME)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn is_available_full_time(&self) -> bool {
        self.work_availability.iter().any(|a| a == FULL_TIME)
    }

    /// Display label used by listings: name, then email, then a placeholder
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("Unnamed")
    }
}

/// Full-time salary expectation with every non-digit stripped.
///
/// Returns `None` when the field is absent, holds no digits, overflows, or
/// parses to zero.
pub fn parse_salary(candidate: &Candidate) -> Option<u64> {
    let text = candidate.salary_text()?;
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<u64>().ok().filter(|&n| n > 0)
}

pub fn years_experience(candidate: &Candidate) -> u32 {
    candidate.work_experiences.len() as u32
}

/// 2 for any top-25 degree, 1 for any top-50 degree, else 0
pub fn education_tier(candidate: &Candidate) -> u32 {
    let degrees = candidate.degrees();
    if degrees.iter().any(|d| d.is_top25) {
        2
    } else if degrees.iter().any(|d| d.is_top50) {
        1
    } else {
        0
    }
}

/// Substring match of `term` against skills, role names and degree subjects
pub fn has_skill(candidate: &Candidate, term: &str) -> bool {
    let needle = normalize(Some(term));

    let skill_hit = candidate
        .skills
        .iter()
        .any(|s| normalize(Some(s)).contains(&needle));
    let role_hit = candidate
        .work_experiences
        .iter()
        .any(|w| normalize(w.role_name.as_deref()).contains(&needle));
    let edu_hit = candidate
        .degrees()
        .iter()
        .any(|d| normalize(d.subject.as_deref()).contains(&needle));

    skill_hit || role_hit || edu_hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json(value: Value) -> Candidate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_salary_strips_currency() {
        let c = from_json(json!({"annual_salary_expectation": {"full-time": "$92,000"}}));
        assert_eq!(parse_salary(&c), Some(92000));
    }

    #[test]
    fn test_parse_salary_absent_or_zero() {
        assert_eq!(parse_salary(&Candidate::default()), None);

        let zero = from_json(json!({"annual_salary_expectation": {"full-time": "$0"}}));
        assert_eq!(parse_salary(&zero), None);

        let empty = from_json(json!({"annual_salary_expectation": {"full-time": ""}}));
        assert_eq!(parse_salary(&empty), None);

        let words = from_json(json!({"annual_salary_expectation": {"full-time": "negotiable"}}));
        assert_eq!(parse_salary(&words), None);

        let part_time_only = from_json(json!({"annual_salary_expectation": {"part-time": "$40,000"}}));
        assert_eq!(parse_salary(&part_time_only), None);
    }

    #[test]
    fn test_parse_salary_numeric_value() {
        let c = from_json(json!({"annual_salary_expectation": {"full-time": 120000}}));
        assert_eq!(parse_salary(&c), Some(120000));
    }

    #[test]
    fn test_lenient_fields() {
        let c = from_json(json!({
            "name": 42,
            "skills": "not a list",
            "work_experiences": [{"company": "A", "roleName": null}],
            "education": {"degrees": [{"isTop25": "yes", "isTop50": true}]},
            "submitted_at": "2025-01-28"
        }));
        assert_eq!(c.name, None);
        assert!(c.skills.is_empty());
        assert_eq!(years_experience(&c), 1);
        assert_eq!(education_tier(&c), 1);
        assert_eq!(c.extra.get("submitted_at"), Some(&json!("2025-01-28")));
    }

    #[test]
    fn test_bad_list_elements_keep_their_neighbours() {
        let c = from_json(json!({
            "name": "X",
            "skills": ["React", null],
            "work_experiences": [null, {"roleName": "Frontend Engineer"}],
            "education": {"degrees": [null, {"isTop25": true}]},
            "work_availability": [7, "full-time"]
        }));
        assert_eq!(c.skills, vec!["React".to_string(), String::new()]);
        assert_eq!(years_experience(&c), 2);
        assert_eq!(c.work_experiences[0], WorkExperience::default());
        assert_eq!(education_tier(&c), 2);
        assert!(c.is_available_full_time());
        assert!(has_skill(&c, "react"));
    }

    #[test]
    fn test_education_tier_checks_independently() {
        let c = from_json(json!({"education": {"degrees": [
            {"isTop50": true},
            {"isTop25": true, "isTop50": false}
        ]}}));
        assert_eq!(education_tier(&c), 2);
        assert_eq!(education_tier(&Candidate::default()), 0);
    }

    #[test]
    fn test_has_skill_substring() {
        let c = from_json(json!({
            "skills": ["React Native"],
            "work_experiences": [{"roleName": "Data Scientist"}],
            "education": {"degrees": [{"subject": "Machine Learning"}]}
        }));
        assert!(has_skill(&c, "react"));
        assert!(has_skill(&c, "Scientist"));
        assert!(has_skill(&c, "machine learning"));
        assert!(!has_skill(&c, "python"));
    }

    #[test]
    fn test_has_name_rejects_empty() {
        let c = from_json(json!({"name": ""}));
        assert!(!c.has_name());
        assert_eq!(c.display_name(), "Unnamed");
    }
}
