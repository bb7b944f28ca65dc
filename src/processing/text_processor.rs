//! Text normalization and free-text search over candidate records

use crate::processing::candidate::Candidate;

/// Lowercase text for matching; absent input becomes the empty string
pub fn normalize(text: Option<&str>) -> String {
    text.map(str::to_lowercase).unwrap_or_default()
}

/// Space-joined, normalized text a search query is matched against
pub fn search_haystack(candidate: &Candidate) -> String {
    let mut parts: Vec<String> = vec![
        normalize(candidate.name.as_deref()),
        normalize(candidate.email.as_deref()),
        normalize(candidate.location.as_deref()),
    ];
    parts.extend(candidate.skills.iter().map(|s| normalize(Some(s))));
    parts.extend(
        candidate
            .work_experiences
            .iter()
            .map(|w| normalize(w.role_name.as_deref())),
    );
    parts.extend(
        candidate
            .work_experiences
            .iter()
            .map(|w| normalize(w.company.as_deref())),
    );
    parts.join(" ")
}

/// True when the query is blank or occurs in the candidate's search haystack
pub fn matches_query(candidate: &Candidate, query: &str) -> bool {
    let needle = normalize(Some(query));
    if needle.trim().is_empty() {
        return true;
    }
    search_haystack(candidate).contains(&needle)
}

/// Keep only the candidates matching `query`, preserving order
pub fn filter_candidates<'a>(candidates: &'a [Candidate], query: &str) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| matches_query(c, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::candidate::WorkExperience;

    fn sample() -> Candidate {
        Candidate {
            name: Some("Ana Souza".to_string()),
            location: Some("Maceió, Brazil".to_string()),
            skills: vec!["TypeScript".to_string()],
            work_experiences: vec![WorkExperience {
                company: Some("Globex".to_string()),
                role_name: Some("Backend Developer".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some("MaceIÓ")), "maceió");
    }

    #[test]
    fn test_query_matches_any_field() {
        let c = sample();
        assert!(matches_query(&c, "typescript"));
        assert!(matches_query(&c, "GLOBEX"));
        assert!(matches_query(&c, "backend dev"));
        assert!(matches_query(&c, "brazil"));
        assert!(!matches_query(&c, "kubernetes"));
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let c = Candidate::default();
        assert!(matches_query(&c, ""));
        assert!(matches_query(&c, "   "));
    }

    #[test]
    fn test_filter_preserves_order() {
        let pool = vec![sample(), Candidate::default(), sample()];
        let hits = filter_candidates(&pool, "ana");
        assert_eq!(hits.len(), 2);
    }
}
