//! Coarse geographic region resolution from free-text locations

use crate::processing::text_processor::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "APAC")]
    Apac,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "NA")]
    Na,
    #[serde(rename = "LATAM")]
    Latam,
    #[serde(rename = "MEA")]
    Mea,
    Unknown,
}

impl Region {
    /// Display order used by region snapshots
    pub const ALL: [Region; 6] = [
        Region::Apac,
        Region::Eu,
        Region::Na,
        Region::Latam,
        Region::Mea,
        Region::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Apac => "APAC",
            Region::Eu => "EU",
            Region::Na => "NA",
            Region::Latam => "LATAM",
            Region::Mea => "MEA",
            Region::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Region::Unknown
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location patterns, evaluated in order; the first match wins
const REGION_PATTERNS: &[(&str, Region)] = &[
    (
        r"india|bangladesh|pakistan|nepal|sri lanka|hydrabad|hyderabad",
        Region::Apac,
    ),
    (
        r"brazil|rio|salvador|belo horizonte|laguna|pelotas|maceió|maceio",
        Region::Latam,
    ),
    (
        r"argentina|mendoza|rosario|quilmes|caba|posadas|buenos aires",
        Region::Latam,
    ),
    (r"colombia|bogotá|medellín|medellin|manizales", Region::Latam),
    (
        r"united states|usa|philadelphia|malvern|san diego|new jersey",
        Region::Na,
    ),
    (r"canada|toronto|vancouver|montreal", Region::Na),
    (r"uk|london|england|britain", Region::Eu),
    (r"spain|italy|romania|timisoara|seville", Region::Eu),
    (r"amman|jordan", Region::Mea),
    (r"jamaica|kingston", Region::Latam),
];

static REGION_RULES: Lazy<Vec<(Regex, Region)>> = Lazy::new(|| {
    REGION_PATTERNS
        .iter()
        .map(|(pattern, region)| (Regex::new(pattern).expect("Invalid region pattern"), *region))
        .collect()
});

/// Resolve a location string to its region; blank or unmatched is `Unknown`
pub fn region_of(location: Option<&str>) -> Region {
    let text = normalize(location);
    if text.is_empty() {
        return Region::Unknown;
    }

    REGION_RULES
        .iter()
        .find(|(rule, _)| rule.is_match(&text))
        .map(|(_, region)| *region)
        .unwrap_or(Region::Unknown)
}
