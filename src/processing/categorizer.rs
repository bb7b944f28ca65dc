//! Role categorization from skills and work history keyword tables

use crate::error::{HirePilotError, Result};
use crate::processing::candidate::Candidate;
use crate::processing::text_processor::normalize;
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use strsim::jaro_winkler;

/// Functional role tag derived from a candidate's skills and roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frontend,
    Backend,
    Fullstack,
    DataMl,
    DataEngineer,
    DevopsCloud,
    Product,
    Design,
    Qa,
    Mobile,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Frontend,
        Category::Backend,
        Category::Fullstack,
        Category::DataMl,
        Category::DataEngineer,
        Category::DevopsCloud,
        Category::Product,
        Category::Design,
        Category::Qa,
        Category::Mobile,
    ];

    /// Categories that carry a configurable weight, in scoring order
    pub const WEIGHTED: [Category; 8] = [
        Category::Frontend,
        Category::Backend,
        Category::Fullstack,
        Category::DataMl,
        Category::DataEngineer,
        Category::DevopsCloud,
        Category::Product,
        Category::Design,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Fullstack => "fullstack",
            Category::DataMl => "data_ml",
            Category::DataEngineer => "data_engineer",
            Category::DevopsCloud => "devops_cloud",
            Category::Product => "product",
            Category::Design => "design",
            Category::Qa => "qa",
            Category::Mobile => "mobile",
        }
    }

    /// Base priority points, `None` for unweighted categories
    pub fn base_priority(&self) -> Option<u32> {
        match self {
            Category::Frontend | Category::Backend => Some(10),
            Category::Fullstack | Category::DataMl | Category::DataEngineer => Some(9),
            Category::DevopsCloud => Some(8),
            Category::Product => Some(7),
            Category::Design => Some(6),
            Category::Qa | Category::Mobile => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = HirePilotError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        if let Some(category) = Category::ALL.iter().find(|c| c.as_str() == wanted) {
            return Ok(*category);
        }

        let closest = Category::ALL
            .iter()
            .map(|c| (c, jaro_winkler(&wanted, c.as_str())))
            .filter(|(_, similarity)| *similarity >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let hint = match closest {
            Some((c, _)) => format!(" (did you mean '{}'?)", c),
            None => String::new(),
        };
        Err(HirePilotError::InvalidInput(format!(
            "Unknown category: {}{}",
            s, hint
        )))
    }
}

const SKILL_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Frontend,
        &[
            "react", "angular", "vue", "javascript", "typescript", "html", "css", "tailwind",
            "next js", "redux", "bootstrap",
        ],
    ),
    (
        Category::Backend,
        &[
            "node", "express", "django", "flask", "spring", "java", "kotlin", "go", "golang",
            "php", "c#", ".net", "ruby", "rails", "graphql", "microservices",
        ],
    ),
    (
        Category::DataMl,
        &[
            "machine learning", "ml", "data science", "pandas", "numpy", "pytorch",
            "tensorflow", "scikit", "sql", "spark", "etl", "dbt", "snowflake",
        ],
    ),
    (
        Category::DevopsCloud,
        &[
            "aws", "amazon web services", "gcp", "azure", "docker", "kubernetes", "terraform",
            "ci", "cd", "jenkins",
        ],
    ),
    (Category::Mobile, &["react native", "android", "ios", "swift", "kotlin"]),
    (Category::Product, &["product manager", "product management"]),
    (
        Category::Design,
        &["ui/ux", "ux", "ui", "designer", "photoshop", "figma", "illustrator"],
    ),
    (Category::Qa, &["qa", "quality", "test", "testing"]),
    (
        Category::DataEngineer,
        &["spark", "kafka", "hadoop", "databricks", "airflow"],
    ),
];

const ROLE_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Frontend,
        &["frontend engineer", "web developer", "frontend developer"],
    ),
    (Category::Backend, &["backend engineer", "backend developer"]),
    (Category::Fullstack, &["full stack", "fullstack"]),
    (Category::Product, &["product manager", "product"]),
    (
        Category::DataMl,
        &["data scientist", "ml", "machine learning", "data analyst"],
    ),
    (Category::DataEngineer, &["data engineer"]),
    (Category::DevopsCloud, &["devops", "sre", "cloud"]),
    (Category::Qa, &["qa", "quality"]),
    (Category::Design, &["ux", "ui", "designer"]),
];

/// Substring keyword table compiled into one automaton.
///
/// A keyword listed under several categories is stored once and maps to all
/// of them, so every overlapping hit yields the full category list.
struct KeywordTable {
    matcher: AhoCorasick,
    categories: Vec<Vec<Category>>,
}

impl KeywordTable {
    fn build(table: &[(Category, &[&str])]) -> Self {
        let mut keywords: Vec<&str> = Vec::new();
        let mut categories: Vec<Vec<Category>> = Vec::new();

        for (category, list) in table {
            for keyword in list.iter() {
                match keywords.iter().position(|k| k == keyword) {
                    Some(idx) => categories[idx].push(*category),
                    None => {
                        keywords.push(*keyword);
                        categories.push(vec![*category]);
                    }
                }
            }
        }

        let matcher = AhoCorasick::new(&keywords).expect("Invalid keyword table");
        Self {
            matcher,
            categories,
        }
    }

    /// Add every category with a keyword occurring in `text`
    fn collect_into(&self, text: &str, out: &mut BTreeSet<Category>) {
        for mat in self.matcher.find_overlapping_iter(text) {
            out.extend(self.categories[mat.pattern().as_usize()].iter().copied());
        }
    }
}

static SKILL_TABLE: Lazy<KeywordTable> = Lazy::new(|| KeywordTable::build(SKILL_KEYWORDS));
static ROLE_TABLE: Lazy<KeywordTable> = Lazy::new(|| KeywordTable::build(ROLE_KEYWORDS));

/// Categories a single skill string maps to
pub fn skill_categories(skill: &str) -> BTreeSet<Category> {
    let mut set = BTreeSet::new();
    SKILL_TABLE.collect_into(&normalize(Some(skill)), &mut set);
    set
}

/// Categories a single role name maps to, including the hard-coded role rules
pub fn role_categories(role_name: Option<&str>) -> BTreeSet<Category> {
    let role = normalize(role_name);
    let mut set = BTreeSet::new();
    ROLE_TABLE.collect_into(&role, &mut set);

    if role.contains("developer") && role.contains("full") {
        set.insert(Category::Fullstack);
    }
    if role.contains("software engineer") {
        set.insert(Category::Backend);
    }
    set
}

/// All role categories a candidate belongs to
pub fn categorize(candidate: &Candidate) -> BTreeSet<Category> {
    let mut set = BTreeSet::new();
    for skill in &candidate.skills {
        set.extend(skill_categories(skill));
    }
    for work in &candidate.work_experiences {
        set.extend(role_categories(work.role_name.as_deref()));
    }
    set
}
