//! hirepilot library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{HirePilotError, Result};
pub use processing::candidate::Candidate;
pub use processing::scorer::{compute_score, ScoreMeta, Weights};
pub use processing::selector::{auto_pick, SelectionOptions};
pub use processing::shortlist::Shortlist;
