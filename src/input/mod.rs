//! Input processing module
//! Handles file detection and candidate loading

pub mod file_detector;
pub mod manager;

pub use manager::{parse_candidates, CandidateLoader};
