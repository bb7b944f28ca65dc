//! Candidate scoring, categorization and shortlist selection

pub mod candidate;
pub mod categorizer;
pub mod explainer;
pub mod ranking;
pub mod region;
pub mod scorer;
pub mod selector;
pub mod shortlist;
pub mod text_processor;
