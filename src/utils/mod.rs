//! Utility modules

pub mod fuzzy;

pub use fuzzy::{
    edit_threshold, find_fuzzy_match, find_fuzzy_match_index, fuzzy_match, levenshtein, Candidate,
};
