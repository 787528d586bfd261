//! Core processing modules
//!
//! Contains the text normalization shared by the answer matcher.

pub mod text_normalizer;

pub use text_normalizer::normalize;
