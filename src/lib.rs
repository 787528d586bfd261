//! Faceoff Library
//!
//! Survey game-show scoring: forgiving answer matching plus the face-off
//! and round controllers that drive it.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod utils;
