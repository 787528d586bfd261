//! Game flow for a single question
//!
//! The face-off decides who controls the board, then the round controller
//! feeds each guess through the answer matcher.

pub mod faceoff;
pub mod outcome;
pub mod round;
pub mod types;

pub use faceoff::{Choice, FaceOff, FaceOffGuess, FaceOffPhase, FaceOffResult};
pub use outcome::{standings, Standings};
pub use round::{GuessOutcome, Round, RoundEnd, RoundState};
pub use types::{Answer, Player, Question};
