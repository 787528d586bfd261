//! Face-off
//!
//! Two players buzz in and guess; the better guess wins control of the board
//! and the winner chooses to pass or play.

use crate::error::{GameError, GameResult};
use crate::game::types::{Answer, Question};
use crate::utils::find_fuzzy_match_index;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOffPhase {
    Buzzer,
    FirstGuess,
    SecondGuess,
    PassOrPlay,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Pass,
    Play,
}

/// A guess made during the face-off and what it hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceOffGuess {
    pub player: usize,
    pub text: String,
    pub answer_id: Option<String>,
    pub points: u32,
}

impl FaceOffGuess {
    pub fn is_correct(&self) -> bool {
        self.answer_id.is_some()
    }
}

/// Outcome handed to the round controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceOffResult {
    pub starting_player: usize,
    pub choice: Choice,
    pub revealed_answer_ids: Vec<String>,
    pub points_earned: u32,
}

pub(crate) fn other_player(player: usize) -> usize {
    if player == 0 {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone)]
pub struct FaceOff {
    question: Question,
    phase: FaceOffPhase,
    first_buzzer: Option<usize>,
    first: Option<FaceOffGuess>,
    second: Option<FaceOffGuess>,
    winner: Option<usize>,
}

impl FaceOff {
    pub fn new(question: &Question) -> Self {
        Self {
            question: question.clone(),
            phase: FaceOffPhase::Buzzer,
            first_buzzer: None,
            first: None,
            second: None,
            winner: None,
        }
    }

    pub fn phase(&self) -> FaceOffPhase {
        self.phase
    }

    /// Board as seen during the face-off, with matched answers revealed
    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn first_buzzer(&self) -> Option<usize> {
        self.first_buzzer
    }

    /// Player expected to guess next, if a guess is pending
    pub fn guessing_player(&self) -> Option<usize> {
        match self.phase {
            FaceOffPhase::FirstGuess => self.first_buzzer,
            FaceOffPhase::SecondGuess => self.first_buzzer.map(other_player),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn first_guess_record(&self) -> Option<&FaceOffGuess> {
        self.first.as_ref()
    }

    pub fn second_guess_record(&self) -> Option<&FaceOffGuess> {
        self.second.as_ref()
    }

    /// Record who buzzed in first
    pub fn buzz(&mut self, player: usize) -> GameResult<()> {
        if self.phase != FaceOffPhase::Buzzer {
            return Err(GameError::phase(self.phase, "buzz"));
        }
        if player > 1 {
            return Err(GameError::UnknownPlayer(player));
        }

        info!("🔔 Player {} buzzed in first", player);
        self.first_buzzer = Some(player);
        self.phase = FaceOffPhase::FirstGuess;
        Ok(())
    }

    /// The first buzzer's guess. Hitting the top answer wins outright.
    pub fn first_guess(&mut self, text: &str) -> GameResult<&FaceOffGuess> {
        let player = match (self.phase, self.first_buzzer) {
            (FaceOffPhase::FirstGuess, Some(player)) => player,
            _ => return Err(GameError::phase(self.phase, "first guess")),
        };

        let record = self.record_guess(player, text);
        let top_id = self.question.top_answer().map(|a| a.id.clone());

        if record.answer_id.is_some() && record.answer_id == top_id {
            info!("🏆 Player {} found the top answer", player);
            self.winner = Some(player);
            self.phase = FaceOffPhase::PassOrPlay;
        } else {
            self.phase = FaceOffPhase::SecondGuess;
        }

        Ok(&*self.first.insert(record))
    }

    /// The other player's guess; decides who controls the board
    pub fn second_guess(&mut self, text: &str) -> GameResult<&FaceOffGuess> {
        let first_buzzer = match (self.phase, self.first_buzzer) {
            (FaceOffPhase::SecondGuess, Some(player)) => player,
            _ => return Err(GameError::phase(self.phase, "second guess")),
        };
        let player = other_player(first_buzzer);
        let record = self.record_guess(player, text);

        let first_points = self
            .first
            .as_ref()
            .filter(|g| g.is_correct())
            .map(|g| g.points);
        let second_points = record.answer_id.as_ref().map(|_| record.points);

        // Ties and double misses go to whoever buzzed first
        let winner = match (first_points, second_points) {
            (None, Some(_)) => player,
            (Some(first), Some(second)) if second > first => player,
            _ => first_buzzer,
        };

        info!("🎯 Player {} wins the face-off", winner);
        self.winner = Some(winner);
        self.phase = FaceOffPhase::PassOrPlay;

        Ok(&*self.second.insert(record))
    }

    /// Winner passes or plays; finishes the face-off
    pub fn choose(&mut self, choice: Choice) -> GameResult<FaceOffResult> {
        let winner = match (self.phase, self.winner) {
            (FaceOffPhase::PassOrPlay, Some(winner)) => winner,
            _ => return Err(GameError::phase(self.phase, "pass or play")),
        };

        let starting_player = match choice {
            Choice::Play => winner,
            Choice::Pass => other_player(winner),
        };

        let mut revealed_answer_ids: Vec<String> = Vec::new();
        let mut points_earned = 0;
        for guess in self.first.iter().chain(self.second.iter()) {
            if let Some(id) = &guess.answer_id {
                if !revealed_answer_ids.contains(id) {
                    revealed_answer_ids.push(id.clone());
                    points_earned += guess.points;
                }
            }
        }

        info!(
            "Player {} chose {:?}; player {} starts with {} points",
            winner, choice, starting_player, points_earned
        );
        self.phase = FaceOffPhase::Done;

        Ok(FaceOffResult {
            starting_player,
            choice,
            revealed_answer_ids,
            points_earned,
        })
    }

    fn record_guess(&mut self, player: usize, text: &str) -> FaceOffGuess {
        let matched = find_fuzzy_match_index(text, &self.question.answers)
            .map(|idx| self.question.answers[idx].clone());

        match matched {
            Some(Answer { id, points, .. }) => {
                debug!("Face-off guess '{}' matched answer {}", text, id);
                self.question.reveal(&id);
                FaceOffGuess {
                    player,
                    text: text.trim().to_string(),
                    answer_id: Some(id),
                    points,
                }
            }
            None => {
                debug!("Face-off guess '{}' is not on the board", text);
                FaceOffGuess {
                    player,
                    text: text.trim().to_string(),
                    answer_id: None,
                    points: 0,
                }
            }
        }
    }
}
