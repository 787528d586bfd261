//! Round control
//!
//! Owns the board and both players for one question after the face-off.
//! Every guess runs exactly one candidate search and produces the next
//! `RoundState` as a whole value.

use crate::error::{GameError, GameResult};
use crate::game::faceoff::{other_player, FaceOffResult};
use crate::game::types::{Player, Question};
use crate::utils::find_fuzzy_match_index;
use tracing::{debug, info};

/// How the round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// Every answer was found by the controlling player
    Cleared,
    /// The other player stole the banked points
    Stolen,
    /// The steal guess missed
    StealFailed,
}

/// What a single guess did to the round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Revealed { answer_id: String, points: u32 },
    AlreadyRevealed { answer_id: String },
    Strike { strikes: u32 },
    /// Strikes ran out; the other player now gets one steal attempt
    ControlPassed { to: usize },
    Stolen {
        answer_id: String,
        points: u32,
        transferred: i64,
    },
    StealFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub current_player: usize,
    /// Player who took control after the face-off
    pub controlling_player: usize,
    pub strikes: u32,
    pub steal_mode: bool,
    /// Points the controlling player earned this round, forfeited on a steal
    pub banked_points: i64,
    pub ended: Option<RoundEnd>,
}

impl RoundState {
    fn start(player: usize, banked_points: i64) -> Self {
        Self {
            current_player: player,
            controlling_player: player,
            strikes: 0,
            steal_mode: false,
            banked_points,
            ended: None,
        }
    }

    /// State after a wrong guess or host strike
    fn after_miss(&self, max_strikes: u32) -> (Self, GuessOutcome) {
        if self.steal_mode {
            let next = Self {
                ended: Some(RoundEnd::StealFailed),
                ..self.clone()
            };
            return (next, GuessOutcome::StealFailed);
        }

        let strikes = self.strikes + 1;
        if strikes >= max_strikes {
            let to = other_player(self.current_player);
            let next = Self {
                current_player: to,
                strikes: 0,
                steal_mode: true,
                ..self.clone()
            };
            (next, GuessOutcome::ControlPassed { to })
        } else {
            let next = Self {
                strikes,
                ..self.clone()
            };
            (next, GuessOutcome::Strike { strikes })
        }
    }
}

#[derive(Debug, Clone)]
pub struct Round {
    question: Question,
    players: [Player; 2],
    max_strikes: u32,
    state: RoundState,
}

impl Round {
    /// Start a round from the face-off result
    ///
    /// Face-off answers are revealed and their points credited to the
    /// starting player as the opening bank.
    pub fn new(
        question: Question,
        players: [Player; 2],
        faceoff: &FaceOffResult,
        max_strikes: u32,
    ) -> GameResult<Self> {
        if faceoff.starting_player > 1 {
            return Err(GameError::UnknownPlayer(faceoff.starting_player));
        }
        if max_strikes == 0 {
            return Err(GameError::Config(
                "max_strikes must be at least 1".to_string(),
            ));
        }

        let mut round = Self {
            question,
            players,
            max_strikes,
            state: RoundState::start(faceoff.starting_player, 0),
        };

        round.question.answers.iter_mut().for_each(|a| a.revealed = false);
        for id in &faceoff.revealed_answer_ids {
            round.question.reveal(id);
        }

        let opening = i64::from(faceoff.points_earned);
        round.players[faceoff.starting_player].score += opening;
        round.state.banked_points = opening;

        if round.question.all_revealed() {
            round.state.ended = Some(RoundEnd::Cleared);
        }

        info!(
            "▶️ Round '{}' started: player {} in control with {} points",
            round.question.prompt, faceoff.starting_player, opening
        );
        Ok(round)
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn into_players(self) -> [Player; 2] {
        self.players
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.state.current_player]
    }

    pub fn max_strikes(&self) -> u32 {
        self.max_strikes
    }

    pub fn is_over(&self) -> bool {
        self.state.ended.is_some()
    }

    /// Submit a guess for the current player
    pub fn guess(&mut self, text: &str) -> GameResult<GuessOutcome> {
        self.ensure_open("guess")?;

        let Some(idx) = find_fuzzy_match_index(text, &self.question.answers) else {
            debug!("Guess '{}' is not on the board", text);
            return Ok(self.miss());
        };

        let answer = &self.question.answers[idx];
        let answer_id = answer.id.clone();
        let points = answer.points;

        if answer.revealed {
            debug!("Guess '{}' matched already revealed {}", text, answer_id);
            return Ok(GuessOutcome::AlreadyRevealed { answer_id });
        }

        self.question.answers[idx].revealed = true;
        let current = self.state.current_player;
        self.players[current].score += i64::from(points);

        if self.state.steal_mode {
            return Ok(self.steal(answer_id, points));
        }

        info!("✅ '{}' revealed for {} points", answer_id, points);
        let mut next = self.state.clone();
        next.banked_points += i64::from(points);
        if self.question.all_revealed() {
            info!("🧹 Board cleared");
            next.ended = Some(RoundEnd::Cleared);
        }
        self.state = next;

        Ok(GuessOutcome::Revealed { answer_id, points })
    }

    /// Host-issued strike, same rules as a wrong guess
    pub fn strike(&mut self) -> GameResult<GuessOutcome> {
        self.ensure_open("strike")?;
        Ok(self.miss())
    }

    /// Show the rest of the board once the round is over; scores are unchanged
    pub fn reveal_remaining(&mut self) -> GameResult<()> {
        if !self.is_over() {
            return Err(GameError::Phase {
                phase: "InProgress".to_string(),
                action: "reveal remaining answers".to_string(),
            });
        }
        self.question.reveal_all();
        Ok(())
    }

    fn ensure_open(&self, action: &str) -> GameResult<()> {
        match self.state.ended {
            Some(end) => Err(GameError::phase(end, action)),
            None => Ok(()),
        }
    }

    fn miss(&mut self) -> GuessOutcome {
        let (next, outcome) = self.state.after_miss(self.max_strikes);
        match &outcome {
            GuessOutcome::ControlPassed { to } => {
                info!("❌ Out of strikes; player {} may steal", to)
            }
            GuessOutcome::StealFailed => info!("❌ Steal failed"),
            GuessOutcome::Strike { strikes } => {
                info!("❌ Strike {}/{}", strikes, self.max_strikes)
            }
            _ => {}
        }
        self.state = next;
        outcome
    }

    fn steal(&mut self, answer_id: String, points: u32) -> GuessOutcome {
        let transferred = self.state.banked_points;
        let thief = self.state.current_player;
        let victim = self.state.controlling_player;

        self.players[victim].score -= transferred;
        self.players[thief].score += transferred;

        info!(
            "💰 Player {} stole {} points with '{}'",
            thief, transferred, answer_id
        );
        self.state = RoundState {
            ended: Some(RoundEnd::Stolen),
            ..self.state.clone()
        };

        GuessOutcome::Stolen {
            answer_id,
            points,
            transferred,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::faceoff::Choice;
    use crate::game::types::Answer;

    fn question() -> Question {
        Question::new(
            "q1",
            "Name a fruit",
            vec![
                Answer::new("apple", "Apple", 40),
                Answer::new("banana", "Banana", 30),
                Answer::new("orange", "Orange", 20),
            ],
        )
        .unwrap()
    }

    fn players() -> [Player; 2] {
        [Player::new("1", "Ada"), Player::new("2", "Grace")]
    }

    fn opening(starting_player: usize, ids: &[&str], points: u32) -> FaceOffResult {
        FaceOffResult {
            starting_player,
            choice: Choice::Play,
            revealed_answer_ids: ids.iter().map(|s| s.to_string()).collect(),
            points_earned: points,
        }
    }

    #[test]
    fn test_faceoff_points_are_banked() {
        let round = Round::new(question(), players(), &opening(1, &["apple"], 40), 3).unwrap();
        assert_eq!(round.players()[1].score, 40);
        assert_eq!(round.state().banked_points, 40);
        assert!(round.question().answer("apple").unwrap().revealed);
        assert_eq!(round.current_player().name, "Grace");
    }

    #[test]
    fn test_reveal_and_clear() {
        let mut round = Round::new(question(), players(), &opening(0, &[], 0), 3).unwrap();

        assert_eq!(
            round.guess("bananna").unwrap(),
            GuessOutcome::Revealed {
                answer_id: "banana".to_string(),
                points: 30
            }
        );
        assert_eq!(
            round.guess("BANANA").unwrap(),
            GuessOutcome::AlreadyRevealed {
                answer_id: "banana".to_string()
            }
        );
        assert_eq!(round.state().strikes, 0);

        round.guess("apple").unwrap();
        round.guess("oranges").unwrap();
        assert_eq!(round.state().ended, Some(RoundEnd::Cleared));
        assert_eq!(round.players()[0].score, 90);
        assert!(round.guess("kiwi").is_err());
    }

    #[test]
    fn test_strikes_pass_control() {
        let mut round = Round::new(question(), players(), &opening(0, &[], 0), 3).unwrap();
        assert_eq!(round.guess("kiwi").unwrap(), GuessOutcome::Strike { strikes: 1 });
        assert_eq!(round.strike().unwrap(), GuessOutcome::Strike { strikes: 2 });
        assert_eq!(
            round.guess("").unwrap(),
            GuessOutcome::ControlPassed { to: 1 }
        );

        let state = round.state();
        assert!(state.steal_mode);
        assert_eq!(state.current_player, 1);
        assert_eq!(state.controlling_player, 0);
        assert_eq!(state.strikes, 0);
    }

    #[test]
    fn test_successful_steal_moves_bank() {
        let mut round = Round::new(question(), players(), &opening(0, &["apple"], 40), 2).unwrap();
        round.guess("banana").unwrap();
        round.guess("grape").unwrap();
        round.guess("mango").unwrap();

        let outcome = round.guess("orange").unwrap();
        assert_eq!(
            outcome,
            GuessOutcome::Stolen {
                answer_id: "orange".to_string(),
                points: 20,
                transferred: 70
            }
        );
        assert_eq!(round.players()[0].score, 0);
        assert_eq!(round.players()[1].score, 90);
        assert_eq!(round.state().ended, Some(RoundEnd::Stolen));
    }

    #[test]
    fn test_failed_steal_keeps_scores() {
        let mut round = Round::new(question(), players(), &opening(0, &["apple"], 40), 1).unwrap();
        assert_eq!(
            round.guess("pear").unwrap(),
            GuessOutcome::ControlPassed { to: 1 }
        );
        assert_eq!(round.guess("plum").unwrap(), GuessOutcome::StealFailed);
        assert_eq!(round.state().ended, Some(RoundEnd::StealFailed));
        assert_eq!(round.players()[0].score, 40);
        assert_eq!(round.players()[1].score, 0);

        assert!(!round.question().all_revealed());
        round.reveal_remaining().unwrap();
        assert!(round.question().all_revealed());
        assert_eq!(round.players()[0].score, 40);
    }

    #[test]
    fn test_faceoff_clearing_board_ends_round() {
        let single = Question::new("q2", "Name a fruit", vec![Answer::new("apple", "Apple", 40)])
            .unwrap();
        let mut round = Round::new(single, players(), &opening(0, &["apple"], 40), 3).unwrap();

        assert!(round.is_over());
        assert_eq!(round.state().ended, Some(RoundEnd::Cleared));
        assert_eq!(round.players()[0].score, 40);
        assert!(matches!(round.guess("apple"), Err(GameError::Phase { .. })));
    }

    #[test]
    fn test_steal_on_revealed_answer_is_ignored() {
        let mut round = Round::new(question(), players(), &opening(0, &["apple"], 40), 1).unwrap();
        assert_eq!(
            round.guess("kiwi").unwrap(),
            GuessOutcome::ControlPassed { to: 1 }
        );

        assert_eq!(
            round.guess("apple").unwrap(),
            GuessOutcome::AlreadyRevealed {
                answer_id: "apple".to_string()
            }
        );
        let state = round.state();
        assert!(state.steal_mode);
        assert_eq!(state.ended, None);
        assert_eq!(state.banked_points, 40);
        assert_eq!(round.players()[0].score, 40);
        assert_eq!(round.players()[1].score, 0);

        // The steal attempt is still open
        assert!(matches!(
            round.guess("banana").unwrap(),
            GuessOutcome::Stolen { transferred: 40, .. }
        ));
    }

    #[test]
    fn test_reveal_remaining_requires_end() {
        let mut round = Round::new(question(), players(), &opening(0, &[], 0), 3).unwrap();
        assert!(matches!(
            round.reveal_remaining(),
            Err(GameError::Phase { .. })
        ));
    }

    #[test]
    fn test_invalid_setup() {
        assert!(matches!(
            Round::new(question(), players(), &opening(2, &[], 0), 3),
            Err(GameError::UnknownPlayer(2))
        ));
        assert!(Round::new(question(), players(), &opening(0, &[], 0), 0).is_err());
    }
}
