//! Final standings

use crate::game::types::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    ranked: Vec<Player>,
}

/// Rank players by score, highest first; equal scores keep their seat order
pub fn standings(players: &[Player]) -> Standings {
    let mut ranked = players.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    Standings { ranked }
}

impl Standings {
    pub fn ranked(&self) -> &[Player] {
        &self.ranked
    }

    pub fn is_tie(&self) -> bool {
        matches!(self.ranked.as_slice(), [first, second, ..] if first.score == second.score)
    }

    /// Outright leader, `None` when nobody played or the top scores tie
    pub fn winner(&self) -> Option<&Player> {
        if self.is_tie() {
            return None;
        }
        self.ranked.first()
    }
}
