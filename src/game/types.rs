//! Board data: players, answers, and questions

use crate::error::{GameError, GameResult};
use crate::utils::Candidate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub score: i64,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
        }
    }
}

/// A survey answer on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub points: u32,
    #[serde(default)]
    pub revealed: bool,
}

impl Answer {
    pub fn new(id: impl Into<String>, text: impl Into<String>, points: u32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            points,
            revealed: false,
        }
    }
}

impl Candidate for Answer {
    fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub answers: Vec<Answer>,
}

impl Question {
    /// Build a question, trimming text and dropping blank answers
    ///
    /// Fails if the prompt is blank or no answer survives.
    pub fn new(
        id: impl Into<String>,
        prompt: &str,
        answers: impl IntoIterator<Item = Answer>,
    ) -> GameResult<Self> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GameError::InvalidQuestion(
                "question text is empty".to_string(),
            ));
        }

        let answers: Vec<Answer> = answers
            .into_iter()
            .filter_map(|mut answer| {
                let text = answer.text.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                answer.text = text;
                answer.revealed = false;
                Some(answer)
            })
            .collect();

        if answers.is_empty() {
            return Err(GameError::InvalidQuestion(format!(
                "'{}' has no answers",
                prompt
            )));
        }

        Ok(Self {
            id: id.into(),
            prompt: prompt.to_string(),
            answers,
        })
    }

    /// Highest scoring answer; the earliest one wins a points tie
    pub fn top_answer(&self) -> Option<&Answer> {
        self.answers
            .iter()
            .reduce(|best, a| if a.points > best.points { a } else { best })
    }

    /// Answers in display order, most points first
    pub fn board(&self) -> Vec<&Answer> {
        let mut board: Vec<&Answer> = self.answers.iter().collect();
        board.sort_by(|a, b| b.points.cmp(&a.points));
        board
    }

    pub fn answer(&self, id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    /// Mark an answer revealed. Returns false if it was unknown or already shown.
    pub fn reveal(&mut self, id: &str) -> bool {
        match self.answers.iter_mut().find(|a| a.id == id) {
            Some(answer) if !answer.revealed => {
                answer.revealed = true;
                true
            }
            _ => false,
        }
    }

    pub fn reveal_all(&mut self) {
        for answer in &mut self.answers {
            answer.revealed = true;
        }
    }

    pub fn all_revealed(&self) -> bool {
        self.answers.iter().all(|a| a.revealed)
    }
}
