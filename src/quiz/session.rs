use std::fmt;

use serde::{Deserialize, Serialize};

use crate::repository::{Word, WordId};

/// Which side of the card is shown.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// Prompt with the word, expect the meaning.
    WordToMeaning,
    /// Prompt with the meaning, expect the word or one of its alternates.
    #[default]
    MeaningToWord,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::WordToMeaning => write!(f, "word → meaning"),
            QuizMode::MeaningToWord => write!(f, "meaning → word"),
        }
    }
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub word_id: WordId,
    pub prompt: String,
    /// 1-based position in the session
    pub number: usize,
    pub total: usize,
}

impl Question {
    pub fn progress_text(&self) -> String {
        format!("Question {} / {}", self.number, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub accepted: Vec<String>,
}

impl AnswerOutcome {
    pub fn accepted_display(&self) -> String {
        self.accepted.join(" / ")
    }

    pub fn verdict_text(&self) -> String {
        if self.correct {
            "Correct!".to_string()
        } else {
            format!("Wrong… the answer is \"{}\"", self.accepted_display())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn score_text(&self) -> String {
        format!("Correct: {} / {}", self.correct, self.total)
    }
}

/// A running quiz. `pool` is the eligible snapshot taken at start; `order`
/// holds the sampled pool indices in question order.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub(crate) mode: QuizMode,
    pub(crate) pool: Vec<Word>,
    pub(crate) order: Vec<usize>,
    pub(crate) current_index: usize,
    pub(crate) correct_count: usize,
    /// Verdict for the current question, once submitted
    pub(crate) current_outcome: Option<AnswerOutcome>,
}

pub(crate) fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl QuizSession {
    pub(crate) fn new(mode: QuizMode, pool: Vec<Word>, order: Vec<usize>) -> Self {
        QuizSession {
            mode,
            pool,
            order,
            current_index: 1,
            correct_count: 0,
            current_outcome: None,
        }
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn current_outcome(&self) -> Option<&AnswerOutcome> {
        self.current_outcome.as_ref()
    }

    /// Words asked in this session, in question order.
    pub fn drawn_words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.order.iter().map(move |&index| &self.pool[index])
    }

    pub(crate) fn current_word(&self) -> Option<&Word> {
        self.current_index
            .checked_sub(1)
            .and_then(|position| self.order.get(position))
            .and_then(|&index| self.pool.get(index))
    }

    pub(crate) fn question(&self) -> Option<Question> {
        let word = self.current_word()?;
        let prompt = match self.mode {
            QuizMode::MeaningToWord => word.meaning.clone(),
            QuizMode::WordToMeaning => word.word.clone(),
        };
        Some(Question {
            word_id: word.id,
            prompt,
            number: self.current_index,
            total: self.total(),
        })
    }

    pub(crate) fn accepted_answers(&self, word: &Word) -> Vec<String> {
        match self.mode {
            QuizMode::WordToMeaning => vec![word.meaning.clone()],
            QuizMode::MeaningToWord => std::iter::once(word.word.clone())
                .chain(word.word_alts.iter().cloned())
                .collect(),
        }
    }
}
