use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::session::{normalize_answer, AnswerOutcome, QuizMode, QuizResult, QuizSession, Question};
use crate::error::{Error, Result};
use crate::repository::{TaxonomyFilter, Word};

/// What the settings page last asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizSettings {
    pub filter: TaxonomyFilter,
    pub mode: QuizMode,
    pub requested_count: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum QuizPhase {
    Idle,
    Configuring,
    InProgress(QuizSession),
    Finished(QuizResult),
}

/// Parses the count input field. Anything that is not an integer means "use every word".
pub fn parse_requested_count(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Missing, non-positive or oversized requests fall back to the pool size.
pub fn resolve_count(requested: Option<i64>, pool_size: usize) -> usize {
    match requested {
        Some(n) if n > 0 && (n as u64) <= pool_size as u64 => n as usize,
        _ => pool_size,
    }
}

pub struct QuizEngine<R: Rng = StdRng> {
    rng: R,
    settings: Option<QuizSettings>,
    phase: QuizPhase,
}

impl QuizEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for QuizEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        QuizEngine {
            rng,
            settings: None,
            phase: QuizPhase::Idle,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn settings(&self) -> Option<&QuizSettings> {
        self.settings.as_ref()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            QuizPhase::InProgress(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.phase, QuizPhase::InProgress(_))
    }

    /// Records the settings page state. Any running session is dropped.
    pub fn configure(&mut self, settings: QuizSettings) {
        if self.is_in_progress() {
            debug!("Quiz reconfigured mid-session; discarding it");
        }
        self.settings = Some(settings);
        self.phase = QuizPhase::Configuring;
    }

    /// Starts a session over `eligible`, drawing the requested number of words
    /// uniformly without replacement.
    pub fn start<'a, I>(&mut self, eligible: I, mode: QuizMode, requested_count: Option<i64>) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Word>,
    {
        if self.is_in_progress() {
            return Err(Error::InvalidState(
                "a quiz is already running; abandon it first".to_string(),
            ));
        }
        let pool: Vec<Word> = eligible.into_iter().cloned().collect();
        if pool.is_empty() {
            return Err(Error::EmptyPool);
        }

        let count = resolve_count(requested_count, pool.len());
        let mut order: Vec<usize> = (0..pool.len()).collect();
        order.shuffle(&mut self.rng);
        order.truncate(count);

        info!(
            "Starting {} quiz: {} of {} eligible words",
            mode,
            count,
            pool.len()
        );
        self.phase = QuizPhase::InProgress(QuizSession::new(mode, pool, order));
        Ok(count)
    }

    /// Starts from the stored settings, using `eligible` as the pool.
    pub fn start_configured<'a, I>(&mut self, eligible: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Word>,
    {
        let settings = self
            .settings
            .clone()
            .ok_or_else(|| Error::InvalidState("quiz has not been configured".to_string()))?;
        self.start(eligible, settings.mode, settings.requested_count)
    }

    pub fn current_question(&self) -> Option<Question> {
        self.session().and_then(QuizSession::question)
    }

    /// `(current question number, total)` while a session runs.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.session()
            .map(|session| (session.current_index(), session.total()))
    }

    /// Scores an answer for the current question. A second submission for the
    /// same question returns the first verdict and does not score again.
    pub fn check_answer(&mut self, raw: &str) -> Result<AnswerOutcome> {
        let session = match &mut self.phase {
            QuizPhase::InProgress(session) => session,
            _ => return Err(Error::InvalidState("no quiz is running".to_string())),
        };
        if let Some(outcome) = &session.current_outcome {
            debug!("Answer already submitted for question {}", session.current_index);
            return Ok(outcome.clone());
        }
        let word = session
            .current_word()
            .ok_or_else(|| Error::InvalidState("no current question".to_string()))?;

        let answer = normalize_answer(raw);
        let accepted = session.accepted_answers(word);
        let correct = accepted.iter().any(|candidate| candidate.to_lowercase() == answer);

        if correct {
            session.correct_count += 1;
        }
        let outcome = AnswerOutcome { correct, accepted };
        session.current_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Moves to the next question. Past the last one the session finishes and
    /// the result is returned.
    pub fn advance(&mut self) -> Result<Option<QuizResult>> {
        let session = match &mut self.phase {
            QuizPhase::InProgress(session) => session,
            _ => return Err(Error::InvalidState("no quiz is running".to_string())),
        };
        session.current_index += 1;
        session.current_outcome = None;
        if session.current_index <= session.total() {
            return Ok(None);
        }

        let result = QuizResult {
            correct: session.correct_count,
            total: session.total(),
        };
        info!("Quiz finished: {} / {}", result.correct, result.total);
        self.phase = QuizPhase::Finished(result);
        Ok(Some(result))
    }

    /// `(correct, total)`, only once the session has finished.
    pub fn result(&self) -> Option<QuizResult> {
        match &self.phase {
            QuizPhase::Finished(result) => Some(*result),
            _ => None,
        }
    }

    /// Drops the session without side effects and goes back to the settings.
    pub fn abandon(&mut self) {
        self.phase = if self.settings.is_some() {
            QuizPhase::Configuring
        } else {
            QuizPhase::Idle
        };
    }
}
