pub mod engine;
pub mod session;

pub use engine::{parse_requested_count, resolve_count, QuizEngine, QuizPhase, QuizSettings};
pub use session::{AnswerOutcome, QuizMode, QuizResult, QuizSession, Question};
