#![forbid(unsafe_code)]

pub mod error;
pub mod session;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use session::{
    AdvanceOutcome, AnswerFeedback, AnswerOutcome, Countdown, QuizSession, SessionPhase,
    SessionView, TickEvent, LOW_TIME_SECS,
};
