mod countdown;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use countdown::{Countdown, CountdownTick, LOW_TIME_SECS};
pub use service::QuizSession;
pub use view::{AdvanceOutcome, AnswerFeedback, AnswerOutcome, SessionPhase, SessionView, TickEvent};
