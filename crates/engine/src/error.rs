//! Shared error types for the engine crate.

use thiserror::Error;

use quiz_core::model::SessionSummaryError;

/// Errors emitted by `QuizSession`.
///
/// A misordered command (submitting while no question is open,
/// advancing while one still is) returns an error and leaves the
/// session untouched; nothing here is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no question is awaiting an answer")]
    NotAcceptingAnswers,
    #[error("no closed question to advance past")]
    NothingToAdvance,
    #[error("answer is empty")]
    EmptyAnswer,
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
