use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::scoring;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct count ({correct}) exceeds answered count ({answered})")]
    CountMismatch { correct: u32, answered: u32 },
}

/// Frozen statistics for a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    score: u32,
    correct: u32,
    answered: u32,
    best_streak: u32,
}

impl SessionSummary {
    /// Build a summary from final session counters.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at`
    /// is before `started_at`, and `SessionSummaryError::CountMismatch`
    /// if more answers were correct than were given.
    pub fn from_counts(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        score: u32,
        correct: u32,
        answered: u32,
        best_streak: u32,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        if correct > answered {
            return Err(SessionSummaryError::CountMismatch { correct, answered });
        }

        Ok(Self {
            started_at,
            completed_at,
            score,
            correct,
            answered,
            best_streak,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Rounded accuracy percentage, 0 when nothing was answered.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        scoring::accuracy_percent(self.correct, self.answered)
    }
}
