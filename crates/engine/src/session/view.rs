use quiz_core::model::{Difficulty, Mode, SessionSummary};

/// Where the session currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Before the first start, or after a reset.
    Idle,
    /// A question is live and its countdown is running.
    InProgress,
    /// The current question was answered or timed out; waiting for an
    /// explicit advance.
    QuestionClosed,
    /// The last question closed; final statistics are frozen.
    Finished,
}

/// How a question was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    TimedOut,
}

/// Result of closing a question, for the presentation layer to render.
///
/// Intentionally not a UI view-model: no pre-formatted strings. The
/// presentation layer decides how to phrase "correct" or show the
/// expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub outcome: AnswerOutcome,
    /// The answer that was expected, regardless of outcome.
    pub expected: i64,
    /// Points earned by this question; zero unless correct.
    pub points_earned: u32,
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome == AnswerOutcome::Correct
    }
}

/// What a delivered clock tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The countdown moved; nothing closed.
    Running { remaining_secs: u32, low_time: bool },
    /// The countdown hit zero and the question closed as timed out.
    Expired(AnswerFeedback),
}

/// Result of advancing past a closed question.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// A fresh question is live.
    NextQuestion,
    /// That was the last question; the session is finished.
    Finished(SessionSummary),
}

/// Read-only projection of the whole session, refreshed after every
/// state change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// Prompt of the in-flight or just-closed question.
    pub prompt: Option<String>,
    /// 1-based, never exceeds `total_questions`.
    pub question_index: u32,
    pub total_questions: u32,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub accuracy_percent: u32,
    pub time_remaining_secs: u32,
    /// Remaining time over the per-question budget, `0.0..=1.0`.
    pub time_fraction: f32,
    pub low_time: bool,
    /// Feedback for the most recently closed question, if any.
    pub feedback: Option<AnswerFeedback>,
}
