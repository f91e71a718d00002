use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("total questions must be > 0")]
    InvalidTotalQuestions,

    #[error("question time must be > 0 seconds")]
    InvalidQuestionTime,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Fixed-at-start configuration for one quiz session.
///
/// Mode and difficulty are *not* part of the settings: they may change
/// mid-session and live on the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    total_questions: u32,
    question_time_secs: u32,
}

impl SessionSettings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when either value is zero.
    pub fn new(total_questions: u32, question_time_secs: u32) -> Result<Self, SettingsError> {
        if total_questions == 0 {
            return Err(SettingsError::InvalidTotalQuestions);
        }
        if question_time_secs == 0 {
            return Err(SettingsError::InvalidQuestionTime);
        }
        Ok(Self {
            total_questions,
            question_time_secs,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn question_time_secs(&self) -> u32 {
        self.question_time_secs
    }
}

impl Default for SessionSettings {
    /// Ten questions, thirty seconds each.
    fn default() -> Self {
        Self {
            total_questions: 10,
            question_time_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_ten_questions_of_thirty_seconds() {
        let settings = SessionSettings::default();
        assert_eq!(settings.total_questions(), 10);
        assert_eq!(settings.question_time_secs(), 30);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(
            SessionSettings::new(0, 30).unwrap_err(),
            SettingsError::InvalidTotalQuestions
        );
        assert_eq!(
            SessionSettings::new(10, 0).unwrap_err(),
            SettingsError::InvalidQuestionTime
        );
    }
}
