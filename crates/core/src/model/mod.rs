mod question;
mod settings;
mod summary;

pub use question::{Difficulty, Mode, Question};
pub use settings::{SessionSettings, SettingsError};
pub use summary::{SessionSummary, SessionSummaryError};
