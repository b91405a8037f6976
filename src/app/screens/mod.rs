//! TUI screen components
//!
//! Contains individual screen implementations for each quiz phase.

pub mod question;
pub mod results;
pub mod settings;
pub mod status;

pub use question::{answer_mark, AnswerMark, QuestionCommand, QuestionScreen};
pub use results::{ResultsCommand, ResultsScreen};
pub use settings::{SettingsCommand, SettingsField, SettingsScreen};
pub use status::{StatusCommand, StatusScreen};
