//! Data models module
//!
//! Quiz settings and the question shape returned by the trivia provider.

pub mod question;
pub mod settings;

// Re-export commonly used types
pub use question::Question;
pub use settings::{
    category_by_id, Category, Difficulty, QuestionType, QuizSettings, SettingsEdit, CATEGORIES,
};
