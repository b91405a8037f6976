//! Quiz settings model
//!
//! The four request parameters the user picks before a quiz starts, plus the
//! fixed category and difficulty sets offered by the settings screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A selectable trivia category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Provider category id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
}

/// Categories offered on the settings screen
pub const CATEGORIES: [Category; 4] = [
    Category { id: "9", name: "General Knowledge" },
    Category { id: "17", name: "Science & Nature" },
    Category { id: "21", name: "Sports" },
    Category { id: "23", name: "History" },
];

/// Look up a category by provider id
pub fn category_by_id(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Value sent as the `difficulty` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Capitalised label for display
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer format of the requested questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Four options, one correct
    Multiple,
    /// True / False
    Boolean,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [QuestionType::Multiple, QuestionType::Boolean];

    /// Value sent as the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Multiple => "multiple",
            QuestionType::Boolean => "boolean",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Multiple => "Multiple Choice",
            QuestionType::Boolean => "True / False",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quiz request configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Number of questions (1..=50, bounded by the input control)
    pub amount: u8,
    /// Provider category id
    pub category: String,
    /// Requested difficulty
    pub difficulty: Difficulty,
    /// Requested answer format
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            amount: 10,
            category: "9".to_string(),
            difficulty: Difficulty::Medium,
            question_type: QuestionType::Multiple,
        }
    }
}

/// A partial edit of [`QuizSettings`]; `None` fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsEdit {
    pub amount: Option<u8>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub question_type: Option<QuestionType>,
}

impl SettingsEdit {
    pub fn amount(amount: u8) -> Self {
        Self { amount: Some(amount), ..Self::default() }
    }

    pub fn category(id: impl Into<String>) -> Self {
        Self { category: Some(id.into()), ..Self::default() }
    }

    pub fn difficulty(difficulty: Difficulty) -> Self {
        Self { difficulty: Some(difficulty), ..Self::default() }
    }

    pub fn question_type(question_type: QuestionType) -> Self {
        Self { question_type: Some(question_type), ..Self::default() }
    }
}

impl QuizSettings {
    /// Produce a new settings value with the edit applied
    pub fn apply(&self, edit: SettingsEdit) -> Self {
        Self {
            amount: edit.amount.unwrap_or(self.amount),
            category: edit.category.unwrap_or_else(|| self.category.clone()),
            difficulty: edit.difficulty.unwrap_or(self.difficulty),
            question_type: edit.question_type.unwrap_or(self.question_type),
        }
    }

    /// Display name of the selected category, or the raw id if it is not one
    /// of the fixed set
    pub fn category_name(&self) -> &str {
        category_by_id(&self.category)
            .map(|c| c.name)
            .unwrap_or(self.category.as_str())
    }

    /// Query parameters for the provider request, in request order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("amount", self.amount.to_string()),
            ("category", self.category.clone()),
            ("difficulty", self.difficulty.as_str().to_string()),
            ("type", self.question_type.as_str().to_string()),
        ]
    }
}
