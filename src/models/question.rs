//! Trivia question as delivered by the provider

use serde::{Deserialize, Serialize};

/// A fetched question. Strings are kept exactly as the provider sent them;
/// display code runs them through [`crate::util::text::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub category: String,
    /// "multiple" or "boolean"
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    /// Correct and incorrect answers combined, in natural string order.
    ///
    /// Recomputed on every call, so a question always lists its answers the
    /// same way no matter how often it is shown.
    pub fn answer_options(&self) -> Vec<String> {
        let mut options = self.incorrect_answers.clone();
        options.push(self.correct_answer.clone());
        options.sort();
        options
    }

    /// Whether `answer` is one of this question's options
    pub fn has_option(&self, answer: &str) -> bool {
        self.correct_answer == answer || self.incorrect_answers.iter().any(|a| a == answer)
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Question;

    pub fn question(text: &str, correct: &str, incorrect: &[&str]) -> Question {
        Question {
            category: "General Knowledge".into(),
            question_type: "multiple".into(),
            difficulty: "easy".into(),
            question: text.into(),
            correct_answer: correct.into(),
            incorrect_answers: incorrect.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn three_questions() -> Vec<Question> {
        vec![
            question("Capital of France?", "Paris", &["Rome", "Berlin", "Madrid"]),
            question("2 + 2?", "4", &["3", "5", "22"]),
            question("Largest planet?", "Jupiter", &["Mars", "Venus", "Saturn"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::question;
    use super::*;

    #[test]
    fn test_answer_options_sorted_and_stable() {
        let q = question("Capital of France?", "Paris", &["Rome", "Berlin", "Madrid"]);
        let options = q.answer_options();
        assert_eq!(options, vec!["Berlin", "Madrid", "Paris", "Rome"]);
        assert_eq!(options, q.answer_options());
    }

    #[test]
    fn test_has_option() {
        let q = question("True?", "True", &["False"]);
        assert!(q.has_option("True"));
        assert!(q.has_option("False"));
        assert!(!q.has_option("Maybe"));
        assert!(q.is_correct("True"));
        assert!(!q.is_correct("False"));
    }

    #[test]
    fn test_deserialize_provider_shape() {
        let json = r#"{
            "type": "boolean",
            "difficulty": "easy",
            "category": "Science &amp; Nature",
            "question": "The sun is a star.",
            "correct_answer": "True",
            "incorrect_answers": ["False"]
        }"#;
        let q: Question = serde_json::from_str(json).expect("deserialize");
        assert_eq!(q.question_type, "boolean");
        assert_eq!(q.category, "Science &amp; Nature");
        assert_eq!(q.answer_options(), vec!["False", "True"]);
    }
}
