//! Quiz session record
//!
//! The questions of one attempt, the cursor over them, and the answers given
//! so far. The score is always derived from the answers.

use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::AnswerOrder;
use crate::models::Question;

/// Percentage of correct answers, `0.0` for an empty session
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    score as f64 / total as f64 * 100.0
}

/// An in-progress or completed quiz attempt
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    answers: Vec<Option<String>>,
    complete: bool,
    /// Answer order per question, when frozen at session start
    frozen_options: Option<Vec<Vec<String>>>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over `questions`. Returns `None` for an empty set.
    pub fn new(questions: Vec<Question>, order: AnswerOrder) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }

        let frozen_options = match order {
            AnswerOrder::Sorted => None,
            AnswerOrder::Shuffled => {
                let mut rng = SmallRng::from_entropy();
                Some(
                    questions
                        .iter()
                        .map(|q| {
                            let mut options = q.answer_options();
                            options.shuffle(&mut rng);
                            options
                        })
                        .collect(),
                )
            }
        };

        Some(Self {
            answers: vec![None; questions.len()],
            questions,
            index: 0,
            complete: false,
            frozen_options,
            started_at: Utc::now(),
            finished_at: None,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.answers[self.index].as_deref()
    }

    /// Answer options for question `i` in display order
    pub fn answer_options(&self, i: usize) -> Vec<String> {
        match &self.frozen_options {
            Some(frozen) => frozen[i].clone(),
            None => self.questions[i].answer_options(),
        }
    }

    /// Number of answers equal to their question's correct answer
    pub fn score(&self) -> usize {
        self.answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, question)| {
                answer
                    .as_deref()
                    .is_some_and(|a| question.is_correct(a))
            })
            .count()
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.score(), self.len())
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Time between start and completion
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// Record `answer` for the current question. Returns false if the answer
    /// is not one of its options or the session is already complete.
    pub(crate) fn select(&mut self, answer: &str) -> bool {
        if self.complete || !self.current_question().has_option(answer) {
            return false;
        }
        self.answers[self.index] = Some(answer.to_string());
        true
    }

    /// Advance, or mark the session complete when already on the last question
    pub(crate) fn advance(&mut self) {
        if self.complete {
            return;
        }
        if self.is_last() {
            self.complete = true;
            self.finished_at = Some(Utc::now());
        } else {
            self.index += 1;
        }
    }

    pub(crate) fn go_back(&mut self) {
        if !self.complete && self.index > 0 {
            self.index -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::fixtures::three_questions;

    fn session() -> QuizSession {
        QuizSession::new(three_questions(), AnswerOrder::Sorted).unwrap()
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.len(), 3);
        assert_eq!(s.index(), 0);
        assert_eq!(s.answers(), &[None, None, None]);
        assert_eq!(s.score(), 0);
        assert!(!s.is_complete());
        assert!(s.finished_at().is_none());
    }

    #[test]
    fn test_empty_session_rejected() {
        assert!(QuizSession::new(Vec::new(), AnswerOrder::Sorted).is_none());
    }

    #[test]
    fn test_score_follows_answers() {
        let mut s = session();
        assert!(s.select("Paris"));
        assert_eq!(s.score(), 1);
        assert!(s.select("Rome"));
        assert_eq!(s.score(), 0);
        assert!(!s.select("London"));
        assert_eq!(s.current_answer(), Some("Rome"));
    }

    #[test]
    fn test_navigation_bounds() {
        let mut s = session();
        s.go_back();
        assert_eq!(s.index(), 0);
        s.advance();
        s.advance();
        assert_eq!(s.index(), 2);
        assert!(s.is_last());
        s.advance();
        assert_eq!(s.index(), 2);
        assert!(s.is_complete());
        assert!(s.elapsed().is_some());

        // Completion is final for the session.
        s.go_back();
        s.advance();
        assert_eq!(s.index(), 2);
        assert!(s.is_complete());
        assert!(!s.select("Jupiter"));
    }

    #[test]
    fn test_shuffled_order_is_frozen() {
        let s = QuizSession::new(three_questions(), AnswerOrder::Shuffled).unwrap();
        for i in 0..s.len() {
            let first = s.answer_options(i);
            assert_eq!(first, s.answer_options(i));
            let mut sorted = first.clone();
            sorted.sort();
            assert_eq!(sorted, s.questions()[i].answer_options());
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 3), 100.0);
        assert!((percentage(1, 3) - 33.333).abs() < 0.01);
    }
}
