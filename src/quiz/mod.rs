//! Quiz state machine
//!
//! `NotStarted -> Loading -> Active -> Complete`, with `Error` reachable from
//! `Loading`. Operations called in a phase where they make no sense are
//! ignored rather than reported.

pub mod session;

pub use session::{percentage, QuizSession};

use tracing::{debug, info, warn};

use crate::config::AnswerOrder;
use crate::error::fetch_message;
use crate::fetch::FetchError;
use crate::models::{Question, QuizSettings, SettingsEdit};

/// Externally visible phase of the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Loading,
    Active,
    Complete,
    Error,
}

/// Handle for one outstanding fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    /// Settings as they were when the quiz was started
    pub settings: QuizSettings,
}

#[derive(Debug, Clone, PartialEq)]
enum QuizState {
    NotStarted,
    Loading { ticket: u64 },
    Running(QuizSession),
    Failed { error: FetchError },
}

/// Owns the settings and the current session
#[derive(Debug, Clone)]
pub struct QuizMachine {
    settings: QuizSettings,
    answer_order: AnswerOrder,
    state: QuizState,
    next_ticket: u64,
}

impl QuizMachine {
    pub fn new(settings: QuizSettings, answer_order: AnswerOrder) -> Self {
        Self {
            settings,
            answer_order,
            state: QuizState::NotStarted,
            next_ticket: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            QuizState::NotStarted => Phase::NotStarted,
            QuizState::Loading { .. } => Phase::Loading,
            QuizState::Running(session) if session.is_complete() => Phase::Complete,
            QuizState::Running(_) => Phase::Active,
            QuizState::Failed { .. } => Phase::Error,
        }
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Current session, active or complete
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            QuizState::Running(session) => Some(session),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            QuizState::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Message for the error screen
    pub fn error_message(&self) -> Option<&'static str> {
        self.error().map(fetch_message)
    }

    /// Apply a settings edit; only allowed before a quiz starts
    pub fn update_settings(&mut self, edit: SettingsEdit) {
        if self.state == QuizState::NotStarted {
            self.settings = self.settings.apply(edit);
        }
    }

    /// Move to `Loading` and hand out the ticket the fetch result must carry
    pub fn start_quiz(&mut self) -> Option<FetchTicket> {
        if self.state != QuizState::NotStarted {
            debug!(phase = ?self.phase(), "start ignored");
            return None;
        }
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.state = QuizState::Loading { ticket: id };
        info!(ticket = id, amount = self.settings.amount, "quiz starting");
        Some(FetchTicket {
            id,
            settings: self.settings.clone(),
        })
    }

    /// Deliver a fetch outcome. Results for any ticket other than the one
    /// currently loading are dropped.
    pub fn finish_fetch(&mut self, ticket: u64, result: Result<Vec<Question>, FetchError>) {
        match self.state {
            QuizState::Loading { ticket: current } if current == ticket => {}
            _ => {
                debug!(ticket, "discarding stale fetch result");
                return;
            }
        }

        self.state = match result {
            Ok(questions) => match QuizSession::new(questions, self.answer_order) {
                Some(session) => {
                    info!(questions = session.len(), "quiz active");
                    QuizState::Running(session)
                }
                None => QuizState::Failed {
                    error: FetchError::NoQuestionsAvailable { code: 0 },
                },
            },
            Err(error) => {
                warn!(%error, "quiz failed to load");
                QuizState::Failed { error }
            }
        };
    }

    /// Abandon an in-flight fetch
    pub fn cancel_loading(&mut self) {
        if let QuizState::Loading { ticket } = self.state {
            info!(ticket, "loading cancelled");
            self.state = QuizState::NotStarted;
        }
    }

    pub fn select_answer(&mut self, answer: &str) {
        if let Some(session) = self.active_session_mut() {
            if !session.select(answer) {
                warn!(answer, "answer is not an option of the current question");
            }
        }
    }

    pub fn next(&mut self) {
        if let Some(session) = self.active_session_mut() {
            session.advance();
            if session.is_complete() {
                info!(score = session.score(), total = session.len(), "quiz complete");
            }
        }
    }

    pub fn previous(&mut self) {
        if let Some(session) = self.active_session_mut() {
            session.go_back();
        }
    }

    /// Discard the session or error and return to the settings
    pub fn retry(&mut self) {
        match self.phase() {
            Phase::Complete | Phase::Error => {
                debug!("quiz reset");
                self.state = QuizState::NotStarted;
            }
            _ => {}
        }
    }

    fn active_session_mut(&mut self) -> Option<&mut QuizSession> {
        match &mut self.state {
            QuizState::Running(session) if !session.is_complete() => Some(session),
            _ => None,
        }
    }
}

impl Default for QuizMachine {
    fn default() -> Self {
        Self::new(QuizSettings::default(), AnswerOrder::default())
    }
}
