//! Main application controller
//!
//! [`Controller`] owns the quiz state machine, the screens and the channel
//! the background fetch reports on; it is terminal-free so it can be driven
//! directly. [`App`] wraps it with the real terminal and the event loop.

use std::sync::Arc;

use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app::{
        screens::{
            QuestionCommand, QuestionScreen, ResultsCommand, ResultsScreen, SettingsCommand,
            SettingsScreen, StatusCommand, StatusScreen,
        },
        state::{NavigationAction, Screen, StateManager},
        tui::{Tui, TuiEvent},
    },
    config::AppConfig,
    fetch::{FetchError, QuestionSource, TriviaClient},
    models::Question,
    quiz::{FetchTicket, QuizMachine},
    Result,
};

/// Fetch result tagged with the ticket it answers
#[derive(Debug)]
struct FetchOutcome {
    ticket: u64,
    result: std::result::Result<Vec<Question>, FetchError>,
}

/// Terminal-independent application core
pub struct Controller {
    machine: QuizMachine,
    source: Arc<dyn QuestionSource>,
    state_manager: StateManager,
    settings_screen: SettingsScreen,
    status_screen: StatusScreen,
    question_screen: QuestionScreen,
    results_screen: ResultsScreen,
    fetch_tx: mpsc::Sender<FetchOutcome>,
    fetch_rx: mpsc::Receiver<FetchOutcome>,
}

impl Controller {
    pub fn new(config: &AppConfig, source: Arc<dyn QuestionSource>) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel(4);
        Self {
            machine: QuizMachine::new(config.defaults.clone(), config.answer_order),
            source,
            state_manager: StateManager::new(),
            settings_screen: SettingsScreen::new(),
            status_screen: StatusScreen::new(),
            question_screen: QuestionScreen::new(),
            results_screen: ResultsScreen::new(),
            fetch_tx,
            fetch_rx,
        }
    }

    pub fn machine(&self) -> &QuizMachine {
        &self.machine
    }

    pub fn screen(&self) -> Screen {
        self.state_manager.current_screen()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }

    /// Timer tick: animate and pick up a finished fetch
    pub fn on_tick(&mut self) {
        self.status_screen.tick();
        self.poll_fetch();
    }

    /// Apply any fetch results that have arrived, without waiting
    pub fn poll_fetch(&mut self) {
        while let Ok(outcome) = self.fetch_rx.try_recv() {
            self.machine.finish_fetch(outcome.ticket, outcome.result);
        }
        self.sync_screen();
    }

    /// Wait for the next fetch result and apply it
    pub async fn wait_for_fetch(&mut self) {
        if let Some(outcome) = self.fetch_rx.recv().await {
            self.machine.finish_fetch(outcome.ticket, outcome.result);
        }
        self.sync_screen();
    }

    /// Handle one navigation action on the current screen
    pub fn handle_action(&mut self, action: NavigationAction) {
        if action == NavigationAction::Quit {
            info!("quit requested");
            self.state_manager.quit();
            return;
        }

        match self.state_manager.current_screen() {
            Screen::Settings => {
                match self
                    .settings_screen
                    .handle_action(action, self.machine.settings())
                {
                    SettingsCommand::Edit(edit) => self.machine.update_settings(edit),
                    SettingsCommand::Start => {
                        if let Some(ticket) = self.machine.start_quiz() {
                            self.spawn_fetch(ticket);
                        }
                    }
                    SettingsCommand::None => {}
                }
            }
            Screen::Loading => {
                if self.status_screen.handle_loading_action(action) == StatusCommand::Cancel {
                    self.machine.cancel_loading();
                }
            }
            Screen::Error => {
                if self.status_screen.handle_error_action(action) == StatusCommand::Retry {
                    self.machine.retry();
                }
            }
            Screen::Question => {
                if let Some(session) = self.machine.session() {
                    match self.question_screen.handle_action(action, session) {
                        QuestionCommand::Select(answer) => self.machine.select_answer(&answer),
                        QuestionCommand::Next => self.machine.next(),
                        QuestionCommand::Previous => self.machine.previous(),
                        QuestionCommand::None => {}
                    }
                }
            }
            Screen::Results => {
                if self.results_screen.handle_action(action) == ResultsCommand::Retry {
                    self.machine.retry();
                }
            }
        }

        self.sync_screen();
    }

    fn sync_screen(&mut self) {
        if self.state_manager.sync(self.machine.phase()) {
            match self.state_manager.current_screen() {
                Screen::Question => self.question_screen = QuestionScreen::new(),
                Screen::Results => self.results_screen.reset(),
                _ => {}
            }
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        debug!(ticket = ticket.id, "spawning fetch");
        tokio::spawn(async move {
            let result = source.fetch_questions(&ticket.settings).await;
            if tx
                .send(FetchOutcome {
                    ticket: ticket.id,
                    result,
                })
                .await
                .is_err()
            {
                warn!(ticket = ticket.id, "fetch finished after shutdown");
            }
        });
    }

    /// Draw the current screen
    pub fn render(&mut self, f: &mut Frame) {
        match self.state_manager.current_screen() {
            Screen::Settings => self.settings_screen.render(f, self.machine.settings()),
            Screen::Loading => self.status_screen.render_loading(f),
            Screen::Error => {
                let message = self.machine.error_message().unwrap_or_default();
                self.status_screen.render_error(f, message);
            }
            Screen::Question => {
                if let Some(session) = self.machine.session() {
                    self.question_screen.render(f, session);
                }
            }
            Screen::Results => {
                if let Some(session) = self.machine.session() {
                    self.results_screen.render(f, session);
                }
            }
        }
    }
}

/// TUI application
pub struct App {
    tui: Tui,
    controller: Controller,
}

impl App {
    /// Create the application against the configured trivia endpoint
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = TriviaClient::from_config(config)?;
        info!(endpoint = client.endpoint(), "using trivia endpoint");
        Self::with_source(config, Arc::new(client))
    }

    /// Create the application with a custom question source
    pub fn with_source(config: &AppConfig, source: Arc<dyn QuestionSource>) -> Result<Self> {
        Ok(Self {
            tui: Tui::new()?,
            controller: Controller::new(config, source),
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()?;
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.controller.should_quit() {
            self.tui.draw(|f| self.controller.render(f))?;

            match self.tui.next_event()? {
                TuiEvent::Key(key) => {
                    let action = StateManager::key_to_navigation(key);
                    self.controller.handle_action(action);
                }
                TuiEvent::Tick => self.controller.on_tick(),
                TuiEvent::Idle => self.controller.poll_fetch(),
            }
            // Let the fetch task make progress on a current-thread runtime.
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }
}
