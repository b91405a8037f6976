//! Application state management
//!
//! Maps the quiz phase onto the screen being shown, tracks screen changes
//! and the quit flag, and turns keyboard events into navigation actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::quiz::Phase;

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Quiz settings form
    #[default]
    Settings,
    /// Busy indicator while questions are fetched
    Loading,
    /// One question at a time
    Question,
    /// Score and per-question review
    Results,
    /// Fetch failure with a retry action
    Error,
}

impl Screen {
    /// Screen that renders the given quiz phase
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::NotStarted => Screen::Settings,
            Phase::Loading => Screen::Loading,
            Phase::Active => Screen::Question,
            Phase::Complete => Screen::Results,
            Phase::Error => Screen::Error,
        }
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab, n)
    Next,
    /// Previous item (Shift+Tab, p)
    Previous,
    /// Digit typed
    Digit(u8),
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Screen tracker
#[derive(Debug)]
pub struct StateManager {
    current: Screen,
    previous: Option<Screen>,
    should_quit: bool,
}

impl StateManager {
    pub fn new() -> Self {
        Self {
            current: Screen::Settings,
            previous: None,
            should_quit: false,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.current
    }

    pub fn previous_screen(&self) -> Option<Screen> {
        self.previous
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Follow the quiz phase; returns true when the screen changed
    pub fn sync(&mut self, phase: Phase) -> bool {
        let next = Screen::for_phase(phase);
        if next == self.current {
            return false;
        }
        debug!(from = ?self.current, to = ?next, "screen change");
        self.previous = Some(self.current);
        self.current = next;
        true
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Question paging
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                NavigationAction::Previous
            }
            KeyCode::Tab | KeyCode::Char('n') => NavigationAction::Next,
            KeyCode::BackTab | KeyCode::Char('p') => NavigationAction::Previous,

            KeyCode::Char(c) if c.is_ascii_digit() => NavigationAction::Digit(c as u8 - b'0'),

            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
