//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! and application state handling.

pub mod app;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::{App, Controller};
pub use screens::{QuestionScreen, ResultsScreen, SettingsScreen, StatusScreen};
pub use state::{NavigationAction, Screen, StateManager};
pub use tui::{restore_terminal, Tui};
