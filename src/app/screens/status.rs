//! Loading and error screens
//!
//! Loading shows a spinner while the fetch is in flight; nothing but cancel
//! and quit is accepted. The error screen shows the fetch failure and one
//! recovery action.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::state::NavigationAction;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// What the status screen asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCommand {
    None,
    /// Abandon the fetch in flight
    Cancel,
    /// Reset after an error
    Retry,
}

/// Loading / error screen component
#[derive(Debug, Default)]
pub struct StatusScreen {
    frame: usize,
}

impl StatusScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the spinner
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER.len();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.frame]
    }

    pub fn handle_loading_action(&self, action: NavigationAction) -> StatusCommand {
        match action {
            NavigationAction::Back => StatusCommand::Cancel,
            _ => StatusCommand::None,
        }
    }

    pub fn handle_error_action(&self, action: NavigationAction) -> StatusCommand {
        match action {
            NavigationAction::Select | NavigationAction::Back => StatusCommand::Retry,
            _ => StatusCommand::None,
        }
    }

    pub fn render_loading(&self, f: &mut Frame) {
        let text = vec![
            Line::from(Span::styled(
                self.spinner(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Loading questions...",
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled("Esc to cancel", Style::default().fg(Color::Yellow))),
        ];
        let area = centered_rect(50, text.len() as u16 + 2, f.size());
        let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(paragraph, area);
    }

    pub fn render_error(&self, f: &mut Frame, message: &str) {
        let text = vec![
            Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from(Span::styled(
                " Try Again ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Enter to retry, Q to quit", Style::default().fg(Color::Yellow))),
        ];
        let area = centered_rect(60, text.len() as u16 + 4, f.size());
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Error")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(paragraph, area);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
