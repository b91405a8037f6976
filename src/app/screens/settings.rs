//! Settings screen implementation
//!
//! One row per quiz setting followed by the Start Quiz button. Left/Right
//! cycle a value, digits type the question count, Backspace removes a typed
//! digit. Enter starts the quiz from any row, the way a form submits.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::state::NavigationAction;
use crate::models::{Difficulty, QuestionType, QuizSettings, SettingsEdit, CATEGORIES};
use crate::MAX_QUESTIONS;

/// A single editable row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Amount,
    Category,
    Difficulty,
    Type,
}

impl SettingsField {
    pub const ALL: [SettingsField; 4] = [
        SettingsField::Amount,
        SettingsField::Category,
        SettingsField::Difficulty,
        SettingsField::Type,
    ];

    fn title(&self) -> &'static str {
        match self {
            Self::Amount => "Number of Questions",
            Self::Category => "Category",
            Self::Difficulty => "Difficulty",
            Self::Type => "Type",
        }
    }
}

/// What the settings screen asks the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    None,
    Edit(SettingsEdit),
    Start,
}

/// Row index of the Start Quiz button, after the last field
const START_ROW: usize = SettingsField::ALL.len();

/// Settings screen component
#[derive(Debug, Default)]
pub struct SettingsScreen {
    selected: usize,
    /// Digits typed into the amount row since it was focused
    amount_input: String,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused field, or `None` while the Start Quiz button has focus
    pub fn selected_field(&self) -> Option<SettingsField> {
        SettingsField::ALL.get(self.selected).copied()
    }

    pub fn on_start_button(&self) -> bool {
        self.selected == START_ROW
    }

    /// Translate a key action into a command against `settings`
    pub fn handle_action(
        &mut self,
        action: NavigationAction,
        settings: &QuizSettings,
    ) -> SettingsCommand {
        if !matches!(action, NavigationAction::Digit(_) | NavigationAction::Back) {
            self.amount_input.clear();
        }

        match action {
            NavigationAction::Up | NavigationAction::Previous => {
                self.selected = self.selected.saturating_sub(1);
                SettingsCommand::None
            }
            NavigationAction::Down | NavigationAction::Next => {
                self.selected = (self.selected + 1).min(START_ROW);
                SettingsCommand::None
            }
            NavigationAction::Left => self.step(settings, false),
            NavigationAction::Right => self.step(settings, true),
            NavigationAction::Digit(d) if self.selected_field() == Some(SettingsField::Amount) => {
                self.type_digit(d)
            }
            NavigationAction::Back => self.erase_digit(),
            NavigationAction::Select => SettingsCommand::Start,
            _ => SettingsCommand::None,
        }
    }

    fn type_digit(&mut self, digit: u8) -> SettingsCommand {
        if self.amount_input.len() >= 2 {
            self.amount_input.clear();
        }
        self.amount_input.push(char::from(b'0' + digit));
        let typed: u8 = self.amount_input.parse().unwrap_or(1);
        SettingsCommand::Edit(SettingsEdit::amount(clamp_amount(typed as i16)))
    }

    /// Drop the last typed digit; the amount keeps its value once the
    /// buffer is empty.
    fn erase_digit(&mut self) -> SettingsCommand {
        if self.amount_input.pop().is_none() {
            return SettingsCommand::None;
        }
        match self.amount_input.parse::<u8>() {
            Ok(typed) => SettingsCommand::Edit(SettingsEdit::amount(clamp_amount(typed as i16))),
            Err(_) => SettingsCommand::None,
        }
    }

    fn step(&self, settings: &QuizSettings, forward: bool) -> SettingsCommand {
        let Some(field) = self.selected_field() else {
            return SettingsCommand::None;
        };
        let edit = match field {
            SettingsField::Amount => {
                let delta = if forward { 1 } else { -1 };
                SettingsEdit::amount(clamp_amount(settings.amount as i16 + delta))
            }
            SettingsField::Category => {
                let ids: Vec<&str> = CATEGORIES.iter().map(|c| c.id).collect();
                SettingsEdit::category(cycle(&ids, &settings.category.as_str(), forward))
            }
            SettingsField::Difficulty => SettingsEdit::difficulty(cycle(
                &Difficulty::ALL,
                &settings.difficulty,
                forward,
            )),
            SettingsField::Type => SettingsEdit::question_type(cycle(
                &QuestionType::ALL,
                &settings.question_type,
                forward,
            )),
        };
        SettingsCommand::Edit(edit)
    }

    /// Render the settings screen
    pub fn render(&self, f: &mut Frame, settings: &QuizSettings) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(15),   // Fields and Start Quiz
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        let title = Paragraph::new("Quiz Settings")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, chunks[0]);

        self.render_fields(f, chunks[1], settings);
        render_help(f, chunks[2]);
    }

    fn render_fields(&self, f: &mut Frame, area: Rect, settings: &QuizSettings) {
        let constraints: Vec<Constraint> = (0..=START_ROW).map(|_| Constraint::Length(3)).collect();
        let field_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, field) in SettingsField::ALL.iter().enumerate() {
            let focused = i == self.selected;
            let border_style = if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let value_style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            let line = Line::from(vec![
                Span::raw(if focused { "◀ " } else { "  " }),
                Span::styled(field_value(field, settings), value_style),
                Span::raw(if focused { " ▶" } else { "" }),
            ]);
            let p = Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(field.title()),
            );
            f.render_widget(p, field_chunks[i]);
        }

        let button_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(20),
                Constraint::Min(0),
            ])
            .split(field_chunks[START_ROW])[1];
        let button_style = if self.on_start_button() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let start = Paragraph::new("Start Quiz")
            .style(button_style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(start, button_area);
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let help_text = Line::from(vec![
        Span::styled("↑↓", key),
        Span::raw(" Field  "),
        Span::styled("←→", key),
        Span::raw(" Change  "),
        Span::styled("0-9", key),
        Span::raw(" Amount  "),
        Span::styled("⌫", key),
        Span::raw(" Erase  "),
        Span::styled("Enter", key),
        Span::raw(" Start Quiz  "),
        Span::styled("Q", key),
        Span::raw(" Quit"),
    ]);

    let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(help, area);
}

/// Display text of a field's current value
pub fn field_value(field: &SettingsField, settings: &QuizSettings) -> String {
    match field {
        SettingsField::Amount => settings.amount.to_string(),
        SettingsField::Category => settings.category_name().to_string(),
        SettingsField::Difficulty => settings.difficulty.label().to_string(),
        SettingsField::Type => settings.question_type.label().to_string(),
    }
}

fn clamp_amount(value: i16) -> u8 {
    value.clamp(1, MAX_QUESTIONS as i16) as u8
}

/// Neighbour of `current` in `options`, wrapping at both ends. A value not in
/// the list moves to the first option.
fn cycle<T: PartialEq + Clone>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let next = match options.iter().position(|o| o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    options[next].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(screen: &mut SettingsScreen, settings: &mut QuizSettings, action: NavigationAction) {
        if let SettingsCommand::Edit(edit) = screen.handle_action(action, settings) {
            *settings = settings.apply(edit);
        }
    }

    #[test]
    fn test_field_navigation_is_clamped() {
        let mut screen = SettingsScreen::new();
        let settings = QuizSettings::default();
        screen.handle_action(NavigationAction::Up, &settings);
        assert_eq!(screen.selected_field(), Some(SettingsField::Amount));
        for _ in 0..10 {
            screen.handle_action(NavigationAction::Down, &settings);
        }
        assert!(screen.on_start_button());
        assert_eq!(screen.selected_field(), None);
        screen.handle_action(NavigationAction::Up, &settings);
        assert_eq!(screen.selected_field(), Some(SettingsField::Type));
    }

    #[test]
    fn test_amount_bounds() {
        let mut screen = SettingsScreen::new();
        let mut settings = QuizSettings::default().apply(SettingsEdit::amount(1));
        apply(&mut screen, &mut settings, NavigationAction::Left);
        assert_eq!(settings.amount, 1);

        settings = settings.apply(SettingsEdit::amount(50));
        apply(&mut screen, &mut settings, NavigationAction::Right);
        assert_eq!(settings.amount, 50);
    }

    #[test]
    fn test_typing_amount() {
        let mut screen = SettingsScreen::new();
        let mut settings = QuizSettings::default();
        apply(&mut screen, &mut settings, NavigationAction::Digit(2));
        assert_eq!(settings.amount, 2);
        apply(&mut screen, &mut settings, NavigationAction::Digit(5));
        assert_eq!(settings.amount, 25);
        apply(&mut screen, &mut settings, NavigationAction::Digit(7));
        assert_eq!(settings.amount, 7);
        apply(&mut screen, &mut settings, NavigationAction::Digit(9));
        assert_eq!(settings.amount, 50);
        apply(&mut screen, &mut settings, NavigationAction::Right);
        apply(&mut screen, &mut settings, NavigationAction::Digit(0));
        assert_eq!(settings.amount, 1);
    }

    #[test]
    fn test_cycling_category_and_difficulty() {
        let mut screen = SettingsScreen::new();
        let mut settings = QuizSettings::default();

        screen.handle_action(NavigationAction::Down, &settings);
        apply(&mut screen, &mut settings, NavigationAction::Right);
        assert_eq!(settings.category, "17");
        apply(&mut screen, &mut settings, NavigationAction::Left);
        apply(&mut screen, &mut settings, NavigationAction::Left);
        assert_eq!(settings.category, "23");

        screen.handle_action(NavigationAction::Down, &settings);
        apply(&mut screen, &mut settings, NavigationAction::Right);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        apply(&mut screen, &mut settings, NavigationAction::Right);
        assert_eq!(settings.difficulty, Difficulty::Easy);

        screen.handle_action(NavigationAction::Down, &settings);
        apply(&mut screen, &mut settings, NavigationAction::Right);
        assert_eq!(settings.question_type, QuestionType::Boolean);
    }

    #[test]
    fn test_digits_ignored_off_amount_row() {
        let mut screen = SettingsScreen::new();
        let settings = QuizSettings::default();
        screen.handle_action(NavigationAction::Down, &settings);
        assert_eq!(
            screen.handle_action(NavigationAction::Digit(3), &settings),
            SettingsCommand::None
        );
    }

    #[test]
    fn test_backspace_erases_typed_digit() {
        let mut screen = SettingsScreen::new();
        let mut settings = QuizSettings::default();
        apply(&mut screen, &mut settings, NavigationAction::Digit(2));
        apply(&mut screen, &mut settings, NavigationAction::Digit(5));
        assert_eq!(settings.amount, 25);

        apply(&mut screen, &mut settings, NavigationAction::Back);
        assert_eq!(settings.amount, 2);
        assert_eq!(
            screen.handle_action(NavigationAction::Back, &settings),
            SettingsCommand::None
        );
        assert_eq!(
            screen.handle_action(NavigationAction::Back, &settings),
            SettingsCommand::None
        );
        apply(&mut screen, &mut settings, NavigationAction::Digit(8));
        assert_eq!(settings.amount, 8);
    }

    #[test]
    fn test_start_from_any_row() {
        let mut screen = SettingsScreen::new();
        let settings = QuizSettings::default();
        assert_eq!(
            screen.handle_action(NavigationAction::Select, &settings),
            SettingsCommand::Start
        );
        for _ in 0..SettingsField::ALL.len() {
            screen.handle_action(NavigationAction::Down, &settings);
        }
        assert!(screen.on_start_button());
        assert_eq!(
            screen.handle_action(NavigationAction::Right, &settings),
            SettingsCommand::None
        );
        assert_eq!(
            screen.handle_action(NavigationAction::Digit(4), &settings),
            SettingsCommand::None
        );
        assert_eq!(
            screen.handle_action(NavigationAction::Select, &settings),
            SettingsCommand::Start
        );
    }

    #[test]
    fn test_render_rows_and_button() {
        use ratatui::{backend::TestBackend, Terminal};

        let screen = SettingsScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| screen.render(f, &QuizSettings::default()))
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Number of Questions"));
        assert!(content.contains("General Knowledge"));
        assert!(content.contains("Start Quiz"));
    }

    #[test]
    fn test_field_values() {
        let settings = QuizSettings::default();
        assert_eq!(field_value(&SettingsField::Difficulty, &settings), "Medium");
        assert_eq!(
            field_value(&SettingsField::Category, &settings),
            "General Knowledge"
        );
        assert_eq!(field_value(&SettingsField::Type, &settings), "Multiple Choice");
    }
}
