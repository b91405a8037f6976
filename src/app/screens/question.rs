//! Question screen implementation
//!
//! Shows the current question with its answers, the running score and the
//! Previous / Next controls. Answers are marked selected or not; correctness
//! is only revealed on the results screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::state::NavigationAction;
use crate::models::Question;
use crate::quiz::QuizSession;
use crate::util::text::sanitize;

/// Visual treatment of one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Plain,
    Selected,
    /// Reveal mode: the correct answer
    Correct,
    /// Reveal mode: a selected answer that is wrong
    Wrong,
}

impl AnswerMark {
    pub fn style(&self) -> Style {
        match self {
            AnswerMark::Plain => Style::default().fg(Color::White),
            AnswerMark::Selected => Style::default()
                .fg(Color::Black)
                .bg(Color::Indexed(147))
                .add_modifier(Modifier::BOLD),
            AnswerMark::Correct => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            AnswerMark::Wrong => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

/// How `answer` should be drawn given the user's selection.
pub fn answer_mark(
    question: &Question,
    answer: &str,
    selected: Option<&str>,
    reveal: bool,
) -> AnswerMark {
    let is_selected = selected == Some(answer);
    if !reveal {
        return if is_selected {
            AnswerMark::Selected
        } else {
            AnswerMark::Plain
        };
    }
    if question.is_correct(answer) {
        AnswerMark::Correct
    } else if is_selected {
        AnswerMark::Wrong
    } else {
        AnswerMark::Plain
    }
}

/// What the question screen asks the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionCommand {
    None,
    Select(String),
    Next,
    Previous,
}

/// Question screen component
#[derive(Debug, Default)]
pub struct QuestionScreen {
    /// Question index the cursor belongs to
    question_index: Option<usize>,
    list_state: ListState,
}

impl QuestionScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Put the cursor on the recorded answer when the question changes
    fn sync_cursor(&mut self, session: &QuizSession) {
        if self.question_index == Some(session.index()) {
            return;
        }
        let options = session.answer_options(session.index());
        let cursor = session
            .current_answer()
            .and_then(|a| options.iter().position(|o| o == a))
            .unwrap_or(0);
        self.list_state.select(Some(cursor));
        self.question_index = Some(session.index());
    }

    pub fn handle_action(
        &mut self,
        action: NavigationAction,
        session: &QuizSession,
    ) -> QuestionCommand {
        self.sync_cursor(session);
        let options = session.answer_options(session.index());
        let cursor = self.cursor();

        match action {
            NavigationAction::Up => {
                self.list_state.select(Some(cursor.saturating_sub(1)));
                QuestionCommand::None
            }
            NavigationAction::Down => {
                let last = options.len().saturating_sub(1);
                self.list_state.select(Some((cursor + 1).min(last)));
                QuestionCommand::None
            }
            NavigationAction::Select => match options.get(cursor) {
                Some(answer) => QuestionCommand::Select(answer.clone()),
                None => QuestionCommand::None,
            },
            NavigationAction::Right | NavigationAction::Next => QuestionCommand::Next,
            NavigationAction::Left | NavigationAction::Previous => QuestionCommand::Previous,
            NavigationAction::Digit(d) if d >= 1 && (d as usize) <= options.len() => {
                let idx = d as usize - 1;
                self.list_state.select(Some(idx));
                QuestionCommand::Select(options[idx].clone())
            }
            _ => QuestionCommand::None,
        }
    }

    /// Render the question screen
    pub fn render(&mut self, f: &mut Frame, session: &QuizSession) {
        self.sync_cursor(session);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Progress and score
                Constraint::Length(6), // Question text
                Constraint::Min(6),    // Answers
                Constraint::Length(3), // Previous / Next
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        self.render_header(f, chunks[0], session);
        self.render_question(f, chunks[1], session.current_question());
        self.render_answers(f, chunks[2], session);
        self.render_buttons(f, chunks[3], session);
        render_help(f, chunks[4]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect, session: &QuizSession) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let progress = Paragraph::new(progress_label(session))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(progress, halves[0]);

        let score = Paragraph::new(format!("Score: {}", session.score()))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(score, halves[1]);
    }

    fn render_question(&self, f: &mut Frame, area: Rect, question: &Question) {
        let text = vec![
            Line::from(Span::styled(
                sanitize(&question.category),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(Span::styled(
                sanitize(&question.question),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_answers(&mut self, f: &mut Frame, area: Rect, session: &QuizSession) {
        let question = session.current_question();
        let selected = session.current_answer();
        let items: Vec<ListItem> = session
            .answer_options(session.index())
            .iter()
            .enumerate()
            .map(|(i, answer)| {
                // Correctness stays hidden until the results review.
                let mark = answer_mark(question, answer, selected, false);
                ListItem::new(format!("{}. {}", i + 1, sanitize(answer))).style(mark.style())
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Answers"))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_buttons(&self, f: &mut Frame, area: Rect, session: &QuizSession) {
        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let previous_style = if session.is_first() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let previous = Paragraph::new("← Previous")
            .style(previous_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(previous_style));
        f.render_widget(previous, buttons[0]);

        let next = Paragraph::new(next_label(session))
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(next, buttons[1]);
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let help_text = Line::from(vec![
        Span::styled("↑↓", key),
        Span::raw(" Move  "),
        Span::styled("Enter/1-4", key),
        Span::raw(" Answer  "),
        Span::styled("←→", key),
        Span::raw(" Previous/Next  "),
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

/// "Question i of N"
pub fn progress_label(session: &QuizSession) -> String {
    format!("Question {} of {}", session.index() + 1, session.len())
}

/// Label of the forward button
pub fn next_label(session: &QuizSession) -> &'static str {
    if session.is_last() {
        "Finish Quiz"
    } else {
        "Next →"
    }
}
