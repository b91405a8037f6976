//! Results screen implementation
//!
//! Displays the final score as a fraction and percentage, the time taken,
//! and a scrollable review of every question with the user's answer coloured
//! by correctness.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::screens::question::answer_mark;
use crate::app::state::NavigationAction;
use crate::quiz::QuizSession;
use crate::util::format::{format_chrono_elapsed, score_line};
use crate::util::text::sanitize;

/// Placeholder for a question left unanswered
pub const NO_ANSWER: &str = "(no answer)";

/// What the results screen asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsCommand {
    None,
    Retry,
}

/// Results screen component
#[derive(Debug, Default)]
pub struct ResultsScreen {
    scroll: u16,
}

impl ResultsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Forget the scroll position of a previous quiz
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    pub fn handle_action(&mut self, action: NavigationAction) -> ResultsCommand {
        match action {
            NavigationAction::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                ResultsCommand::None
            }
            NavigationAction::Down => {
                self.scroll = self.scroll.saturating_add(1);
                ResultsCommand::None
            }
            NavigationAction::Select => ResultsCommand::Retry,
            _ => ResultsCommand::None,
        }
    }

    /// Render the results screen
    pub fn render(&mut self, f: &mut Frame, session: &QuizSession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(5), // Headline
                Constraint::Min(8),    // Review
                Constraint::Length(3), // Try Again
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        self.render_headline(f, chunks[0], session);

        let review = review_lines(session);
        // Keep the last wrapped row reachable but no further.
        let inner_width = chunks[1].width.saturating_sub(2) as usize;
        let rows: usize = review
            .iter()
            .map(|line| {
                let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                wrapped_rows(&text, inner_width)
            })
            .sum();
        let max_scroll = u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.min(max_scroll);
        let paragraph = Paragraph::new(review)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .title("Review")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(paragraph, chunks[1]);

        let button_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(24),
                Constraint::Min(0),
            ])
            .split(chunks[2])[1];
        let retry = Paragraph::new("⟳ Try Again")
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
        f.render_widget(retry, button_area);

        render_help(f, chunks[3]);
    }

    fn render_headline(&self, f: &mut Frame, area: Rect, session: &QuizSession) {
        let mut text = vec![
            Line::from(Span::styled(
                "Quiz Complete!",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(score_line(session.score(), session.len())),
        ];
        if let Some(elapsed) = session.elapsed() {
            text.push(Line::from(Span::styled(
                format!("Time taken: {}", format_chrono_elapsed(elapsed)),
                Style::default().fg(Color::Gray),
            )));
        }

        let headline = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(headline, area);
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let help_text = Line::from(vec![
        Span::styled("↑↓", key),
        Span::raw(" Scroll  "),
        Span::styled("Enter", key),
        Span::raw(" Try Again  "),
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

/// Rows `text` takes when word-wrapped to `width` columns
fn wrapped_rows(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut rows = 1;
    let mut col = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        let needed = if col == 0 { len } else { col + 1 + len };
        if needed <= width {
            col = needed;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        // Words longer than a row are broken across rows.
        let extra = len.saturating_sub(1) / width;
        rows += extra;
        col = len - extra * width;
    }
    rows
}

/// Per-question review, three or four lines per question
pub fn review_lines(session: &QuizSession) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let mut lines = Vec::new();

    for (i, (question, answer)) in session
        .questions()
        .iter()
        .zip(session.answers())
        .enumerate()
    {
        lines.push(Line::from(Span::styled(
            format!("{}. {}", i + 1, sanitize(&question.question)),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));

        let answer = answer.as_deref();
        let your_answer = match answer {
            Some(a) => Span::styled(
                sanitize(a),
                answer_mark(question, a, answer, true).style(),
            ),
            None => Span::styled(NO_ANSWER, Style::default().fg(Color::Red)),
        };
        lines.push(Line::from(vec![
            Span::styled("   Your answer: ", label),
            your_answer,
        ]));

        if !answer.is_some_and(|a| question.is_correct(a)) {
            lines.push(Line::from(vec![
                Span::styled("   Correct answer: ", label),
                Span::styled(
                    sanitize(&question.correct_answer),
                    Style::default().fg(Color::Green),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnswerOrder;
    use crate::models::question::fixtures::three_questions;
    use ratatui::{backend::TestBackend, Terminal};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn finished_session() -> QuizSession {
        let mut s = QuizSession::new(three_questions(), AnswerOrder::Sorted).unwrap();
        s.select("Paris");
        s.advance();
        s.select("5");
        s.advance();
        s.advance();
        s
    }

    #[test]
    fn test_review_lines() {
        let s = finished_session();
        let lines: Vec<String> = review_lines(&s).iter().map(line_text).collect();

        assert_eq!(lines[0], "1. Capital of France?");
        assert_eq!(lines[1], "   Your answer: Paris");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "2. 2 + 2?");
        assert_eq!(lines[4], "   Your answer: 5");
        assert_eq!(lines[5], "   Correct answer: 4");
        assert_eq!(lines[8], format!("   Your answer: {}", NO_ANSWER));
        assert_eq!(lines[9], "   Correct answer: Jupiter");
    }

    #[test]
    fn test_review_colours() {
        let s = finished_session();
        let lines = review_lines(&s);
        assert_eq!(lines[1].spans[1].style.fg, Some(Color::Green));
        assert_eq!(lines[4].spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_actions() {
        let mut screen = ResultsScreen::new();
        screen.handle_action(NavigationAction::Up);
        assert_eq!(screen.scroll(), 0);
        screen.handle_action(NavigationAction::Down);
        assert_eq!(screen.scroll(), 1);
        assert_eq!(
            screen.handle_action(NavigationAction::Select),
            ResultsCommand::Retry
        );
        screen.reset();
        assert_eq!(screen.scroll(), 0);
    }

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows("", 10), 1);
        assert_eq!(wrapped_rows("short", 10), 1);
        assert_eq!(wrapped_rows("one two three", 7), 2);
        assert_eq!(wrapped_rows("aaaa bbbb cccc", 4), 3);
        assert_eq!(wrapped_rows("abcdefghij", 4), 3);
    }

    #[test]
    fn test_scroll_reaches_wrapped_rows() {
        use crate::models::question::fixtures::question;

        let long = "Which of these rivers flows through more countries than any other river in the world today?";
        let questions = (0..3)
            .map(|_| question(long, "Danube", &["Nile", "Amazon", "Rhine"]))
            .collect();
        let mut s = QuizSession::new(questions, AnswerOrder::Sorted).unwrap();
        for _ in 0..3 {
            s.advance();
        }

        let mut screen = ResultsScreen::new();
        for _ in 0..200 {
            screen.handle_action(NavigationAction::Down);
        }
        let mut terminal = Terminal::new(TestBackend::new(30, 30)).unwrap();
        terminal.draw(|f| screen.render(f, &s)).unwrap();

        let unwrapped = review_lines(&s).len() as u16;
        assert!(screen.scroll() > unwrapped - 1);
        assert!(screen.scroll() < 200);
    }

    #[test]
    fn test_render_headline() {
        let s = finished_session();
        let mut screen = ResultsScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| screen.render(f, &s)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Quiz Complete!"));
        assert!(content.contains("You scored 1 out of 3 (33.3%)"));
    }
}
