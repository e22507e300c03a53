use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::Session;

const HORIZONTAL_MARGIN: u16 = 5;

/// Read-only view over the session: renders engine state, never mutates it.
impl Widget for &Session {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let exercise = &self.exercise;

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        if !exercise.has_finished() {
            let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
            let prompt_occupied_lines =
                ((exercise.target.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .horizontal_margin(HORIZONTAL_MARGIN)
                .constraints(
                    [
                        Constraint::Length(
                            (area.height.saturating_sub(prompt_occupied_lines + 2)) / 2,
                        ),
                        Constraint::Length(1),
                        Constraint::Length(prompt_occupied_lines),
                        Constraint::Length(1),
                    ]
                    .as_ref(),
                )
                .split(area);

            let stats_line = Line::from(vec![
                Span::styled(format!("correct {}", exercise.correct), green_bold_style),
                Span::raw("   "),
                Span::styled(
                    format!("incorrect {}", exercise.incorrect),
                    Style::default().patch(bold_style).fg(Color::Red),
                ),
                Span::raw("   "),
                Span::styled(format!("{}s", exercise.elapsed_secs), bold_style),
                Span::raw("   "),
                Span::styled(format!("{} cpm", exercise.speed()), bold_style),
            ]);
            Paragraph::new(stats_line)
                .alignment(Alignment::Center)
                .render(chunks[1], buf);

            let typed = exercise.typed_text();
            let untyped = exercise.untyped_text();
            let mut untyped_chars = untyped.chars();
            // Underline the next expected char as the caret
            let caret: String = untyped_chars.next().map(String::from).unwrap_or_default();
            let rest: String = untyped_chars.collect();

            let prompt_line = Line::from(vec![
                Span::styled(typed, green_bold_style),
                Span::styled(caret, underlined_dim_bold_style),
                Span::styled(rest, dim_bold_style),
            ]);
            Paragraph::new(prompt_line)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .render(chunks[2], buf);

            Paragraph::new(Span::styled("(esc) restart  (ctrl+c) quit", italic_style))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .horizontal_margin(HORIZONTAL_MARGIN)
                .constraints(
                    [
                        Constraint::Length(area.height.saturating_sub(8) / 2),
                        Constraint::Length(6),
                        Constraint::Length(1),
                    ]
                    .as_ref(),
                )
                .split(area);

            let summary = vec![
                Line::from(Span::styled("done!", green_bold_style)),
                Line::from(format!("words: {}", self.number_of_words())),
                Line::from(format!(
                    "correct: {}   incorrect: {}",
                    exercise.correct, exercise.incorrect
                )),
                Line::from(format!("time: {}s", exercise.elapsed_secs)),
                Line::from(Span::styled(
                    format!("{} cpm", exercise.speed()),
                    bold_style,
                )),
            ];
            Paragraph::new(summary)
                .alignment(Alignment::Center)
                .render(chunks[1], buf);

            Paragraph::new(Span::styled("(esc) restart  (ctrl+c) quit", italic_style))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }
    }
}
