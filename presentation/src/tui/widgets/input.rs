//! Input widget — the message composer
//!
//! Multiline: text is split on `\n` and rendered as multiple `Line`s. The
//! prompt is shown only on the first line; continuation lines are indented.

use crate::tui::mode::InputMode;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PROMPT: &str = "> ";
const CONTINUATION: &str = "  ";
const PLACEHOLDER: &str = "Type your message… (i to start)";

pub struct InputWidget<'a> {
    state: &'a TuiState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = self.state.mode == InputMode::Insert;
        let color = if active { Color::Green } else { Color::DarkGray };
        let text = self.state.input.as_str();
        let cursor_pos = self.state.cursor_pos.min(text.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Message ")
            .style(Style::default().fg(color));

        let inner_height = area.height.saturating_sub(2) as usize;

        let lines = if active {
            build_active_lines(text, cursor_pos, color)
        } else if text.is_empty() {
            vec![Line::from(vec![
                prompt_span(PROMPT, color),
                Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])]
        } else {
            build_inactive_lines(text, color)
        };

        // Scroll so the cursor line is visible
        let cursor_line = find_cursor_line(text, cursor_pos);
        let scroll_offset = if lines.len() > inner_height && cursor_line >= inner_height {
            (cursor_line + 1).saturating_sub(inner_height)
        } else {
            0
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(scroll_offset).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}

fn prompt_span(prefix: &'static str, color: Color) -> Span<'static> {
    Span::styled(
        prefix,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Lines with a block cursor at `cursor_pos`
fn build_active_lines(text: &str, cursor_pos: usize, color: Color) -> Vec<Line<'static>> {
    let cursor_style = Style::default().fg(Color::Black).bg(color);
    let mut lines = Vec::new();
    let mut line_start = 0;

    for (i, line_text) in text.split('\n').enumerate() {
        let line_end = line_start + line_text.len();
        let prefix = if i == 0 { PROMPT } else { CONTINUATION };
        let mut spans = vec![prompt_span(prefix, color)];

        if (line_start..=line_end).contains(&cursor_pos) {
            let (before, after) = line_text.split_at(cursor_pos - line_start);
            spans.push(Span::raw(before.to_string()));

            let mut rest = after.chars();
            match rest.next() {
                Some(ch) => {
                    spans.push(Span::styled(ch.to_string(), cursor_style));
                    spans.push(Span::raw(rest.as_str().to_string()));
                }
                // Cursor at end of line: block cursor on a space
                None => spans.push(Span::styled(" ", cursor_style)),
            }
        } else {
            spans.push(Span::raw(line_text.to_string()));
        }

        lines.push(Line::from(spans));
        line_start = line_end + 1; // '\n'
    }

    lines
}

fn build_inactive_lines(text: &str, color: Color) -> Vec<Line<'static>> {
    text.split('\n')
        .enumerate()
        .map(|(i, line_text)| {
            let prefix = if i == 0 { PROMPT } else { CONTINUATION };
            Line::from(vec![
                prompt_span(prefix, color),
                Span::styled(line_text.to_string(), Style::default().fg(color)),
            ])
        })
        .collect()
}

/// Which line (0-indexed) the cursor is on
fn find_cursor_line(text: &str, cursor_pos: usize) -> usize {
    text[..cursor_pos.min(text.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count()
}
