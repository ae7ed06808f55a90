//! Follow-up suggestion chips, picked with the digit keys

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct FollowUpsWidget<'a> {
    state: &'a TuiState,
}

impl<'a> FollowUpsWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for FollowUpsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .state
            .view
            .follow_ups()
            .iter()
            .enumerate()
            .map(|(i, question)| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Magenta)),
                    Span::raw(question.as_str()),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Suggestions ")
            .style(Style::default().fg(Color::DarkGray));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
