//! Sidebar widget — session search box and session list

use crate::tui::mode::InputMode;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct SidebarWidget<'a> {
    state: &'a TuiState,
    overlay: bool,
}

impl<'a> SidebarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self {
            state,
            overlay: false,
        }
    }

    /// Clear what is underneath before drawing
    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    fn search_line(&self) -> Line<'a> {
        let searching = self.state.mode == InputMode::Search;
        let color = if searching { Color::Yellow } else { Color::DarkGray };
        let mut spans = vec![Span::styled("/ ", Style::default().fg(color))];

        let query = &self.state.search_input;
        if searching {
            let cursor = self.state.search_cursor.min(query.len());
            let (before, after) = query.split_at(cursor);
            spans.push(Span::raw(before.to_string()));
            let mut rest = after.chars();
            let under = rest.next().map(String::from).unwrap_or_else(|| " ".into());
            spans.push(Span::styled(
                under,
                Style::default().fg(Color::Black).bg(color),
            ));
            spans.push(Span::raw(rest.as_str().to_string()));
        } else if query.is_empty() {
            spans.push(Span::styled(
                "search conversations",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::raw(query.clone()));
        }

        Line::from(spans)
    }

    fn session_lines(&self) -> Vec<Line<'a>> {
        let view = &self.state.view;
        if let Some(placeholder) = view.no_results_placeholder() {
            return vec![Line::from(Span::styled(
                placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))];
        }

        let focused = self.state.mode == InputMode::Sidebar;
        view.visible_sessions()
            .into_iter()
            .enumerate()
            .map(|(i, session)| {
                let active = view.is_active(&session.id);
                let marker = if active { "● " } else { "  " };
                let mut style = if active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                if focused && i == self.state.selected_session {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(Span::styled(format!("{}{}", marker, session.title), style))
            })
            .collect()
    }
}

impl<'a> Widget for SidebarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.overlay {
            Clear.render(area, buf);
        }

        let border_color = match self.state.mode {
            InputMode::Sidebar | InputMode::Search => self.state.mode.color(),
            _ => Color::DarkGray,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Conversations ")
            .style(Style::default().fg(border_color));

        let mut lines = vec![self.search_line(), Line::from("")];
        lines.extend(self.session_lines());

        // Keep the selected row visible: search box and spacer sit above the list
        let visible = area.height.saturating_sub(2) as usize;
        let selected_row = self.state.selected_session + 2;
        let scroll = (selected_row + 1).saturating_sub(visible);

        Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}
