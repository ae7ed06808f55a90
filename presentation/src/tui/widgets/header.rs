//! Header widget — sidebar toggle, session title and activity

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const TOGGLE_LABEL: &str = "[≡]";

pub struct HeaderWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    /// Clickable cell range of the sidebar toggle inside a header `area`
    pub fn toggle_area(area: Rect) -> Rect {
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: u16::try_from(TOGGLE_LABEL.chars().count())
                .unwrap_or(u16::MAX)
                .min(area.width.saturating_sub(2)),
            height: area.height.saturating_sub(2).min(1),
        }
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = &self.state.view;

        let toggle_style = if view.sidebar_open() {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let status = if view.is_pending() {
            Span::styled("thinking…", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("Ready", Style::default().fg(Color::Green))
        };

        let line = Line::from(vec![
            Span::styled(TOGGLE_LABEL, toggle_style),
            Span::raw(" "),
            Span::styled(
                view.title().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            status,
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" docchat ")
            .style(Style::default().fg(Color::White));

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn test_header_shows_title() {
        let state = TuiState::new();
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        HeaderWidget::new(&state).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("docchat"));
        assert!(text.contains("New Conversation"));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_toggle_area_inside_border() {
        let toggle = HeaderWidget::toggle_area(Rect::new(0, 0, 60, 3));
        assert_eq!(toggle, Rect::new(1, 1, 3, 1));
    }
}
