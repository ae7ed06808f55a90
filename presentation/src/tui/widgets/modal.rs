//! Modal dialogs: delete confirmation and blocking alerts

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub struct ModalWidget<'a> {
    title: &'a str,
    body: &'a str,
    hint: &'a str,
    color: Color,
}

impl<'a> ModalWidget<'a> {
    /// Yes/no question
    pub fn confirm(body: &'a str) -> Self {
        Self {
            title: " Confirm ",
            body,
            hint: "y/Enter: yes  n/Esc: no",
            color: Color::Yellow,
        }
    }

    /// Message that only needs acknowledging
    pub fn alert(body: &'a str) -> Self {
        Self {
            title: " Error ",
            body,
            hint: "Enter/Esc: dismiss",
            color: Color::Red,
        }
    }
}

impl<'a> Widget for ModalWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                self.body,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(self.hint, Style::default().fg(Color::DarkGray))),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .style(Style::default().fg(self.color));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
