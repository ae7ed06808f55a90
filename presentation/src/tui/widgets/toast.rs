//! Toast widget — transient notice in the bottom-right of the conversation

use docchat_domain::{Toast, ToastPhase};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    /// Box for the toast, anchored inside the bottom-right corner of `area`
    pub fn area(&self, area: Rect) -> Rect {
        let width = u16::try_from(self.toast.message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let height = 3.min(area.height);
        Rect {
            x: area.right().saturating_sub(width + 1).max(area.x),
            y: area.bottom().saturating_sub(height + 1).max(area.y),
            width,
            height,
        }
    }

    fn style(&self) -> Style {
        match self.toast.phase {
            ToastPhase::FadingIn | ToastPhase::FadingOut => Style::default().fg(Color::DarkGray),
            ToastPhase::Visible => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl<'a> Widget for ToastWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.style();
        Clear.render(area, buf);
        Paragraph::new(self.toast.message.as_str())
            .block(Block::default().borders(Borders::ALL).style(style))
            .style(style)
            .render(area, buf);
    }
}
