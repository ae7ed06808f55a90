//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// (section, [(keys, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Normal",
        &[
            ("i", "Write a message"),
            ("Tab", "Show or hide conversations"),
            ("s", "Focus conversations"),
            ("n", "New conversation"),
            ("r", "Reload conversations"),
            ("/", "Search conversations"),
            ("j/k", "Select message"),
            ("Enter/o", "Show more / less"),
            ("y", "Copy message"),
            ("e", "Edit your message"),
            ("1-3", "Ask a suggested question"),
            ("q, Ctrl+C", "Quit"),
        ],
    ),
    (
        "Insert",
        &[
            ("Enter", "Send"),
            ("Alt+Enter", "New line"),
            ("Esc", "Back to Normal"),
        ],
    ),
    (
        "Conversations",
        &[
            ("j/k", "Select"),
            ("Enter", "Open"),
            ("d", "Delete"),
            ("Esc", "Back to Normal"),
        ],
    ),
];

/// Widget for rendering the help overlay
#[derive(Default)]
pub struct HelpWidget;

impl HelpWidget {
    pub fn new() -> Self {
        Self
    }

    fn build_help_text() -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut lines = Vec::new();

        for (section, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(*section, heading)));
            for (keys, description) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<10}"), Style::default().fg(Color::Yellow)),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().fg(Color::Cyan));

        Paragraph::new(Self::build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
