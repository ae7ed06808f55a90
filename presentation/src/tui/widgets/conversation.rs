//! Conversation widget — chat bubbles, collapsed previews and the loading dots

use crate::tui::state::TuiState;
use docchat_domain::{MessageView, Role, Segment, format_segments, util::preview_chars};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Characters of a collapsed reply shown before "Show more"
pub const COLLAPSED_PREVIEW_CHARS: usize = 300;

const DOT_FRAMES: [&str; 3] = ["●○○", "○●○", "○○●"];

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    }
}

fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Cyan,
        Role::Assistant => Color::Green,
    }
}

pub struct ConversationWidget<'a> {
    state: &'a TuiState,
}

impl<'a> ConversationWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    /// Lines for every bubble, plus the first line index of each bubble
    fn format_messages(&self) -> (Vec<Line<'static>>, Vec<usize>) {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut starts = Vec::new();

        for (i, msg) in self.state.view.messages().iter().enumerate() {
            starts.push(lines.len());
            let selected = self.state.selected_message == Some(i);
            push_bubble(&mut lines, msg, selected);
        }

        if self.state.view.is_pending() {
            let frame = DOT_FRAMES[(self.state.tick % DOT_FRAMES.len() as u64) as usize];
            lines.push(Line::from(Span::styled(
                role_label(Role::Assistant),
                Style::default()
                    .fg(role_color(Role::Assistant))
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {frame}"),
                Style::default().fg(Color::DarkGray),
            )));
        }

        (lines, starts)
    }
}

fn push_bubble(lines: &mut Vec<Line<'static>>, msg: &MessageView, selected: bool) {
    let color = role_color(msg.role);
    let mut header_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if selected {
        header_style = header_style.add_modifier(Modifier::REVERSED);
    }
    let marker = if selected { "▌" } else { " " };
    lines.push(Line::from(vec![
        Span::styled(marker, Style::default().fg(color)),
        Span::styled(role_label(msg.role), header_style),
        Span::styled(
            format!("  {}", msg.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let collapsed_segments;
    let segments = if msg.is_collapsed() {
        collapsed_segments = format_segments(&preview_chars(&msg.content, COLLAPSED_PREVIEW_CHARS));
        &collapsed_segments
    } else {
        &msg.segments
    };
    push_segments(lines, segments);

    if let Some(label) = msg.toggle_label() {
        lines.push(Line::from(Span::styled(
            format!("  [{label}]"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::from(""));
}

fn push_segments(lines: &mut Vec<Line<'static>>, segments: &[Segment]) {
    let code_style = Style::default().fg(Color::Yellow);
    let mut current: Vec<Span<'static>> = vec![Span::raw("  ")];

    for segment in segments {
        match segment {
            Segment::Text(text) => current.push(Span::raw(text.clone())),
            Segment::LineBreak => {
                lines.push(Line::from(std::mem::replace(
                    &mut current,
                    vec![Span::raw("  ")],
                )));
            }
            Segment::Code(code) => {
                if current.len() > 1 {
                    lines.push(Line::from(std::mem::replace(
                        &mut current,
                        vec![Span::raw("  ")],
                    )));
                }
                for code_line in code.trim_matches('\n').split('\n') {
                    lines.push(Line::from(vec![
                        Span::styled("  │ ", Style::default().fg(Color::DarkGray)),
                        Span::styled(code_line.to_string(), code_style),
                    ]));
                }
            }
        }
    }

    if current.len() > 1 {
        lines.push(Line::from(current));
    }
}

impl<'a> Widget for ConversationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (lines, starts) = self.format_messages();
        let visible_height = area.height.saturating_sub(2); // borders
        let content_width = area.width.saturating_sub(2); // borders

        // Wrapped line counts must match what Paragraph renders
        let selected_start = self
            .state
            .selected_message
            .and_then(|i| starts.get(i).copied())
            .map(|start| {
                let count = Paragraph::new(Text::from(lines[..start].to_vec()))
                    .wrap(Wrap { trim: false })
                    .line_count(content_width);
                u16::try_from(count).unwrap_or(u16::MAX)
            });

        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
        let total_lines =
            u16::try_from(paragraph.line_count(content_width)).unwrap_or(u16::MAX);
        let max_scroll = total_lines.saturating_sub(visible_height);

        // No selection follows the tail; a selection scrolls to its header
        let scroll = match selected_start {
            Some(start) => start.min(max_scroll),
            None => max_scroll,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Conversation ")
            .style(Style::default().fg(Color::White));

        paragraph.block(block).scroll((scroll, 0)).render(area, buf);
    }
}
