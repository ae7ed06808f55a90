//! TUI widgets — ratatui components for the main layout
//!
//! Wide terminal:
//! ┌── Header (3) ─────────────────────────────────────┐
//! ├── Sidebar (32) ──┬── Conversation (flex) ─────────┤
//! │                  ├── Follow-ups (chips + 2) ──────┤
//! ├── Input (3..) ───┴────────────────────────────────┤
//! └── StatusBar (1) ──────────────────────────────────┘
//!
//! Below the narrow width the sidebar is drawn over the conversation.

pub mod conversation;
pub mod follow_ups;
pub mod header;
pub mod help;
pub mod input;
pub mod modal;
pub mod sidebar;
pub mod status_bar;
pub mod toast;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Docked sidebar width, in columns
pub const SIDEBAR_WIDTH: u16 = 32;

/// Minimum overlay sidebar width on narrow terminals
const MIN_OVERLAY_WIDTH: u16 = 24;

/// Layout inputs that do not come from the terminal size
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    pub input_lines: u16,
    pub max_input_lines: u16,
    pub sidebar_open: bool,
    pub narrow_width: u16,
    pub follow_up_count: u16,
}

/// Compute the main layout regions from a terminal area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub header: Rect,
    pub sidebar: Option<Rect>,
    pub conversation: Rect,
    pub follow_ups: Option<Rect>,
    pub input: Rect,
    pub status_bar: Rect,
    /// Sidebar covers part of the conversation instead of sitting beside it
    pub sidebar_overlays: bool,
}

impl MainLayout {
    pub fn compute(area: Rect, params: LayoutParams) -> Self {
        let header_h: u16 = 3;
        let status_h: u16 = 1;

        let max_for_input = area.height.saturating_sub(header_h + status_h);
        let desired_h = (params.input_lines + 2).clamp(3, params.max_input_lines + 2);
        let input_h = desired_h.min(max_for_input).max(1);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_h),
                Constraint::Fill(1),
                Constraint::Length(input_h),
                Constraint::Length(status_h),
            ])
            .split(area);
        let (header, main_area, input, status_bar) =
            (vertical[0], vertical[1], vertical[2], vertical[3]);

        let narrow = area.width < params.narrow_width;
        let (sidebar, chat_area) = match (params.sidebar_open, narrow) {
            (false, _) => (None, main_area),
            (true, true) => {
                let width = (main_area.width * 3 / 4)
                    .max(MIN_OVERLAY_WIDTH)
                    .min(main_area.width);
                let overlay = Rect { width, ..main_area };
                (Some(overlay), main_area)
            }
            (true, false) => {
                let horizontal = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                    .split(main_area);
                (Some(horizontal[0]), horizontal[1])
            }
        };

        let (conversation, follow_ups) = if params.follow_up_count > 0 {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(params.follow_up_count + 2),
                ])
                .split(chat_area);
            (split[0], Some(split[1]))
        } else {
            (chat_area, None)
        };

        Self {
            header,
            sidebar,
            conversation,
            follow_ups,
            input,
            status_bar,
            sidebar_overlays: params.sidebar_open && narrow,
        }
    }

    /// Centered overlay rectangle for help and modal dialogs
    pub fn centered_overlay(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vert[1])[1]
    }
}

/// Buffer contents as text, one line per row
#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
