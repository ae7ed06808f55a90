//! Console output formatter for replies and session lists

use crate::cli::commands::OutputFormat;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use docchat_application::ChatReply;
use docchat_domain::{MarkupMode, Segment, Session, escape_html, format_segments, to_html};
use serde_json::json;

/// Formats one-shot results for the terminal
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormatter {
    format: OutputFormat,
    markup: MarkupMode,
}

impl ConsoleFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            markup: MarkupMode::default(),
        }
    }

    /// Markup handling for `--output html`
    pub fn with_markup(mut self, markup: MarkupMode) -> Self {
        self.markup = markup;
        self
    }

    /// Reply as coloured text, code blocks set off with a gutter
    pub fn format_text(content: &str) -> String {
        let mut output = format!("{}\n", "Assistant:".green().bold());
        let mut line = String::new();
        let mut after_code = false;

        for segment in format_segments(content) {
            let is_code = matches!(segment, Segment::Code(_));
            match segment {
                Segment::Text(text) => line.push_str(&text),
                // The gutter already ended the line
                Segment::LineBreak if after_code && line.is_empty() => {}
                Segment::LineBreak => {
                    output.push_str(&line);
                    output.push('\n');
                    line.clear();
                }
                Segment::Code(code) => {
                    if !line.is_empty() {
                        output.push_str(&line);
                        output.push('\n');
                        line.clear();
                    }
                    for code_line in code.trim_matches('\n').lines() {
                        output.push_str(&format!("{} {}\n", "│".dimmed(), code_line.yellow()));
                    }
                }
            }
            after_code = is_code;
        }
        if !line.is_empty() {
            output.push_str(&line);
            output.push('\n');
        }

        output
    }

    /// Reply as bubble markup
    pub fn format_html(content: &str, markup: MarkupMode) -> String {
        format!(
            "<div class=\"message assistant-message\">{}</div>\n",
            to_html(content, markup)
        )
    }

    /// Format as JSON
    pub fn format_json(reply: &ChatReply) -> String {
        let value = json!({
            "response": reply.response,
            "documents": reply.documents,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_sessions_text(sessions: &[Session]) -> String {
        if sessions.is_empty() {
            return format!("{}\n", "No conversations yet".dimmed());
        }

        let mut output = format!("{}\n", "Conversations".cyan().bold());
        for session in sessions {
            output.push_str(&format!(
                "  {} {}\n",
                session.title,
                format!("({})", session.id.as_str()).dimmed()
            ));
        }
        output
    }

    pub fn format_sessions_html(sessions: &[Session]) -> String {
        let mut output = String::from("<ul class=\"session-list\">\n");
        for session in sessions {
            output.push_str(&format!(
                "  <li data-session-id=\"{}\">{}</li>\n",
                escape_html(session.id.as_str()),
                escape_html(&session.title)
            ));
        }
        output.push_str("</ul>\n");
        output
    }

    pub fn format_sessions_json(sessions: &[Session]) -> String {
        serde_json::to_string_pretty(sessions).unwrap_or_else(|_| "[]".to_string())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_reply(&self, reply: &ChatReply) -> String {
        match self.format {
            OutputFormat::Text => Self::format_text(&reply.response),
            OutputFormat::Html => Self::format_html(&reply.response, self.markup),
            OutputFormat::Json => Self::format_json(reply),
        }
    }

    fn format_sessions(&self, sessions: &[Session]) -> String {
        match self.format {
            OutputFormat::Text => Self::format_sessions_text(sessions),
            OutputFormat::Html => Self::format_sessions_html(sessions),
            OutputFormat::Json => Self::format_sessions_json(sessions),
        }
    }
}
