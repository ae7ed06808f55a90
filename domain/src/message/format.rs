//! Lightweight message formatting.
//!
//! Triple-backtick fences become code blocks and newlines become line
//! breaks. [`format_segments`] produces a structured form for the terminal;
//! [`to_html`] produces bubble markup.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Non-greedy fence match, spanning newlines
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("code fence pattern is valid"));

/// A formatted piece of message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    LineBreak,
    /// Contents of a fenced block, verbatim
    Code(String),
}

/// How [`to_html`] treats markup already present in the content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    /// Escape content before inserting structural markup
    #[default]
    Escaped,
    /// Interpolate content raw; embedded HTML passes through untouched
    Compatible,
}

/// Split content into text, line breaks and fenced code blocks.
///
/// An unterminated fence is left as literal text.
pub fn format_segments(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in CODE_FENCE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut segments, &content[last..whole.start()]);
        let code = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        segments.push(Segment::Code(code.to_string()));
        last = whole.end();
    }
    push_text(&mut segments, &content[last..]);

    segments
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            segments.push(Segment::LineBreak);
        }
        if !part.is_empty() {
            segments.push(Segment::Text(part.to_string()));
        }
    }
}

/// Render content as bubble markup.
///
/// Fences become `<pre><code>…</code></pre>`, then every newline (code
/// blocks included) becomes `<br>`.
pub fn to_html(content: &str, mode: MarkupMode) -> String {
    let source: Cow<'_, str> = match mode {
        MarkupMode::Escaped => Cow::Owned(escape_html(content)),
        MarkupMode::Compatible => Cow::Borrowed(content),
    };
    CODE_FENCE
        .replace_all(&source, "<pre><code>$1</code></pre>")
        .replace('\n', "<br>")
}

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_becomes_code_block() {
        assert_eq!(
            to_html("```code```", MarkupMode::Compatible),
            "<pre><code>code</code></pre>"
        );
        assert_eq!(
            format_segments("```code```"),
            vec![Segment::Code("code".into())]
        );
    }

    #[test]
    fn test_newline_becomes_break() {
        assert_eq!(to_html("a\nb", MarkupMode::Escaped), "a<br>b");
        assert_eq!(
            format_segments("a\nb"),
            vec![
                Segment::Text("a".into()),
                Segment::LineBreak,
                Segment::Text("b".into())
            ]
        );
    }

    #[test]
    fn test_newlines_inside_code_also_break() {
        assert_eq!(
            to_html("```x\ny```", MarkupMode::Compatible),
            "<pre><code>x<br>y</code></pre>"
        );
        assert_eq!(
            format_segments("```x\ny```"),
            vec![Segment::Code("x\ny".into())]
        );
    }

    #[test]
    fn test_multiple_fences_are_non_greedy() {
        let segments = format_segments("a ```one``` b ```two```");
        assert_eq!(
            segments,
            vec![
                Segment::Text("a ".into()),
                Segment::Code("one".into()),
                Segment::Text(" b ".into()),
                Segment::Code("two".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_fence_is_text() {
        assert_eq!(
            format_segments("```open"),
            vec![Segment::Text("```open".into())]
        );
    }

    #[test]
    fn test_compatible_mode_passes_markup_through() {
        assert_eq!(
            to_html("<b>bold</b>", MarkupMode::Compatible),
            "<b>bold</b>"
        );
    }

    #[test]
    fn test_escaped_mode_neutralises_markup() {
        assert_eq!(
            to_html("<script>alert('x')</script>", MarkupMode::Escaped),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(
            to_html("```<i>```", MarkupMode::Escaped),
            "<pre><code>&lt;i&gt;</code></pre>"
        );
    }

    #[test]
    fn test_markup_mode_deserializes_lowercase() {
        let mode: MarkupMode = serde_json::from_str(r#""compatible""#).unwrap();
        assert_eq!(mode, MarkupMode::Compatible);
        assert_eq!(MarkupMode::default(), MarkupMode::Escaped);
    }
}
