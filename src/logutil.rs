//! Logging helpers for player-supplied text. Input lines go into debug logs
//! verbatim, so control characters are escaped and long lines truncated to
//! keep each log entry on one line.

/// Longest input prefix worth logging; game commands are a word or two.
const MAX_PREVIEW: usize = 80;

/// Escape a string for single-line logging. The common control characters
/// get their usual escape sequences, anything else in the control range is
/// rendered as `\u{..}`, and input past the preview cap is elided.
pub fn escape_log(input: &str) -> String {
    use std::fmt::Write as _;

    let mut out = String::with_capacity(input.len().min(MAX_PREVIEW));
    for ch in input.chars().take(MAX_PREVIEW) {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    if input.chars().nth(MAX_PREVIEW).is_some() {
        out.push('…');
    }
    out
}
