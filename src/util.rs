use crate::error::{ReportError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::borrow::Cow;

pub const MESSAGE_LIMIT: usize = 100;
pub const ELLIPSIS: &str = "...";

/// Parse an ISO-8601 author timestamp. A trailing `Z` is UTC; a timestamp without any offset is
/// treated as UTC as well.
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    Err(ReportError::InvalidTimestamp(input.to_string()))
}

/// Flatten a commit message onto one line and cap it at [`MESSAGE_LIMIT`] characters.
pub fn truncate_message(message: &str) -> String {
    let trimmed = message.trim();
    let flat: String = trimmed
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() > MESSAGE_LIMIT {
        let mut out: String = flat.chars().take(MESSAGE_LIMIT).collect();
        out.push_str(ELLIPSIS);
        out
    } else {
        flat
    }
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Replace characters outside Latin-1 with `?`. The built-in PDF fonts cannot draw them.
pub fn latin1_lossy(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| c <= '\u{ff}') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if c <= '\u{ff}' { c } else { '?' })
                .collect(),
        )
    }
}
