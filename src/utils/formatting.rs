//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthChar;

/// Cut `s` to at most `max` display columns, ending with `…` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }

    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn coordinate(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

pub fn accuracy(acc: Option<f32>) -> String {
    match acc {
        Some(a) => format!("±{a:.0}m"),
        None => "--".to_string(),
    }
}

/// `12:05:33` out of `2025-06-01T12:05:33`; anything else is shown as is.
pub fn short_time(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(_, t)| t)
}
