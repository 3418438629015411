use chrono::{DateTime, Utc};

/// Moves a cursor one step through `len` items without wrapping.
pub fn step_clamped(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

/// Moves a cursor one step through `len` items, wrapping at both ends.
pub fn step_wrapping(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1) % len
    } else if cursor == 0 {
        len - 1
    } else {
        cursor - 1
    }
}

/// Pulls a cursor back inside a list that may have shrunk.
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// One-line preview of a note body for the list screen
pub fn body_preview(body: &str, max_chars: usize) -> String {
    let flat = body.replace('\n', " ");
    if flat.chars().count() > max_chars {
        let mut short: String = flat.chars().take(max_chars).collect();
        short.push_str("...");
        short
    } else {
        flat
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
