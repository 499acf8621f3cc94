/// Number of characters shown when a body is previewed in trace lines.
pub const DEFAULT_PREVIEW_CHARS: usize = 10;

/// Returns at most `max_chars` characters from the start of `body`, cut on a
/// UTF-8 boundary. The stored body is only borrowed.
pub fn body_prefix(body: &str, max_chars: usize) -> &str {
    let end = body
        .char_indices()
        .nth(max_chars)
        .map(|(index, _)| index)
        .unwrap_or(body.len());
    &body[..end]
}

/// [`body_prefix`] with surrounding whitespace trimmed, as shown in trace markers.
pub fn body_preview(body: &str, max_chars: usize) -> &str {
    body_prefix(body, max_chars).trim()
}
