//! Text helpers: outbound message splitting and log truncation.

/// Maximum characters in one outbound chat message.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Room kept free in each part for its `Part i/N:` header.
const PART_HEADER_RESERVE: usize = 32;

/// Split `text` into messages no longer than `limit` characters.
///
/// Text within the limit is returned unchanged as a single message. Longer
/// text is cut on line boundaries into bodies, each prefixed with
/// `Part i/N:\n\n`; the bodies concatenate back to `text`. A single line that
/// does not fit a body is hard-split at character boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let budget = limit.saturating_sub(PART_HEADER_RESERVE).max(1);
    let bodies = split_bodies(text, budget);
    let total = bodies.len();

    bodies
        .into_iter()
        .enumerate()
        .map(|(i, body)| format!("Part {}/{}:\n\n{}", i + 1, total, body))
        .collect()
}

fn split_bodies(text: &str, budget: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len <= budget {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        if !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= budget {
            current.push_str(line);
            current_len = line_len;
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut chunks = chars.chunks(budget).peekable();
        while let Some(chunk) = chunks.next() {
            let piece: String = chunk.iter().collect();
            if chunks.peek().is_some() {
                parts.push(piece);
            } else {
                current_len = chunk.len();
                current = piece;
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// First `max` characters of `s`, with `...` appended when cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
