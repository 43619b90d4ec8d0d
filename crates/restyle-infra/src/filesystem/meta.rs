//! Style metadata record (`<name>.meta`) composition and parsing.
//!
//! The record is three `Key: value` lines written in a fixed order:
//!
//! ```text
//! Style: Business_Tone
//! Prompt: Write formally
//! Example: Business_Tone.txt
//! ```
//!
//! Reading is order-independent: only the first line starting with
//! `Prompt: ` matters. Newlines and backslashes in the prompt are escaped so
//! the record stays one field per line.

use restyle_types::style::Style;

const STYLE_KEY: &str = "Style: ";
const PROMPT_KEY: &str = "Prompt: ";
const EXAMPLE_KEY: &str = "Example: ";

/// Render the metadata record for `style`.
pub fn compose_meta(style: &Style) -> String {
    format!(
        "{STYLE_KEY}{}\n{PROMPT_KEY}{}\n{EXAMPLE_KEY}{}\n",
        style.name,
        escape(&style.prompt),
        style.example_file
    )
}

/// Extract the prompt from a metadata record, or `None` if it has no
/// `Prompt:` line.
pub fn parse_prompt(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix(PROMPT_KEY))
        .map(|value| unescape(value.trim_end_matches('\r')))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            // Unknown escapes and a trailing backslash are kept literally.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
