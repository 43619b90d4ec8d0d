//! Style domain types.
//!
//! A style is a named pair of (system prompt, example text). The name doubles
//! as the on-disk directory and file stem, so it is only ever constructed
//! through [`StyleName::sanitize`] or validated with [`StyleName::parse`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Extension of the metadata record file.
pub const META_EXTENSION: &str = "meta";

/// Extension of the example text file.
pub const EXAMPLE_EXTENSION: &str = "txt";

/// Maximum number of example lines sent along with a rewrite request.
pub const EXAMPLE_LINE_LIMIT: usize = 100;

/// Placeholder shown when browsing a style whose record has no prompt line.
pub const PROMPT_PLACEHOLDER: &str = "prompt not found";

/// A sanitized style name.
///
/// Contains only word characters (letters, digits, underscore) and hyphens,
/// and is never empty. It cannot contain path separators or dots, so joining
/// it onto the store root never escapes that root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StyleName(String);

impl StyleName {
    /// Sanitize free-form user input into a style name.
    ///
    /// Characters outside word characters, whitespace, and `-` are dropped;
    /// whitespace becomes `_`. Input that sanitizes to nothing is rejected
    /// with [`StyleError::InvalidName`].
    pub fn sanitize(raw: &str) -> Result<Self, StyleError> {
        let name: String = raw
            .chars()
            .filter_map(|c| {
                if c.is_whitespace() {
                    Some('_')
                } else if is_word_char(c) || c == '-' {
                    Some(c)
                } else {
                    None
                }
            })
            .collect();

        if name.is_empty() {
            return Err(StyleError::InvalidName);
        }
        Ok(Self(name))
    }

    /// Accept an already-sanitized name (e.g. from button data).
    ///
    /// Anything that sanitization would alter is rejected, which keeps
    /// forged callback payloads like `../etc` out of the store.
    pub fn parse(raw: &str) -> Result<Self, StyleError> {
        let name = Self::sanitize(raw)?;
        if name.0 != raw {
            return Err(StyleError::InvalidName);
        }
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<name>.meta`
    pub fn meta_file_name(&self) -> String {
        format!("{}.{META_EXTENSION}", self.0)
    }

    /// `<name>.txt`
    pub fn example_file_name(&self) -> String {
        format!("{}.{EXAMPLE_EXTENSION}", self.0)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StyleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StyleName {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StyleName> for String {
    fn from(name: StyleName) -> Self {
        name.0
    }
}

/// A persisted style as described by its metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub name: StyleName,
    pub prompt: String,
    /// File name of the example text, relative to the style directory.
    pub example_file: String,
}

impl Style {
    pub fn new(name: StyleName, prompt: impl Into<String>) -> Self {
        let example_file = name.example_file_name();
        Self {
            name,
            prompt: prompt.into(),
            example_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_spaces() {
        let name = StyleName::sanitize("Business Tone").unwrap();
        assert_eq!(name.as_str(), "Business_Tone");
    }

    #[test]
    fn test_sanitize_strips_disallowed_characters() {
        let name = StyleName::sanitize("My/Style!? v2.0").unwrap();
        assert_eq!(name.as_str(), "MyStyle_v20");
    }

    #[test]
    fn test_sanitize_keeps_hyphens_underscores_and_unicode_letters() {
        let name = StyleName::sanitize("деловой-стиль_1").unwrap();
        assert_eq!(name.as_str(), "деловой-стиль_1");
    }

    #[test]
    fn test_sanitize_rejects_all_disallowed() {
        assert!(matches!(
            StyleName::sanitize("!!!/..."),
            Err(StyleError::InvalidName)
        ));
        assert!(matches!(StyleName::sanitize(""), Err(StyleError::InvalidName)));
    }

    #[test]
    fn test_sanitize_never_yields_path_separators() {
        for raw in ["../../etc/passwd", "a\\b", "./x", "..", "a/b c"] {
            if let Ok(name) = StyleName::sanitize(raw) {
                assert!(!name.as_str().contains('/'));
                assert!(!name.as_str().contains('\\'));
                assert!(!name.as_str().contains('.'));
            }
        }
    }

    #[test]
    fn test_parse_rejects_unsanitized() {
        assert!(StyleName::parse("Business_Tone").is_ok());
        assert!(StyleName::parse("Business Tone").is_err());
        assert!(StyleName::parse("../secret").is_err());
    }

    #[test]
    fn test_file_names() {
        let name = StyleName::sanitize("Business Tone").unwrap();
        assert_eq!(name.meta_file_name(), "Business_Tone.meta");
        assert_eq!(name.example_file_name(), "Business_Tone.txt");
    }

    #[test]
    fn test_style_name_deserialize_validates() {
        let ok: Result<StyleName, _> = serde_json::from_str("\"casual\"");
        assert!(ok.is_ok());
        let bad: Result<StyleName, _> = serde_json::from_str("\"../x\"");
        assert!(bad.is_err());
    }
}
