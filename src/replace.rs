//! Literal multi-key text substitution.
//! Used for the top-level name, every nested file and folder name, and file contents.

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::error::Result;

/// Ordered mapping of literal search text to its replacement.
pub type Pieces = IndexMap<String, String>;

/// Replaces every occurrence of the keys of `pieces` in a single left-to-right pass.
///
/// Keys are matched literally. When two keys could match at the same position the one
/// inserted first wins, and replaced text is never searched again.
#[derive(Debug, Clone)]
pub struct TextReplacer {
    pattern: Option<Regex>,
    pieces: Pieces,
}

impl TextReplacer {
    /// Compiles the alternation of all escaped keys. Empty keys are ignored.
    ///
    /// # Errors
    /// * `Error::RegexError` if the combined pattern exceeds the regex size limits
    pub fn new(pieces: Pieces) -> Result<Self> {
        let alternatives: Vec<String> = pieces
            .keys()
            .filter(|key| !key.is_empty())
            .map(|key| regex::escape(key))
            .collect();

        let pattern = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&alternatives.join("|"))?)
        };

        Ok(Self { pattern, pieces })
    }

    /// Builds a replacer from `(key, value)` pairs, wrapping each key in `[` `]` when
    /// `require_brackets` is set.
    pub fn from_pairs<'a, I>(pairs: I, require_brackets: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pieces = pairs
            .into_iter()
            .map(|(key, value)| (search_key(key, require_brackets), value.to_string()))
            .collect();
        Self::new(pieces)
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn replace(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, |caps: &Captures| {
                    let matched = &caps[0];
                    self.pieces.get(matched).cloned().unwrap_or_else(|| matched.to_string())
                })
                .into_owned(),
            None => text.to_string(),
        }
    }
}

/// Text actually searched for a replacement key.
pub fn search_key(key: &str, require_brackets: bool) -> String {
    if require_brackets {
        format!("[{key}]")
    } else {
        key.to_string()
    }
}

/// One-shot form of [`TextReplacer::replace`].
pub fn replace_text_pieces(text: &str, pieces: &Pieces) -> Result<String> {
    Ok(TextReplacer::new(pieces.clone())?.replace(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key() {
        assert_eq!(search_key("name", true), "[name]");
        assert_eq!(search_key("name", false), "name");
    }

    #[test]
    fn test_empty_replacer_is_noop() {
        let replacer = TextReplacer::new(Pieces::new()).unwrap();
        assert!(replacer.is_empty());
        assert_eq!(replacer.replace("a.*b"), "a.*b");
    }
}
