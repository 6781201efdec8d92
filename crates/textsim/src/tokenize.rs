//! Tokenizers feeding the text hashers.
//!
//! The hashers treat tokens as opaque byte strings, so a tokenizer only has
//! to be deterministic. Any `Fn(&str) -> Vec<String>` closure can be used in
//! place of the built-in tokenizers.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Splits a document into an ordered sequence of tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize<'a>(&self, document: &'a str) -> Vec<Cow<'a, str>>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize<'a>(&self, document: &'a str) -> Vec<Cow<'a, str>> {
        self(document).into_iter().map(Cow::Owned).collect()
    }
}

/// Splits on the single space character, keeping empty tokens.
///
/// An empty document yields one empty token, and consecutive spaces yield
/// empty tokens between them. This tokenizer never returns an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpaceTokenizer;

impl Tokenizer for SpaceTokenizer {
    fn tokenize<'a>(&self, document: &'a str) -> Vec<Cow<'a, str>> {
        document.split(' ').map(Cow::Borrowed).collect()
    }
}

/// Splits on Unicode whitespace and drops empty tokens.
///
/// Blank documents produce no tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, document: &'a str) -> Vec<Cow<'a, str>> {
        document.split_whitespace().map(Cow::Borrowed).collect()
    }
}

/// NFKC-normalizes (and optionally lowercases) before splitting on whitespace.
///
/// Equivalent spellings such as a precomposed `é` and `e` + combining acute
/// produce the same tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizingTokenizer {
    pub lowercase: bool,
}

impl Default for NormalizingTokenizer {
    fn default() -> Self {
        Self { lowercase: true }
    }
}

impl Tokenizer for NormalizingTokenizer {
    fn tokenize<'a>(&self, document: &'a str) -> Vec<Cow<'a, str>> {
        let normalized: String = document.nfkc().collect();
        let normalized = if self.lowercase {
            normalized.to_lowercase()
        } else {
            normalized
        };
        normalized
            .split_whitespace()
            .map(|t| Cow::Owned(t.to_string()))
            .collect()
    }
}

/// Built-in tokenizers selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BuiltinTokenizer {
    #[default]
    Space,
    Whitespace,
    Normalizing {
        #[serde(default = "default_lowercase")]
        lowercase: bool,
    },
}

fn default_lowercase() -> bool {
    true
}

impl Tokenizer for BuiltinTokenizer {
    fn tokenize<'a>(&self, document: &'a str) -> Vec<Cow<'a, str>> {
        match *self {
            BuiltinTokenizer::Space => SpaceTokenizer.tokenize(document),
            BuiltinTokenizer::Whitespace => WhitespaceTokenizer.tokenize(document),
            BuiltinTokenizer::Normalizing { lowercase } => {
                NormalizingTokenizer { lowercase }.tokenize(document)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(tokens: Vec<Cow<'_, str>>) -> Vec<String> {
        tokens.into_iter().map(Cow::into_owned).collect()
    }

    #[test]
    fn space_tokenizer_matches_single_space_split() {
        assert_eq!(owned(SpaceTokenizer.tokenize("a b c")), vec!["a", "b", "c"]);
        assert_eq!(owned(SpaceTokenizer.tokenize("a  b")), vec!["a", "", "b"]);
        assert_eq!(owned(SpaceTokenizer.tokenize("a\tb")), vec!["a\tb"]);
    }

    #[test]
    fn space_tokenizer_never_empty() {
        assert_eq!(owned(SpaceTokenizer.tokenize("")), vec![""]);
        assert_eq!(owned(SpaceTokenizer.tokenize(" ")), vec!["", ""]);
    }

    #[test]
    fn whitespace_tokenizer_drops_blanks() {
        assert_eq!(
            owned(WhitespaceTokenizer.tokenize("  hello\t\nworld ")),
            vec!["hello", "world"]
        );
        assert!(WhitespaceTokenizer.tokenize("   ").is_empty());
    }

    #[test]
    fn normalizing_tokenizer_folds_equivalent_forms() {
        let tok = NormalizingTokenizer::default();
        let composed = owned(tok.tokenize("Caf\u{00E9} BAR"));
        let decomposed = owned(tok.tokenize("Cafe\u{0301} bar"));
        assert_eq!(composed, decomposed);
        assert_eq!(composed, vec!["caf\u{00E9}", "bar"]);
    }

    #[test]
    fn normalizing_tokenizer_can_keep_case() {
        let tok = NormalizingTokenizer { lowercase: false };
        assert_eq!(owned(tok.tokenize("Hello World")), vec!["Hello", "World"]);
    }

    #[test]
    fn closures_are_tokenizers() {
        let pipe = |doc: &str| doc.split('|').map(str::to_string).collect::<Vec<_>>();
        assert_eq!(owned(pipe.tokenize("x|y|z")), vec!["x", "y", "z"]);
    }

    #[test]
    fn builtin_dispatch() {
        assert_eq!(
            owned(BuiltinTokenizer::Space.tokenize("a  b")),
            vec!["a", "", "b"]
        );
        assert_eq!(
            owned(BuiltinTokenizer::Whitespace.tokenize("a  b")),
            vec!["a", "b"]
        );
        assert_eq!(
            owned(BuiltinTokenizer::Normalizing { lowercase: true }.tokenize("A  B")),
            vec!["a", "b"]
        );
    }

    #[test]
    fn builtin_serde_roundtrip() {
        let tok = BuiltinTokenizer::Normalizing { lowercase: false };
        let json = serde_json::to_string(&tok).unwrap();
        assert_eq!(json, r#"{"kind":"normalizing","lowercase":false}"#);
        let back: BuiltinTokenizer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tok);

        let space: BuiltinTokenizer = serde_json::from_str(r#"{"kind":"space"}"#).unwrap();
        assert_eq!(space, BuiltinTokenizer::Space);
    }
}
