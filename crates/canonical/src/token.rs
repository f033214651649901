use serde::{Deserialize, Serialize};

/// A token with its UTF-8 byte offsets in the source phrase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the phrase.
    pub start: usize,
    /// Byte offset (exclusive) in the phrase.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Splits a phrase into tokens whose intervals are ascending and
/// non-overlapping.
///
/// Window generation slices the phrase by these offsets, so `start` and
/// `end` must fall on char boundaries of the input.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<Token> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self(text)
    }
}

/// [`Tokenizer`] that splits on Unicode whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text)
    }
}

/// Tokenizes text on Unicode whitespace and produces byte offsets.
///
/// Deterministic and cross-platform.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(token_start) = start.take() {
                tokens.push(Token {
                    text: text[token_start..idx].to_string(),
                    start: token_start,
                    end: idx,
                });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(token_start) = start {
        tokens.push(Token {
            text: text[token_start..].to_string(),
            start: token_start,
            end: text.len(),
        });
    }

    tokens
}
