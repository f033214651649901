//! Phrase canonicalization layer.
//!
//! Turns entity fields and user queries into comparable phrases before they
//! reach the fuzzy matchers. Both sides of a comparison must go through the
//! same [`Preprocessor`], otherwise distances mean nothing.
//!
//! ## What we do
//!
//! - Unicode normalization (NFKC, configurable)
//! - Lowercasing and punctuation/symbol clearing
//! - English stop-word removal
//! - Optional place rewrites (cardinal directions, street abbreviations)
//! - Whitespace collapsing
//! - Tokenization with byte offsets, used to cut phrase windows
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config give
//! the same phrase on any machine.
//!
//! ```rust
//! use canonical::{EnPreprocessor, Preprocessor, Tokenizer, WhitespaceTokenizer};
//!
//! let places = EnPreprocessor::places();
//! let phrase = places.preprocess("75 King St. S");
//! assert_eq!(phrase, "75 king street south");
//!
//! let tokens = WhitespaceTokenizer.tokenize(&phrase);
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(&phrase[tokens[1].start..tokens[2].end], "king street");
//! ```

mod config;
mod error;
mod pipeline;
mod preprocessor;
mod rules;
mod token;

pub use crate::config::PreprocessConfig;
pub use crate::error::CanonicalError;
pub use crate::pipeline::normalize_phrase;
pub use crate::preprocessor::{EnPreprocessor, Preprocessor};
pub use crate::rules::STOP_WORDS;
pub use crate::token::{tokenize, Token, Tokenizer, WhitespaceTokenizer};
