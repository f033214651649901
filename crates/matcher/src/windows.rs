//! Phrase window generation.
//!
//! Users rarely say an entity's full label. A contact "Andrew Smith" is asked
//! for as "andrew" or "smith"; a place as "beertown" or "75 king street".
//! Each entity field is therefore indexed as every prefix and every suffix
//! on token boundaries:
//!
//! ```text
//! "andrew james smith" → "andrew", "james smith",
//!                        "andrew james", "smith",
//!                        "andrew james smith"
//! ```
//!
//! Places additionally pair name suffixes with the full address and the full
//! name with address prefixes, so "beertown 75 king" finds Beertown.

use std::sync::Arc;

use canonical::{Tokenizer, WhitespaceTokenizer};
use hashbrown::HashSet;

use crate::target::Target;

/// Cuts phrases into prefix and suffix windows at token boundaries.
#[derive(Clone)]
pub struct WindowGenerator {
    tokenizer: Arc<dyn Tokenizer>,
}

impl Default for WindowGenerator {
    fn default() -> Self {
        Self::new(Arc::new(WhitespaceTokenizer))
    }
}

impl WindowGenerator {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Every token-boundary prefix of `phrase`, each followed by the suffix
    /// starting at the next token. `n` tokens give `2n - 1` windows.
    pub fn phrase_windows(&self, phrase: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(phrase);
        let mut windows = Vec::with_capacity((tokens.len() * 2).saturating_sub(1));
        for (idx, token) in tokens.iter().enumerate() {
            windows.push(phrase[..token.end].to_string());
            if let Some(next) = tokens.get(idx + 1) {
                windows.push(phrase[next.start..].to_string());
            }
        }
        windows
    }

    /// Windows of a place's name and address, alone and combined.
    ///
    /// For each name token: the name prefix, then (if more tokens follow)
    /// the name suffix and the suffix joined with the full address. For each
    /// address token: the address prefix, the full name joined with that
    /// prefix, then (if more tokens follow) the address suffix.
    pub fn place_windows(&self, name: &str, address: &str) -> Vec<String> {
        let name_tokens = self.tokenizer.tokenize(name);
        let address_tokens = if address.is_empty() {
            Vec::new()
        } else {
            self.tokenizer.tokenize(address)
        };
        let mut windows = Vec::new();

        for (idx, token) in name_tokens.iter().enumerate() {
            windows.push(name[..token.end].to_string());
            if let Some(next) = name_tokens.get(idx + 1) {
                let suffix = &name[next.start..];
                windows.push(suffix.to_string());
                if !address.is_empty() {
                    windows.push(format!("{suffix} {address}"));
                }
            }
        }

        for (idx, token) in address_tokens.iter().enumerate() {
            let prefix = &address[..token.end];
            windows.push(prefix.to_string());
            if !name.is_empty() {
                windows.push(format!("{name} {prefix}"));
            }
            if let Some(next) = address_tokens.get(idx + 1) {
                windows.push(address[next.start..].to_string());
            }
        }

        windows
    }
}

/// Accumulates targets for one index, dropping repeated `(phrase, id)`
/// pairs and tracking the widest per-entity window set.
pub(crate) struct TargetSet<V> {
    targets: Vec<Target<V>>,
    seen: HashSet<(String, usize)>,
    max_window: usize,
}

impl<V> TargetSet<V> {
    pub(crate) fn new() -> Self {
        Self {
            targets: Vec::new(),
            seen: HashSet::new(),
            max_window: 1,
        }
    }

    /// Adds one field's windows for entity `id`.
    pub(crate) fn extend(&mut self, value: &Arc<V>, id: usize, windows: Vec<String>) {
        self.max_window = self.max_window.max(windows.len());
        for phrase in windows {
            if self.seen.insert((phrase.clone(), id)) {
                self.targets.push(Target::new(Arc::clone(value), phrase, id));
            }
        }
    }

    /// Targets in insertion order, and the widest window set (at least 1).
    pub(crate) fn finish(self) -> (Vec<Target<V>>, usize) {
        (self.targets, self.max_window)
    }
}
