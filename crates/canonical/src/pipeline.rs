use std::borrow::Cow;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::PreprocessConfig;
use crate::rules::{expand_place_token, is_stop_word};

/// Normalizes a phrase according to `cfg`.
///
/// The result has single-space separated words and no leading or trailing
/// whitespace. Empty or all-filler input yields an empty string.
pub fn normalize_phrase(input: &str, cfg: &PreprocessConfig) -> String {
    // Unicode normalization is the first step, as it can affect character boundaries.
    let normalized_text: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    let mut cleared = String::with_capacity(normalized_text.len());
    let mut pending_space = false;
    for grapheme in normalized_text.graphemes(true) {
        // Lowercasing can expand a single character into multiple.
        if cfg.lowercase {
            for lower in grapheme.to_lowercase().chars() {
                dispatch_char(lower, cfg, &mut cleared, &mut pending_space);
            }
        } else {
            for ch in grapheme.chars() {
                dispatch_char(ch, cfg, &mut cleared, &mut pending_space);
            }
        }
    }

    if !cfg.remove_stop_words && !cfg.expand_place_abbreviations {
        return cleared;
    }
    rewrite_words(&cleared, cfg)
}

/// Decides whether a character is kept or acts as a word delimiter.
fn dispatch_char(ch: char, cfg: &PreprocessConfig, out: &mut String, pending_space: &mut bool) {
    let is_delim = ch.is_whitespace()
        || (cfg.strip_punctuation && (ch.is_punctuation() || ch.is_symbol()));
    if is_delim {
        if !out.is_empty() {
            *pending_space = true;
        }
        return;
    }
    if *pending_space {
        out.push(' ');
        *pending_space = false;
    }
    out.push(ch);
}

/// Applies the word-level rules to whitespace-collapsed text.
fn rewrite_words(text: &str, cfg: &PreprocessConfig) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let words = text
        .split(' ')
        .filter(|word| !word.is_empty())
        .filter(|word| !(cfg.remove_stop_words && is_stop_word(word)));

    for (position, word) in words.enumerate() {
        if !out.is_empty() {
            out.push(' ');
        }
        let expanded = if cfg.expand_place_abbreviations {
            expand_place_token(word, position == 0)
        } else {
            None
        };
        out.push_str(expanded.unwrap_or(word));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_and_punctuation_become_spaces() {
        let cfg = PreprocessConfig::default();
        assert_eq!(
            normalize_phrase("Beer, Wine & Spirits", &cfg),
            "beer wine spirits"
        );
        assert_eq!(normalize_phrase("Canadian (New)", &cfg), "canadian new");
    }

    #[test]
    fn punctuation_kept_when_disabled() {
        let cfg = PreprocessConfig {
            strip_punctuation: false,
            remove_stop_words: false,
            ..PreprocessConfig::default()
        };
        assert_eq!(normalize_phrase("  Nat's   Place ", &cfg), "nat's place");
    }

    #[test]
    fn place_rules_run_after_stop_words() {
        let cfg = PreprocessConfig::places();
        assert_eq!(
            normalize_phrase("The St. Lawrence Market", &cfg),
            "saint lawrence market"
        );
        assert_eq!(
            normalize_phrase("21 King St N", &cfg),
            "21 king street north"
        );
        assert_eq!(
            normalize_phrase("7 Fake Cres. Toronto", &cfg),
            "7 fake crescent toronto"
        );
    }

    #[test]
    fn compound_directions_expand_to_two_words() {
        let cfg = PreprocessConfig::places();
        assert_eq!(normalize_phrase("100 Main Blvd NW", &cfg), "100 main boulevard north west");
    }

    #[test]
    fn only_filler_yields_empty() {
        let cfg = PreprocessConfig::default();
        assert_eq!(normalize_phrase("The of a", &cfg), "");
        assert_eq!(normalize_phrase("", &cfg), "");
    }
}
