//! Word-level rewrite tables.
//!
//! Rules are matched against whole tokens, so `st` in `stone` is left alone
//! while a standalone `st` is expanded.

/// Words dropped by the English preprocessor.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "at", "by", "el", "i", "in", "la", "las", "los", "my", "of", "on", "san", "santa",
    "some", "the", "with", "you",
];

pub(crate) fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Expands a place token, returning `None` when no rule applies.
///
/// A trailing `.` is accepted on any abbreviation (`cres.`). `st` reads as
/// `saint` when it opens the phrase and `street` elsewhere.
pub(crate) fn expand_place_token(token: &str, is_first: bool) -> Option<&'static str> {
    let bare = token.strip_suffix('.').unwrap_or(token);
    let expanded = match bare {
        "n" => "north",
        "s" => "south",
        "e" => "east",
        "w" => "west",
        "ne" => "north east",
        "nw" => "north west",
        "se" => "south east",
        "sw" => "south west",
        "aly" => "alley",
        "av" | "ave" => "avenue",
        "blvd" => "boulevard",
        "bnd" => "bend",
        "cir" => "circle",
        "cres" => "crescent",
        "ct" => "court",
        "dr" => "drive",
        "est" => "estate",
        "ln" => "lane",
        "pkwy" => "parkway",
        "pl" => "place",
        "rd" => "road",
        "xing" => "crossing",
        "st" if is_first => "saint",
        "st" => "street",
        _ => return None,
    };
    Some(expanded)
}
