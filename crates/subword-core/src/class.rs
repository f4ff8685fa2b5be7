//! Character classification for sub-word boundaries.
//!
//! Every character maps to exactly one [`CharClass`]. A *run* is a maximal
//! stretch of characters sharing a class, and sub-word navigation stops at the
//! edges between runs.
//!
//! | Input | Class |
//! |-------|-------|
//! | no character (buffer edge) | [`Other`](CharClass::Other) |
//! | Latin letter outside ASCII (`Ś`, `ę`, `Ñ`) | `Upper` / `Lower` by case |
//! | `a`-`z` | [`Lower`](CharClass::Lower) |
//! | `A`-`Z` | [`Upper`](CharClass::Upper) |
//! | `0`-`9` | [`Digit`](CharClass::Digit) |
//! | space, tab, any Unicode whitespace | [`Whitespace`](CharClass::Whitespace) |
//! | anything else (`_`, `-`, `.`, `ก`, `𝌀`) | [`Other`](CharClass::Other) |
//!
//! There is no special treatment of `_` or `-`: `snake_case` and `kebab-case`
//! both split on an `Other` run like any punctuation.

/// Semantic class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Whitespace,
    /// Punctuation, symbols, non-Latin scripts, and the absent character.
    Other,
}

impl CharClass {
    #[inline]
    #[must_use]
    pub const fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace)
    }
}

/// Classify one character.
#[must_use]
pub fn classify(ch: char) -> CharClass {
    if is_extended_latin_letter(ch) {
        return if is_own_uppercase(ch) {
            CharClass::Upper
        } else {
            CharClass::Lower
        };
    }

    match ch {
        'a'..='z' => CharClass::Lower,
        'A'..='Z' => CharClass::Upper,
        '0'..='9' => CharClass::Digit,
        c if c.is_whitespace() => CharClass::Whitespace,
        _ => CharClass::Other,
    }
}

/// Classify a possibly-absent character. `None` is [`CharClass::Other`].
#[inline]
#[must_use]
pub fn classify_opt(ch: Option<char>) -> CharClass {
    ch.map_or(CharClass::Other, classify)
}

/// Classify the first character of `text`; the rest is ignored.
#[inline]
#[must_use]
pub fn classify_str(text: &str) -> CharClass {
    classify_opt(text.chars().next())
}

/// Letters in the Latin-1 Supplement, Latin Extended-A/B and Latin Extended
/// Additional blocks.
fn is_extended_latin_letter(ch: char) -> bool {
    matches!(ch, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
        && ch != '\u{00D7}'
        && ch != '\u{00F7}'
        && ch.is_alphabetic()
}

/// True when `ch` uppercases to exactly itself.
fn is_own_uppercase(ch: char) -> bool {
    let mut upper = ch.to_uppercase();
    upper.next() == Some(ch) && upper.next().is_none()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
