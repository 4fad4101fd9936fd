//! Locale-aware string ordering for feature sorting.
//!
//! Approximates the Unicode root collation used by `localeCompare` in
//! common runtimes, which is what existing dataset files were sorted with:
//!
//! - primary: whitespace < punctuation < symbols < digits < letters, with
//!   letters compared case-insensitively and Latin accents folded to their
//!   base letter
//! - secondary: unaccented before accented
//! - tertiary: lowercase before uppercase
//!
//! Remaining ties fall back to code point order so the result is total.

use std::cmp::Ordering;

/// Punctuation and symbols in root collation order. Characters earlier in
/// the string sort first.
const VARIABLE_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Index in [`VARIABLE_ORDER`] where symbols start.
const SYMBOLS_START: usize = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

/// Compares two strings the way a root-locale collator would.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary)
        .cmp(b.chars().map(primary))
        .then_with(|| a.chars().map(secondary).cmp(b.chars().map(secondary)))
        .then_with(|| a.chars().map(tertiary).cmp(b.chars().map(tertiary)))
        .then_with(|| a.cmp(b))
}

fn primary(c: char) -> (CharClass, u32) {
    if c.is_whitespace() {
        return (CharClass::Whitespace, u32::from(c));
    }
    if let Some(position) = VARIABLE_ORDER.chars().position(|v| v == c) {
        let class = if position < SYMBOLS_START {
            CharClass::Punctuation
        } else {
            CharClass::Symbol
        };
        #[allow(clippy::cast_possible_truncation)]
        return (class, position as u32);
    }
    if let Some(digit) = c.to_digit(10) {
        return (CharClass::Digit, digit);
    }
    if c.is_alphabetic() {
        return (CharClass::Letter, u32::from(fold(lowercase(c))));
    }
    if c.is_numeric() {
        return (CharClass::Digit, u32::from(c));
    }
    (CharClass::Symbol, u32::from(c))
}

fn secondary(c: char) -> u32 {
    let lower = lowercase(c);
    if fold(lower) == lower {
        0
    } else {
        u32::from(lower)
    }
}

fn tertiary(c: char) -> bool {
    c.is_uppercase()
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Strips diacritics from the accented Latin letters that show up in NYC
/// place names.
const fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
