//! Tokenizer
//!
//! Turns raw transcript / target text into normalized word tokens:
//! lowercase, punctuation stripped (internal apostrophes kept), whitespace folded.

use unicode_normalization::UnicodeNormalization;

use crate::text::types::Token;

/// Character class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letters and digits
    Word,
    /// Straight or typographic apostrophe
    Apostrophe,
    /// Any whitespace
    Whitespace,
    /// Everything else (dropped)
    Punctuation,
}

/// Classify a single character
pub fn classify_char(ch: char) -> CharClass {
    if ch.is_alphanumeric() {
        CharClass::Word
    } else if is_apostrophe(ch) {
        CharClass::Apostrophe
    } else if ch.is_whitespace() {
        CharClass::Whitespace
    } else {
        CharClass::Punctuation
    }
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}' | '\u{2018}' | '\u{02BC}')
}

/// Normalize one whitespace-free chunk into a token string
///
/// Returns an empty string when nothing word-like survives.
pub fn normalize_word(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());

    for ch in raw.nfc().flat_map(char::to_lowercase) {
        match classify_char(ch) {
            CharClass::Word => result.push(ch),
            CharClass::Apostrophe => result.push('\''),
            CharClass::Whitespace | CharClass::Punctuation => {}
        }
    }

    // Only internal apostrophes survive ("don't", not "'cause'")
    result.trim_matches('\'').to_string()
}

/// Split text into normalized tokens
///
/// Empty tokens (pure punctuation, stray apostrophes) are dropped, so the
/// result only ever holds non-empty tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace().filter_map(Token::parse).collect()
}

/// Normalized form of a whole phrase: tokens joined by single spaces
pub fn normalize_phrase(text: &str) -> String {
    tokenize(text)
        .iter()
        .map(Token::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(words("The cat sat."), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(words("  the \t cat\n\nsat  "), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_tokenize_keeps_internal_apostrophe() {
        assert_eq!(words("Don't stop"), vec!["don't", "stop"]);
        assert_eq!(words("it\u{2019}s fine"), vec!["it's", "fine"]);
    }

    #[test]
    fn test_tokenize_trims_outer_apostrophes() {
        assert_eq!(words("'hello' dogs'"), vec!["hello", "dogs"]);
    }

    #[test]
    fn test_tokenize_drops_punctuation_only_chunks() {
        assert_eq!(words("wait , ... what ?!"), vec!["wait", "what"]);
        assert!(tokenize("?! -- ...").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(normalize_phrase("  The WORD is: Cat! "), "the word is cat");
        assert_eq!(normalize_phrase(""), "");
    }

    #[test]
    fn test_classify_char() {
        assert_eq!(classify_char('a'), CharClass::Word);
        assert_eq!(classify_char('7'), CharClass::Word);
        assert_eq!(classify_char('\u{2019}'), CharClass::Apostrophe);
        assert_eq!(classify_char(' '), CharClass::Whitespace);
        assert_eq!(classify_char('!'), CharClass::Punctuation);
    }
}
