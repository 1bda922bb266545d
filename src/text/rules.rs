//! Rule tables
//!
//! Filler vocabulary, phonetic substitutions, vowel digraphs and consonant blends.
//! Built once, never written to.

use std::collections::HashSet;

lazy_static::lazy_static! {
    /// Hesitation / disfluency words dropped before alignment
    pub static ref FILLER_WORDS: HashSet<&'static str> = [
        "um", "umm", "uh", "uhh", "uhm", "er", "erm", "ah", "hmm", "hm", "mm",
        "oh", "like", "well", "okay", "ok",
    ]
    .into_iter()
    .collect();

    /// Vowel + following letter pairs that stay in one syllable
    pub static ref VOWEL_DIGRAPHS: HashSet<&'static str> = [
        "ai", "au", "ay", "ea", "ee", "ei", "ey", "ie", "oa", "oe", "oi", "oo",
        "ou", "oy", "ue", "ui",
    ]
    .into_iter()
    .collect();

    /// Consonant pairs that start a syllable together
    pub static ref CONSONANT_BLENDS: HashSet<&'static str> = [
        "bl", "br", "ch", "cl", "cr", "dr", "fl", "fr", "gl", "gr", "ng", "ph",
        "pl", "pr", "sc", "sh", "sk", "sl", "sm", "sn", "sp", "st", "sw", "th",
        "tr", "tw", "wh", "wr",
    ]
    .into_iter()
    .collect();
}

/// Grapheme rewrites modelling common child mispronunciations and
/// recognizer confusions. Order matters when all rules are applied together.
pub const PHONETIC_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("tion", "shun"),
    ("ght", "t"),
    ("th", "f"),
    ("th", "d"),
    ("wh", "w"),
    ("ph", "f"),
    ("ck", "k"),
    ("kn", "n"),
    ("wr", "r"),
];

/// `a e i o u y`
pub fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

pub fn is_filler(word: &str) -> bool {
    FILLER_WORDS.contains(word)
}

fn pair(first: char, second: char) -> String {
    let mut s = String::with_capacity(2);
    s.push(first);
    s.push(second);
    s
}

pub fn is_vowel_digraph(first: char, second: char) -> bool {
    VOWEL_DIGRAPHS.contains(pair(first, second).as_str())
}

pub fn is_consonant_blend(first: char, second: char) -> bool {
    CONSONANT_BLENDS.contains(pair(first, second).as_str())
}

/// Apply every substitution in order
pub fn apply_all_substitutions(text: &str) -> String {
    PHONETIC_SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filler_words() {
        assert!(is_filler("um"));
        assert!(is_filler("okay"));
        assert!(!is_filler("cat"));
        assert!(!is_filler("UM")); // callers pass normalized tokens
    }

    #[test]
    fn test_vowels() {
        for ch in ['a', 'e', 'i', 'o', 'u', 'y'] {
            assert!(is_vowel(ch));
        }
        assert!(!is_vowel('b'));
        assert!(!is_vowel('\''));
    }

    #[test]
    fn test_digraphs_and_blends() {
        assert!(is_vowel_digraph('a', 'i'));
        assert!(is_vowel_digraph('o', 'u'));
        assert!(!is_vowel_digraph('i', 'a'));
        assert!(is_consonant_blend('b', 'l'));
        assert!(is_consonant_blend('s', 't'));
        assert!(!is_consonant_blend('b', 'b'));
    }

    #[test]
    fn test_apply_all_substitutions() {
        assert_eq!(apply_all_substitutions("phone"), "fone");
        assert_eq!(apply_all_substitutions("night"), "nit");
        assert_eq!(apply_all_substitutions("station"), "stashun");
        assert_eq!(apply_all_substitutions("think"), "fink");
        assert_eq!(apply_all_substitutions("cat"), "cat");
    }
}
