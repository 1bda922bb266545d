//! Syllabifier
//!
//! Heuristic word → syllable-chunk splitting used to pace pronunciation audio.
//! Not dictionary-exact; deterministic and lossless (chunks concatenate back to
//! the lowercased word).

use crate::text::rules::{is_consonant_blend, is_vowel, is_vowel_digraph};
use crate::text::types::SyllableList;

/// Syllabifier
pub struct Syllabifier;

impl Syllabifier {
    /// Split a word into syllable-like chunks
    ///
    /// Words of three letters or fewer, or with at most one vowel, come back
    /// whole. Blank input gives an empty list.
    pub fn syllabify(word: &str) -> SyllableList {
        let normalized = word.trim().to_lowercase();
        if normalized.is_empty() {
            return SyllableList::default();
        }

        let chars: Vec<char> = normalized.chars().collect();
        let vowel_count = chars.iter().filter(|c| is_vowel(**c)).count();
        if chars.len() <= 3 || vowel_count <= 1 {
            return SyllableList::new(vec![normalized]);
        }

        let merged = Self::merge_consonant_only(Self::split(&chars));
        if merged.is_empty() {
            return SyllableList::new(vec![normalized]);
        }

        SyllableList::new(merged)
    }

    /// Left-to-right scan closing a syllable after vowels followed by
    /// V-CV / VC-CV / V-blend patterns
    fn split(chars: &[char]) -> Vec<String> {
        let n = chars.len();
        let mut syllables = Vec::new();
        let mut current = String::new();
        let mut i = 0usize;

        while i < n {
            let ch = chars[i];
            current.push(ch);

            if is_vowel(ch) && i + 1 < n {
                // Vowel digraph: both letters stay together
                if is_vowel_digraph(ch, chars[i + 1]) {
                    current.push(chars[i + 1]);
                    i += 1;
                }

                if let Some(keep) = Self::consonants_kept(chars, i) {
                    for k in 0..keep {
                        current.push(chars[i + 1 + k]);
                    }
                    syllables.push(std::mem::take(&mut current));
                    i += keep;
                }
            }

            i += 1;
        }

        if !current.is_empty() {
            syllables.push(current);
        }

        syllables
    }

    /// How many of the consonants after the vowel at `i` close the current
    /// syllable, or `None` when no split belongs here
    fn consonants_kept(chars: &[char], i: usize) -> Option<usize> {
        let run = chars[i + 1..].iter().take_while(|c| !is_vowel(**c)).count();

        // Next letter is a vowel, or the consonants run to the end of the word
        if run == 0 || i + 1 + run >= chars.len() {
            return None;
        }

        match run {
            // V-CV: split before the consonant
            1 => Some(0),
            // V-CCV: blend moves to the next syllable, otherwise split between
            2 => {
                if is_consonant_blend(chars[i + 1], chars[i + 2]) {
                    Some(0)
                } else {
                    Some(1)
                }
            }
            // Longer clusters: trailing blend starts the next syllable
            _ => {
                if is_consonant_blend(chars[i + run - 1], chars[i + run]) {
                    Some(run - 2)
                } else {
                    Some(1)
                }
            }
        }
    }

    /// Every syllable needs a vowel: consonant-only chunks join the previous
    /// syllable, or the next one when they lead the word
    fn merge_consonant_only(syllables: Vec<String>) -> Vec<String> {
        let mut merged: Vec<String> = Vec::with_capacity(syllables.len());
        let mut pending = String::new();

        for syllable in syllables {
            if syllable.chars().any(is_vowel) {
                let mut combined = std::mem::take(&mut pending);
                combined.push_str(&syllable);
                merged.push(combined);
            } else if let Some(last) = merged.last_mut() {
                last.push_str(&syllable);
            } else {
                pending.push_str(&syllable);
            }
        }

        if !pending.is_empty() {
            merged.push(pending);
        }

        merged
    }
}

/// [`Syllabifier::syllabify`]
pub fn syllabify(word: &str) -> SyllableList {
    Syllabifier::syllabify(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(word: &str) -> Vec<String> {
        syllabify(word).into_vec()
    }

    #[test]
    fn test_short_words_not_split() {
        assert_eq!(chunks("cat"), vec!["cat"]);
        assert_eq!(chunks("a"), vec!["a"]);
        assert_eq!(chunks("Eye"), vec!["eye"]);
    }

    #[test]
    fn test_single_vowel_not_split() {
        assert_eq!(chunks("strength"), vec!["strength"]);
        assert_eq!(chunks("don't"), vec!["don't"]);
    }

    #[test]
    fn test_vcv_split() {
        assert_eq!(chunks("tiger"), vec!["ti", "ger"]);
    }

    #[test]
    fn test_vccv_split_between() {
        assert_eq!(chunks("rabbit"), vec!["rab", "bit"]);
        assert_eq!(chunks("happy"), vec!["hap", "py"]);
        assert_eq!(chunks("chicken"), vec!["chic", "ken"]);
        assert_eq!(chunks("yellow"), vec!["yel", "low"]);
    }

    #[test]
    fn test_vccv_blend_kept_together() {
        assert_eq!(chunks("basket"), vec!["ba", "sket"]);
    }

    #[test]
    fn test_vowel_digraph() {
        assert_eq!(chunks("rainbow"), vec!["rain", "bow"]);
    }

    #[test]
    fn test_long_consonant_cluster() {
        assert_eq!(chunks("monster"), vec!["mon", "ster"]);
        assert_eq!(chunks("apple"), vec!["ap", "ple"]);
    }

    #[test]
    fn test_uppercase_is_normalized() {
        assert_eq!(chunks("TIGER"), vec!["ti", "ger"]);
    }

    #[test]
    fn test_blank_word() {
        assert!(syllabify("").is_empty());
        assert!(syllabify("   ").is_empty());
    }

    #[test]
    fn test_reconstruction() {
        let words = [
            "elephant", "butterfly", "Wonderful", "tomato", "banana", "children",
            "computer", "dinosaur", "umbrella", "strawberry", "beautiful", "yesterday",
            "together", "quietly", "friendship", "a", "cat", "rhythm",
        ];
        for word in words {
            let list = syllabify(word);
            assert!(!list.is_empty(), "{} produced no syllables", word);
            assert_eq!(list.joined(), word.to_lowercase(), "{} lost letters", word);
            assert!(list.iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn test_every_multi_syllable_chunk_has_vowel() {
        for word in ["elephant", "butterfly", "umbrella", "strawberry", "dinosaur"] {
            let list = syllabify(word);
            assert!(list.len() > 1, "{} should split", word);
            assert!(list.iter().all(|s| s.chars().any(is_vowel)), "{:?}", list);
        }
    }

    #[test]
    fn test_merge_consonant_only() {
        let merged = Syllabifier::merge_consonant_only(vec![
            "ba".to_string(),
            "sk".to_string(),
            "et".to_string(),
        ]);
        assert_eq!(merged, vec!["bask", "et"]);

        let leading = Syllabifier::merge_consonant_only(vec!["str".to_string(), "ing".to_string()]);
        assert_eq!(leading, vec!["string"]);

        let none = Syllabifier::merge_consonant_only(vec!["rhy".to_string()]);
        assert_eq!(none, vec!["rhy"]);
    }

    #[test]
    fn test_deterministic() {
        let first = syllabify("butterfly");
        for _ in 0..5 {
            assert_eq!(syllabify("butterfly"), first);
        }
    }
}
