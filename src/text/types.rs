//! Engine value types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::tokenizer::normalize_word;

/// Normalized word token
///
/// Lowercase, punctuation stripped except internal apostrophes. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Normalize a single word; `None` when nothing word-like is left
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_word(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Correctness judgement for one target position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordVerdict {
    /// Index into the target token sequence
    pub position: usize,
    pub target_word: Token,
    /// `None` when nothing spoken was aligned here (omission)
    pub spoken_word: Option<Token>,
    pub is_correct: bool,
}

impl WordVerdict {
    /// Verdict for an omitted target word
    pub fn omitted(position: usize, target_word: Token) -> Self {
        Self {
            position,
            target_word,
            spoken_word: None,
            is_correct: false,
        }
    }
}

/// Sentence-level result
///
/// `word_verdicts` always has exactly one entry per target token, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceScore {
    /// 0..=100
    pub accuracy_percent: u8,
    pub word_verdicts: Vec<WordVerdict>,
}

impl SentenceScore {
    /// Score for a target with no tokens
    pub fn empty() -> Self {
        Self {
            accuracy_percent: 0,
            word_verdicts: Vec::new(),
        }
    }

    /// Build from verdicts, computing the rounded percentage
    pub fn from_verdicts(word_verdicts: Vec<WordVerdict>) -> Self {
        let correct = word_verdicts.iter().filter(|v| v.is_correct).count();
        Self {
            accuracy_percent: accuracy_percent(correct, word_verdicts.len()),
            word_verdicts,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.word_verdicts.iter().filter(|v| v.is_correct).count()
    }

    /// Positions whose verdict is incorrect
    pub fn missed_positions(&self) -> Vec<usize> {
        self.word_verdicts
            .iter()
            .filter(|v| !v.is_correct)
            .map(|v| v.position)
            .collect()
    }
}

/// `round(100 * correct / total)`, half rounded up, integer-only
///
/// Returns 0 for an empty target.
pub fn accuracy_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((200 * correct + total) / (2 * total)) as u8
}

/// Ordered syllable-like chunks of one word
///
/// Concatenating the chunks gives back the (lowercased) word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyllableList(Vec<String>);

impl SyllableList {
    pub fn new(syllables: Vec<String>) -> Self {
        Self(syllables)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// All chunks concatenated
    pub fn joined(&self) -> String {
        self.0.concat()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Which check accepted a spoken word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Identical after normalization
    Exact,
    /// Target found as a token of a spoken phrase
    Containment,
    /// Within the length-dependent edit distance
    EditDistance,
    /// Equal after a grapheme substitution rule
    Phonetic,
    /// Same Double Metaphone code
    Metaphone,
}

/// Match result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMatch {
    /// Normalized spoken text that was compared
    pub spoken: String,
    /// Normalized target
    pub target: String,
    pub match_type: MatchType,
    /// Confidence (0.0 - 1.0)
    pub confidence: f32,
}
