//! Word matcher
//!
//! Decides whether one spoken chunk is "the same word" as a target word.
//! Checks run in order and the first hit wins:
//! 1. Exact match after normalization
//! 2. Containment (target is a token of a spoken phrase)
//! 3. Edit distance within a length-dependent threshold
//! 4. Phonetic substitution rules
//! 5. Double Metaphone codes (opt-in)

use rphonetic::{DoubleMetaphone, Encoder};

use crate::config::MatcherConfig;
use crate::text::rules::{apply_all_substitutions, PHONETIC_SUBSTITUTIONS};
use crate::text::tokenizer::normalize_phrase;
use crate::text::types::{MatchType, WordMatch};

/// Classical Levenshtein distance (insert / delete / substitute, no transposition)
///
/// Counts Unicode scalar values, not bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Fuzzy single-word matcher
///
/// Holds only its thresholds, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct WordMatcher {
    config: MatcherConfig,
}

impl WordMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Does `spoken` count as a reading of `target`?
    ///
    /// Never fails. Empty spoken text only matches an empty target.
    pub fn is_match(&self, spoken: &str, target: &str) -> bool {
        self.explain(spoken, target).is_some()
    }

    /// Same decision as [`is_match`](Self::is_match), reporting which check accepted it
    pub fn explain(&self, spoken: &str, target: &str) -> Option<WordMatch> {
        let spoken = normalize_phrase(spoken);
        let target = normalize_phrase(target);

        if spoken.is_empty() || target.is_empty() {
            return (spoken.is_empty() && target.is_empty())
                .then(|| Self::result(spoken, target, MatchType::Exact, 1.0));
        }

        // 1. Exact
        if spoken == target {
            return Some(Self::result(spoken, target, MatchType::Exact, 1.0));
        }

        let spoken_tokens: Vec<&str> = spoken.split(' ').collect();

        // 2. Containment
        if spoken_tokens.len() > 1 && Self::contains_phrase(&spoken_tokens, &target) {
            return Some(Self::result(spoken, target, MatchType::Containment, 0.9));
        }

        // 3. Edit distance
        if let Some(found) = self.try_edit_distance_match(&spoken, &spoken_tokens, &target) {
            return Some(found);
        }

        // 4. Phonetic substitutions
        if self.config.phonetic_rules && Self::phonetic_equivalent(&spoken, &target) {
            return Some(Self::result(spoken, target, MatchType::Phonetic, 0.7));
        }

        // 5. Double Metaphone
        if self.config.metaphone
            && target.chars().count() > self.config.short_word_max_len
            && Self::metaphone_equivalent(&spoken, &target)
        {
            return Some(Self::result(spoken, target, MatchType::Metaphone, 0.6));
        }

        None
    }

    fn result(
        spoken: String,
        target: String,
        match_type: MatchType,
        confidence: f32,
    ) -> WordMatch {
        WordMatch {
            spoken,
            target,
            match_type,
            confidence,
        }
    }

    /// Target tokens appear contiguously inside the spoken tokens
    fn contains_phrase(spoken_tokens: &[&str], target: &str) -> bool {
        let target_tokens: Vec<&str> = target.split(' ').collect();
        if target_tokens.len() > spoken_tokens.len() {
            return false;
        }
        spoken_tokens
            .windows(target_tokens.len())
            .any(|window| window == target_tokens.as_slice())
    }

    /// Whole phrase first, then each spoken token on its own
    fn try_edit_distance_match(
        &self,
        spoken: &str,
        spoken_tokens: &[&str],
        target: &str,
    ) -> Option<WordMatch> {
        let target_len = target.chars().count();
        let threshold = self.config.max_distance(target_len);

        let mut best: Option<(&str, usize)> = None;
        let whole = levenshtein(spoken, target);
        if whole <= threshold {
            best = Some((spoken, whole));
        } else if spoken_tokens.len() > 1 {
            for &token in spoken_tokens {
                let distance = levenshtein(token, target);
                if distance <= threshold && best.map_or(true, |(_, d)| distance < d) {
                    best = Some((token, distance));
                }
            }
        }

        best.map(|(matched, distance)| {
            // Confidence: 1.0 - (distance / max_len), fuzzy base 0.8
            let max_len = std::cmp::max(matched.chars().count(), target_len);
            let confidence = if max_len > 0 {
                1.0 - (distance as f32 / max_len as f32)
            } else {
                1.0
            };
            Self::result(
                matched.to_string(),
                target.to_string(),
                MatchType::EditDistance,
                confidence * 0.8,
            )
        })
    }

    /// Each rule applied alone to both sides, then all rules in order
    fn phonetic_equivalent(spoken: &str, target: &str) -> bool {
        let single_rule = PHONETIC_SUBSTITUTIONS.iter().any(|(from, to)| {
            (spoken.contains(from) || target.contains(from))
                && spoken.replace(from, to) == target.replace(from, to)
        });

        single_rule || apply_all_substitutions(spoken) == apply_all_substitutions(target)
    }

    fn metaphone_equivalent(spoken: &str, target: &str) -> bool {
        let encoder = DoubleMetaphone::default();
        let spoken_code = encoder.encode(spoken);
        let target_code = encoder.encode(target);
        !spoken_code.is_empty() && spoken_code == target_code
    }
}
