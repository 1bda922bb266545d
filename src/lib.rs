// Read-aloud speech accuracy engine
//
// Scores what a reader said (speech-to-text output) against the text they were
// asked to read:
// - matcher: single-word fuzzy matching
// - aligner: sentence alignment and per-word verdicts
// - syllabifier: syllable chunks for pronunciation pacing
// - assessment: pass/fail + coaching on top of the above
// - validator: practice-list word validation

pub mod aligner;
pub mod assessment;
pub mod config;
pub mod matcher;
pub mod syllabifier;
pub mod text;
pub mod validator;

pub use aligner::SentenceAligner;
pub use assessment::{Assessment, Assessor, CoachingHint, PracticeKind};
pub use config::{AlignmentMode, EngineConfig};
pub use matcher::WordMatcher;
pub use syllabifier::Syllabifier;
pub use text::{MatchType, SentenceScore, SyllableList, Token, WordMatch, WordVerdict};
pub use validator::{HttpDictionaryLookup, ValidationSource, WordValidation, WordValidator};

use tracing_subscriber::EnvFilter;

lazy_static::lazy_static! {
    /// Default-configured aligner backing the free functions below
    static ref DEFAULT_ALIGNER: SentenceAligner = SentenceAligner::default();
}

/// Does `spoken` count as a reading of `target`? (default thresholds)
pub fn is_match(spoken: &str, target: &str) -> bool {
    DEFAULT_ALIGNER.matcher().is_match(spoken, target)
}

/// Score a spoken sentence against its target (default settings)
pub fn score(spoken: &str, target: &str) -> SentenceScore {
    DEFAULT_ALIGNER.score(spoken, target)
}

/// Split a word into syllable-like chunks
pub fn syllabify(word: &str) -> SyllableList {
    Syllabifier::syllabify(word)
}

/// Install the stderr log subscriber (`RUST_LOG`, default `info`)
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_examples() {
        assert!(is_match("cat", "cat"));
        assert!(is_match("the word is cat", "cat"));
        assert!(is_match("cot", "cat"));
        assert!(!is_match("dog", "cat"));
        assert!(!is_match("", "cat"));
    }

    #[test]
    fn test_score_examples() {
        assert_eq!(score("the cat sat", "the cat sat").accuracy_percent, 100);

        let omitted = score("the sat", "the cat sat");
        assert_eq!(omitted.accuracy_percent, 67);
        assert_eq!(omitted.word_verdicts[1].spoken_word, None);
        assert!(!omitted.word_verdicts[1].is_correct);

        assert_eq!(score("the the cat sat", "the cat sat").accuracy_percent, 100);
        assert_eq!(score("um the uh cat sat", "the cat sat").accuracy_percent, 100);
        assert_eq!(score("anything", "").accuracy_percent, 0);
        assert!(score("anything", "").word_verdicts.is_empty());
    }

    #[test]
    fn test_verdicts_follow_target_order() {
        let target = "once upon a time there was a rabbit";
        for spoken in ["", "once upon", "rabbit time a upon", "once upon a time there was a rabbit"] {
            let result = score(spoken, target);
            assert_eq!(result.word_verdicts.len(), 8);
            for (i, verdict) in result.word_verdicts.iter().enumerate() {
                assert_eq!(verdict.position, i);
            }
            assert!(result.accuracy_percent <= 100);
        }
    }

    #[test]
    fn test_syllabify_examples() {
        assert_eq!(syllabify("cat").into_vec(), vec!["cat"]);
        assert_eq!(syllabify("rabbit").joined(), "rabbit");
        assert!(syllabify("rabbit").len() >= 2);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}
