// Assessment - practice item scoring
//
// Routes one attempt to the right engine:
// - Word items (one target token): WordMatcher
// - Sentence items: SentenceAligner
// then applies the pass threshold and attaches coaching syllables for missed words.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::aligner::SentenceAligner;
use crate::config::{AssessmentConfig, EngineConfig};
use crate::matcher::WordMatcher;
use crate::syllabifier::Syllabifier;
use crate::text::tokenizer::tokenize;
use crate::text::types::{
    accuracy_percent, MatchType, SentenceScore, SyllableList, Token, WordVerdict,
};

/// Practice item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeKind {
    Word,
    Sentence,
}

impl PracticeKind {
    /// Practice item type for a target text
    pub fn of(target: &str) -> Self {
        if tokenize(target).len() == 1 {
            PracticeKind::Word
        } else {
            PracticeKind::Sentence
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PracticeKind::Word => "word",
            PracticeKind::Sentence => "sentence",
        }
    }
}

/// Syllables to replay for a missed word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingHint {
    pub position: usize,
    pub word: String,
    pub syllables: SyllableList,
}

/// Result of one attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub kind: PracticeKind,
    pub accuracy_percent: u8,
    pub passed: bool,
    pub word_verdicts: Vec<WordVerdict>,
    /// Which check accepted a word item (None for sentences and misses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(default)]
    pub coaching: Vec<CoachingHint>,
    /// Processing time (microseconds)
    pub elapsed_us: u64,
}

/// Practice attempt assessor
///
/// Stateless apart from its configuration; share one per process.
#[derive(Debug, Clone)]
pub struct Assessor {
    config: AssessmentConfig,
    aligner: SentenceAligner,
}

impl Assessor {
    pub fn new(config: &EngineConfig) -> Self {
        let matcher = WordMatcher::new(config.matcher.clone());
        let aligner = SentenceAligner::new(config.aligner.clone(), matcher);

        Self {
            config: config.assessment.clone(),
            aligner,
        }
    }

    pub fn matcher(&self) -> &WordMatcher {
        self.aligner.matcher()
    }

    pub fn aligner(&self) -> &SentenceAligner {
        &self.aligner
    }

    /// Assess one spoken attempt against a word or sentence
    pub fn assess(&self, spoken: &str, target: &str) -> Assessment {
        let start = Instant::now();

        let target_tokens = tokenize(target);
        let (kind, score, match_type) = if target_tokens.len() == 1 {
            let (score, match_type) = self.assess_word(spoken, &target_tokens[0]);
            (PracticeKind::Word, score, match_type)
        } else {
            (PracticeKind::Sentence, self.aligner.score(spoken, target), None)
        };

        let passed = !score.word_verdicts.is_empty()
            && score.accuracy_percent >= self.config.pass_threshold_percent;

        let coaching = if self.config.coaching {
            Self::coaching_hints(&score.word_verdicts)
        } else {
            Vec::new()
        };

        let elapsed_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            "assess: kind={}, accuracy={}%, passed={}, missed={}, elapsed={}us",
            kind.display_name(),
            score.accuracy_percent,
            passed,
            coaching.len(),
            elapsed_us
        );

        Assessment {
            kind,
            accuracy_percent: score.accuracy_percent,
            passed,
            word_verdicts: score.word_verdicts,
            match_type,
            coaching,
            elapsed_us,
        }
    }

    /// Single-word item: the whole utterance is handed to the matcher
    fn assess_word(&self, spoken: &str, target: &Token) -> (SentenceScore, Option<MatchType>) {
        let found = self.matcher().explain(spoken, target.as_str());

        let spoken_word = match &found {
            // Containment or a phrase-level hit: the target itself was heard
            Some(m) if m.spoken.contains(' ') => Some(target.clone()),
            Some(m) => Token::parse(&m.spoken),
            // Miss: keep the last real word that was said
            None => self
                .aligner
                .filter_fillers(tokenize(spoken), std::slice::from_ref(target))
                .pop(),
        };

        let is_correct = found.is_some();
        let verdict = WordVerdict {
            position: 0,
            target_word: target.clone(),
            spoken_word,
            is_correct,
        };
        let score = SentenceScore {
            accuracy_percent: accuracy_percent(is_correct as usize, 1),
            word_verdicts: vec![verdict],
        };

        (score, found.map(|m| m.match_type))
    }

    fn coaching_hints(verdicts: &[WordVerdict]) -> Vec<CoachingHint> {
        verdicts
            .iter()
            .filter(|v| !v.is_correct)
            .map(|v| CoachingHint {
                position: v.position,
                word: v.target_word.to_string(),
                syllables: Syllabifier::syllabify(v.target_word.as_str()),
            })
            .collect()
    }
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_kind() {
        assert_eq!(PracticeKind::of("Cat!"), PracticeKind::Word);
        assert_eq!(PracticeKind::of("the cat"), PracticeKind::Sentence);
    }

    #[test]
    fn test_word_item_match() {
        let result = Assessor::default().assess("the word is cat", "cat");
        assert_eq!(result.kind, PracticeKind::Word);
        assert!(result.passed);
        assert_eq!(result.accuracy_percent, 100);
        assert_eq!(result.match_type, Some(MatchType::Containment));
        assert_eq!(result.word_verdicts.len(), 1);
        assert_eq!(
            result.word_verdicts[0].spoken_word.as_ref().map(Token::as_str),
            Some("cat")
        );
        assert!(result.coaching.is_empty());
    }

    #[test]
    fn test_word_item_miss_gets_coaching() {
        let result = Assessor::default().assess("um dog", "rabbit");
        assert!(!result.passed);
        assert_eq!(result.accuracy_percent, 0);
        assert_eq!(result.match_type, None);
        assert_eq!(
            result.word_verdicts[0].spoken_word.as_ref().map(Token::as_str),
            Some("dog")
        );
        assert_eq!(result.coaching.len(), 1);
        assert_eq!(result.coaching[0].syllables.joined(), "rabbit");
    }

    #[test]
    fn test_sentence_item_threshold() {
        let assessor = Assessor::default();

        let full = assessor.assess("the cat sat", "the cat sat");
        assert_eq!(full.kind, PracticeKind::Sentence);
        assert!(full.passed);

        // 67% < 80%
        let partial = assessor.assess("the sat", "the cat sat");
        assert!(!partial.passed);
        assert_eq!(partial.coaching.len(), 1);
        assert_eq!(partial.coaching[0].position, 1);
        assert_eq!(partial.coaching[0].word, "cat");
    }

    #[test]
    fn test_custom_threshold() {
        let mut config = EngineConfig::default();
        config.assessment.pass_threshold_percent = 60;
        config.assessment.coaching = false;
        let result = Assessor::new(&config).assess("the sat", "the cat sat");
        assert!(result.passed);
        assert!(result.coaching.is_empty());
    }

    #[test]
    fn test_empty_target_never_passes() {
        let mut config = EngineConfig::default();
        config.assessment.pass_threshold_percent = 0;
        let result = Assessor::new(&config).assess("anything", "");
        assert!(!result.passed);
        assert!(result.word_verdicts.is_empty());
    }

    #[test]
    fn test_serializes_to_json() {
        let result = Assessor::default().assess("the cat", "the cat sat");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "sentence");
        assert_eq!(json["word_verdicts"].as_array().unwrap().len(), 3);
        assert!(json.get("match_type").is_none());
    }
}
