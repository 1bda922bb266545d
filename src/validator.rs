// Word validator
//
// Decides whether a user-submitted word may be added to a practice list:
// 1. Shape check (letters, internal apostrophes / hyphens)
// 2. Built-in common-word set
// 3. Injected dictionary lookup (HTTP in production, fakes in tests)

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::DictionaryConfig;

/// Longest word accepted for a practice list
const MAX_WORD_CHARS: usize = 32;

lazy_static::lazy_static! {
    /// Early-reader sight words, accepted without a lookup
    static ref COMMON_WORDS: HashSet<&'static str> = [
        "a", "about", "after", "again", "all", "always", "am", "an", "and", "any",
        "are", "around", "as", "ask", "at", "ate", "away", "baby", "back", "ball",
        "be", "bear", "because", "bed", "been", "before", "best", "better", "big",
        "bird", "black", "blue", "boat", "book", "both", "box", "boy", "bring",
        "brown", "but", "buy", "by", "cake", "call", "came", "can", "car", "carry",
        "cat", "clean", "cold", "come", "could", "cow", "cut", "day", "did", "do",
        "does", "dog", "don't", "done", "door", "down", "draw", "drink", "duck",
        "eat", "egg", "eight", "every", "eye", "fall", "far", "fast", "find", "first",
        "fish", "five", "fly", "for", "found", "four", "friend", "frog", "from",
        "full", "funny", "gave", "get", "girl", "give", "go", "goes", "going", "good",
        "got", "green", "grow", "had", "has", "hat", "have", "he", "help", "her",
        "here", "him", "his", "hold", "home", "horse", "hot", "house", "how", "hurt",
        "i", "if", "in", "into", "is", "it", "its", "jump", "just", "keep", "kind",
        "know", "laugh", "let", "light", "like", "little", "live", "long", "look",
        "made", "make", "man", "many", "may", "me", "milk", "moon", "mother", "much",
        "must", "my", "myself", "never", "new", "night", "no", "not", "now", "of",
        "off", "old", "on", "once", "one", "only", "open", "or", "our", "out", "over",
        "own", "pick", "pig", "play", "please", "pretty", "pull", "put", "rabbit",
        "rain", "ran", "read", "red", "ride", "right", "round", "run", "said", "sat",
        "saw", "say", "school", "see", "seven", "shall", "she", "show", "sing", "sit",
        "six", "sleep", "small", "so", "some", "soon", "start", "stop", "sun", "take",
        "tell", "ten", "thank", "that", "the", "their", "them", "then", "there",
        "these", "they", "think", "this", "those", "three", "to", "today", "together",
        "too", "tree", "try", "two", "under", "up", "upon", "us", "use", "very", "walk",
        "want", "warm", "was", "wash", "water", "we", "well", "went", "were", "what",
        "when", "where", "which", "white", "who", "why", "will", "wish", "with",
        "work", "would", "write", "yellow", "yes", "you", "your",
    ]
    .into_iter()
    .collect();
}

/// Where a validation verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationSource {
    /// Not word-shaped
    InvalidFormat,
    /// Built-in common-word set
    CommonWord,
    /// Confirmed by the dictionary lookup
    Dictionary,
    /// Dictionary lookup says no
    NotFound,
    /// Dictionary lookup errored
    LookupFailed,
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordValidation {
    /// Normalized word
    pub word: String,
    pub valid: bool,
    pub source: ValidationSource,
}

/// External dictionary capability
#[allow(async_fn_in_trait)]
pub trait DictionaryLookup {
    /// `Ok(true)` when the dictionary knows the word
    async fn contains(&self, word: &str) -> Result<bool>;
}

/// Lookup that knows no words (offline mode)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDictionary;

impl DictionaryLookup for NoDictionary {
    async fn contains(&self, _word: &str) -> Result<bool> {
        Ok(false)
    }
}

/// Dictionary REST lookup (`GET {endpoint}/{word}`)
#[derive(Clone)]
pub struct HttpDictionaryLookup {
    endpoint: String,
    client: Client,
}

impl HttpDictionaryLookup {
    pub fn new(config: &DictionaryConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            endpoint: config.endpoint.clone(),
            client,
        }
    }

    /// Full entry URL for a word
    pub fn entry_url(&self, word: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), word)
    }
}

impl DictionaryLookup for HttpDictionaryLookup {
    async fn contains(&self, word: &str) -> Result<bool> {
        let url = self.entry_url(word);
        tracing::debug!("dictionary lookup: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        match status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => {
                let text = response.text().await.unwrap_or_default();
                anyhow::bail!("dictionary lookup failed ({}): {}", status, text);
            }
        }
    }
}

/// Word validator
pub struct WordValidator<L: DictionaryLookup> {
    lookup: L,
}

impl WordValidator<NoDictionary> {
    /// Validator without a dictionary: only common words pass
    pub fn offline() -> Self {
        Self::new(NoDictionary)
    }
}

impl<L: DictionaryLookup> WordValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub async fn validate(&self, raw: &str) -> WordValidation {
        let (word, quick) = quick_check(raw);
        if let Some(verdict) = quick {
            return verdict;
        }

        let (valid, source) = match self.lookup.contains(&word).await {
            Ok(true) => (true, ValidationSource::Dictionary),
            Ok(false) => (false, ValidationSource::NotFound),
            Err(e) => {
                tracing::warn!("dictionary lookup for {:?} failed: {}", word, e);
                (false, ValidationSource::LookupFailed)
            }
        };

        WordValidation {
            word,
            valid,
            source,
        }
    }
}

/// Check a word without touching the dictionary
///
/// `None` means only the dictionary can decide.
pub fn quick_check(raw: &str) -> (String, Option<WordValidation>) {
    let word = raw.trim().to_lowercase();

    if !is_well_formed(&word) {
        let verdict = WordValidation {
            word: word.clone(),
            valid: false,
            source: ValidationSource::InvalidFormat,
        };
        return (word, Some(verdict));
    }

    if COMMON_WORDS.contains(word.as_str()) {
        let verdict = WordValidation {
            word: word.clone(),
            valid: true,
            source: ValidationSource::CommonWord,
        };
        return (word, Some(verdict));
    }

    (word, None)
}

/// Letters, with apostrophes / hyphens only between letters
fn is_well_formed(word: &str) -> bool {
    let len = word.chars().count();
    if len == 0 || len > MAX_WORD_CHARS {
        return false;
    }

    let starts_with_letter = word.chars().next().is_some_and(char::is_alphabetic);
    let ends_with_letter = word.chars().last().is_some_and(char::is_alphabetic);

    starts_with_letter
        && ends_with_letter
        && word
            .chars()
            .all(|c| c.is_alphabetic() || c == '\'' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeDictionary {
        words: HashSet<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeDictionary {
        fn new(words: &[&'static str]) -> Self {
            Self {
                words: words.iter().copied().collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DictionaryLookup for FakeDictionary {
        async fn contains(&self, word: &str) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.words.contains(word))
        }
    }

    struct BrokenDictionary;

    impl DictionaryLookup for BrokenDictionary {
        async fn contains(&self, _word: &str) -> Result<bool> {
            anyhow::bail!("network unreachable")
        }
    }

    #[tokio::test]
    async fn test_common_word_skips_lookup() {
        let validator = WordValidator::new(FakeDictionary::new(&[]));
        let result = validator.validate("  Rabbit ").await;
        assert!(result.valid);
        assert_eq!(result.word, "rabbit");
        assert_eq!(result.source, ValidationSource::CommonWord);
        assert_eq!(validator.lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dictionary_lookup() {
        let validator = WordValidator::new(FakeDictionary::new(&["xylophone"]));

        let known = validator.validate("Xylophone").await;
        assert!(known.valid);
        assert_eq!(known.source, ValidationSource::Dictionary);

        let unknown = validator.validate("blorptastic").await;
        assert!(!unknown.valid);
        assert_eq!(unknown.source, ValidationSource::NotFound);

        assert_eq!(validator.lookup.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_format() {
        let validator = WordValidator::new(FakeDictionary::new(&[]));
        for raw in ["", "   ", "cat1", "two words", "-dash", "dash-", "'tis", "a!"] {
            let result = validator.validate(raw).await;
            assert!(!result.valid, "{:?} should be rejected", raw);
            assert_eq!(result.source, ValidationSource::InvalidFormat);
        }
        assert_eq!(validator.lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_internal_punctuation_allowed() {
        let validator = WordValidator::new(FakeDictionary::new(&["well-known", "o'clock"]));
        assert!(validator.validate("well-known").await.valid);
        assert!(validator.validate("o'clock").await.valid);
    }

    #[tokio::test]
    async fn test_lookup_failure_rejects() {
        let validator = WordValidator::new(BrokenDictionary);
        let result = validator.validate("xylophone").await;
        assert!(!result.valid);
        assert_eq!(result.source, ValidationSource::LookupFailed);
    }

    #[tokio::test]
    async fn test_offline_validator() {
        let validator = WordValidator::offline();
        assert!(validator.validate("the").await.valid);
        assert_eq!(
            validator.validate("xylophone").await.source,
            ValidationSource::NotFound
        );
    }

    #[test]
    fn test_entry_url() {
        let lookup = HttpDictionaryLookup::new(&DictionaryConfig {
            endpoint: "https://dict.example.com/entries/en/".to_string(),
            ..DictionaryConfig::default()
        });
        assert_eq!(
            lookup.entry_url("cat"),
            "https://dict.example.com/entries/en/cat"
        );
    }
}
