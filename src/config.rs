// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Word matcher
// ============================================================================

/// Single-word fuzzy matching thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Targets up to this many characters count as "short"
    #[serde(default = "default_short_word_max_len")]
    pub short_word_max_len: usize,
    /// Max edit distance for short targets
    #[serde(default = "default_short_word_max_distance")]
    pub short_word_max_distance: usize,
    /// Max edit distance for longer targets
    #[serde(default = "default_long_word_max_distance")]
    pub long_word_max_distance: usize,
    /// Grapheme substitution table (th→f, ph→f, ...)
    #[serde(default = "default_true")]
    pub phonetic_rules: bool,
    /// Double Metaphone equivalence for longer targets (off by default)
    #[serde(default)]
    pub metaphone: bool,
}

fn default_short_word_max_len() -> usize {
    3
}

fn default_short_word_max_distance() -> usize {
    1
}

fn default_long_word_max_distance() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            short_word_max_len: default_short_word_max_len(),
            short_word_max_distance: default_short_word_max_distance(),
            long_word_max_distance: default_long_word_max_distance(),
            phonetic_rules: true,
            metaphone: false,
        }
    }
}

impl MatcherConfig {
    /// Edit distance tolerated for a target of `target_len` characters
    pub fn max_distance(&self, target_len: usize) -> usize {
        if target_len <= self.short_word_max_len {
            self.short_word_max_distance
        } else {
            self.long_word_max_distance
        }
    }
}

// ============================================================================
// Sentence aligner
// ============================================================================

/// Alignment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Greedy left-to-right with bounded lookahead (default)
    #[default]
    Greedy,
    /// Dynamic-programming alignment maximizing correct positions
    Optimal,
}

/// Sentence alignment settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignerConfig {
    #[serde(default)]
    pub mode: AlignmentMode,
    /// Spoken tokens examined per target position (cursor included)
    #[serde(default = "default_lookahead_window")]
    pub lookahead_window: usize,
    /// Later target positions checked for a skipped-ahead reader
    #[serde(default = "default_skip_ahead_window")]
    pub skip_ahead_window: usize,
    /// Added to the built-in filler vocabulary
    #[serde(default)]
    pub extra_filler_words: Vec<String>,
}

fn default_lookahead_window() -> usize {
    3
}

fn default_skip_ahead_window() -> usize {
    2
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::default(),
            lookahead_window: default_lookahead_window(),
            skip_ahead_window: default_skip_ahead_window(),
            extra_filler_words: Vec::new(),
        }
    }
}

// ============================================================================
// Assessment
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// accuracy >= threshold ⇒ passed
    #[serde(default = "default_pass_threshold_percent")]
    pub pass_threshold_percent: u8,
    /// Attach syllables of missed words
    #[serde(default = "default_true")]
    pub coaching: bool,
}

fn default_pass_threshold_percent() -> u8 {
    80
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            pass_threshold_percent: default_pass_threshold_percent(),
            coaching: true,
        }
    }
}

// ============================================================================
// Dictionary lookup
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Remote lookup for words outside the common-word set
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base URL; the word is appended as the last path segment
    #[serde(default = "default_dictionary_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_dictionary_endpoint() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_request_timeout_secs() -> u64 {
    6
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_dictionary_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// ============================================================================
// Engine config
// ============================================================================

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub aligner: AlignerConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("cannot resolve config directory"))?;
        let app_dir = config_dir.join("ReadAloud");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("config.json"))
    }

    /// Load from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::info!("loading config from {:?}", path);

        if !path.exists() {
            tracing::warn!("config file not found, using defaults");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: EngineConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {:?}: {}", path, e))?;
        config.sanitize();
        Ok(config)
    }

    /// Clamp values that would make the engine misbehave
    pub fn sanitize(&mut self) {
        if self.aligner.lookahead_window == 0 {
            tracing::warn!("aligner.lookahead_window must be >= 1, using 1");
            self.aligner.lookahead_window = 1;
        }
        if self.assessment.pass_threshold_percent > 100 {
            tracing::warn!(
                "assessment.pass_threshold_percent {} > 100, using 100",
                self.assessment.pass_threshold_percent
            );
            self.assessment.pass_threshold_percent = 100;
        }
        if self.matcher.short_word_max_distance > self.matcher.long_word_max_distance {
            tracing::warn!(
                "matcher.short_word_max_distance ({}) exceeds long_word_max_distance ({})",
                self.matcher.short_word_max_distance,
                self.matcher.long_word_max_distance
            );
        }
        self.aligner.extra_filler_words = self
            .aligner
            .extra_filler_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// Atomic write: temp file, then rename over the target
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tracing::info!("saving config to {:?}", path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("failed to write temp config: {}", e);
            e
        })?;

        if let Err(e) = std::fs::rename(&temp_path, path) {
            tracing::error!("failed to replace config: {}", e);
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }
}
