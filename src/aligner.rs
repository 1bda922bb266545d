//! Sentence aligner
//!
//! Maps a spoken transcript onto the words of a target sentence and scores it.
//!
//! ## Flow
//! 1. Tokenize both sides
//! 2. Drop filler words from the spoken side
//! 3. Align (greedy with bounded lookahead, or optimal DP)
//! 4. One verdict per target word, accuracy = correct / target words

use std::collections::HashSet;

use crate::config::{AlignerConfig, AlignmentMode};
use crate::matcher::WordMatcher;
use crate::text::rules::is_filler;
use crate::text::tokenizer::tokenize;
use crate::text::types::{SentenceScore, Token, WordVerdict};

/// Alignment step for the DP mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlignOp {
    /// Spoken word placed at the target position (right or wrong)
    Assign,
    /// Spoken word treated as an insertion
    SkipSpoken,
    /// Target word left without a spoken word
    Omit,
}

/// (correct positions, exact positions), compared lexicographically
type Gain = (u32, u32);

/// Sentence aligner and scorer
#[derive(Debug, Clone)]
pub struct SentenceAligner {
    config: AlignerConfig,
    matcher: WordMatcher,
    extra_fillers: HashSet<String>,
}

impl SentenceAligner {
    pub fn new(config: AlignerConfig, matcher: WordMatcher) -> Self {
        let extra_fillers = config
            .extra_filler_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            config,
            matcher,
            extra_fillers,
        }
    }

    pub fn matcher(&self) -> &WordMatcher {
        &self.matcher
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Score a spoken transcript against a target sentence
    ///
    /// Always returns exactly one verdict per target token.
    pub fn score(&self, spoken: &str, target: &str) -> SentenceScore {
        let target_tokens = tokenize(target);
        if target_tokens.is_empty() {
            return SentenceScore::empty();
        }

        let spoken_tokens = self.filter_fillers(tokenize(spoken), &target_tokens);

        let verdicts = match self.config.mode {
            AlignmentMode::Greedy => self.align_greedy(&spoken_tokens, &target_tokens),
            AlignmentMode::Optimal => self.align_optimal(&spoken_tokens, &target_tokens),
        };
        debug_assert_eq!(verdicts.len(), target_tokens.len());

        let score = SentenceScore::from_verdicts(verdicts);
        tracing::debug!(
            "score: mode={:?}, target_words={}, spoken_words={}, correct={}, accuracy={}%",
            self.config.mode,
            target_tokens.len(),
            spoken_tokens.len(),
            score.correct_count(),
            score.accuracy_percent
        );
        score
    }

    /// Remove hesitation words
    ///
    /// A filler that is itself one of the target words is kept ("I like cats").
    pub fn filter_fillers(&self, spoken: Vec<Token>, target: &[Token]) -> Vec<Token> {
        let in_target: HashSet<&str> = target.iter().map(Token::as_str).collect();

        spoken
            .into_iter()
            .filter(|token| {
                let word = token.as_str();
                !self.is_filler(word) || in_target.contains(word)
            })
            .collect()
    }

    fn is_filler(&self, word: &str) -> bool {
        is_filler(word) || self.extra_fillers.contains(word)
    }

    /// Target positions after `index` inside the skip-ahead window
    fn later_targets<'a>(&self, target: &'a [Token], index: usize) -> &'a [Token] {
        let start = (index + 1).min(target.len());
        let end = (index + 1 + self.config.skip_ahead_window).min(target.len());
        &target[start..end]
    }

    /// Lookahead acceptance of `spoken` for `target[index]`
    ///
    /// A fuzzy match is refused when the spoken word is, verbatim, one of the
    /// next target words: "the sat" vs "the cat sat" leaves "cat" omitted
    /// instead of crediting "sat" for it.
    fn accepts(&self, spoken: &Token, target: &[Token], index: usize) -> bool {
        let target_word = &target[index];
        if spoken == target_word {
            return true;
        }
        if !self.matcher.is_match(spoken.as_str(), target_word.as_str()) {
            return false;
        }
        !self
            .later_targets(target, index)
            .iter()
            .any(|later| later == spoken)
    }

    /// Spoken word belongs to a target position just after `index`
    fn belongs_later(&self, spoken: &Token, target: &[Token], index: usize) -> bool {
        self.later_targets(target, index)
            .iter()
            .any(|later| self.matcher.is_match(spoken.as_str(), later.as_str()))
    }

    /// Greedy left-to-right pass with a forward-only spoken cursor
    fn align_greedy(&self, spoken: &[Token], target: &[Token]) -> Vec<WordVerdict> {
        let mut verdicts = Vec::with_capacity(target.len());
        let mut cursor = 0usize;

        for (index, target_word) in target.iter().enumerate() {
            if cursor >= spoken.len() {
                verdicts.push(WordVerdict::omitted(index, target_word.clone()));
                continue;
            }

            // Lookahead: first acceptable spoken word in the window; skipped ones are noise
            let window_end = (cursor + self.config.lookahead_window.max(1)).min(spoken.len());
            let found = (cursor..window_end).find(|&k| self.accepts(&spoken[k], target, index));
            if let Some(found) = found {
                verdicts.push(WordVerdict {
                    position: index,
                    target_word: target_word.clone(),
                    spoken_word: Some(spoken[found].clone()),
                    is_correct: true,
                });
                cursor = found + 1;
                continue;
            }

            // Skip-ahead: reader jumped past this word, keep the cursor for later
            if self.belongs_later(&spoken[cursor], target, index) {
                verdicts.push(WordVerdict::omitted(index, target_word.clone()));
                continue;
            }

            // Record what was actually said here
            let spoken_word = spoken[cursor].clone();
            let is_correct = self
                .matcher
                .is_match(spoken_word.as_str(), target_word.as_str());
            verdicts.push(WordVerdict {
                position: index,
                target_word: target_word.clone(),
                spoken_word: Some(spoken_word),
                is_correct,
            });
            cursor += 1;
        }

        verdicts
    }

    /// Order-preserving alignment maximizing correct positions, then exact ones
    fn align_optimal(&self, spoken: &[Token], target: &[Token]) -> Vec<WordVerdict> {
        let gains = self.gain_matrix(spoken, target);
        let table = align_table(&gains, target.len(), spoken.len());
        let ops = build_ops(&gains, &table, target.len(), spoken.len());

        let mut verdicts = Vec::with_capacity(target.len());
        let mut i = 0usize;
        let mut j = 0usize;
        for op in ops {
            match op {
                AlignOp::Assign => {
                    verdicts.push(WordVerdict {
                        position: i,
                        target_word: target[i].clone(),
                        spoken_word: Some(spoken[j].clone()),
                        is_correct: gains[i][j].0 > 0,
                    });
                    i += 1;
                    j += 1;
                }
                AlignOp::SkipSpoken => j += 1,
                AlignOp::Omit => {
                    verdicts.push(WordVerdict::omitted(i, target[i].clone()));
                    i += 1;
                }
            }
        }

        verdicts
    }

    /// gains[i][j]: value of placing spoken[j] at target[i]
    fn gain_matrix(&self, spoken: &[Token], target: &[Token]) -> Vec<Vec<Gain>> {
        target
            .iter()
            .map(|t| {
                spoken
                    .iter()
                    .map(|s| {
                        if s == t {
                            (1, 1)
                        } else if self.matcher.is_match(s.as_str(), t.as_str()) {
                            (1, 0)
                        } else {
                            (0, 0)
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for SentenceAligner {
    fn default() -> Self {
        Self::new(AlignerConfig::default(), WordMatcher::default())
    }
}

fn add(a: Gain, b: Gain) -> Gain {
    (a.0 + b.0, a.1 + b.1)
}

/// table[i][j]: best gain aligning target[i..] with spoken[j..]
fn align_table(gains: &[Vec<Gain>], n: usize, m: usize) -> Vec<Vec<Gain>> {
    let mut table = vec![vec![(0u32, 0u32); m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            let assign = add(gains[i][j], table[i + 1][j + 1]);
            table[i][j] = assign.max(table[i][j + 1]).max(table[i + 1][j]);
        }
    }
    table
}

/// Walk the table front to back; ties prefer Assign, then SkipSpoken, then Omit
fn build_ops(gains: &[Vec<Gain>], table: &[Vec<Gain>], n: usize, m: usize) -> Vec<AlignOp> {
    let mut ops = Vec::with_capacity(n + m);
    let mut i = 0usize;
    let mut j = 0usize;
    while i < n {
        if j >= m {
            ops.push(AlignOp::Omit);
            i += 1;
            continue;
        }
        let best = table[i][j];
        if add(gains[i][j], table[i + 1][j + 1]) == best {
            ops.push(AlignOp::Assign);
            i += 1;
            j += 1;
        } else if table[i][j + 1] == best {
            ops.push(AlignOp::SkipSpoken);
            j += 1;
        } else {
            ops.push(AlignOp::Omit);
            i += 1;
        }
    }
    ops
}
