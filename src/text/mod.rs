//! Text layer - shared normalization and lookup tables
//!
//! Everything the matcher, aligner and syllabifier agree on about text:
//! 1. Unicode normalization + lowercase + whitespace folding
//! 2. Tokenization (punctuation stripped, internal apostrophes kept)
//! 3. Static rule tables (fillers, phonetic rewrites, digraphs, blends)
//! 4. Value types produced by the engine

pub mod rules;
pub mod tokenizer;
pub mod types;

pub use tokenizer::{normalize_phrase, tokenize};
pub use types::{MatchType, SentenceScore, SyllableList, Token, WordMatch, WordVerdict};
