// read-aloud command line front end
//
// Every command prints JSON on stdout; logs go to stderr (RUST_LOG).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use read_aloud_lib::config::{AlignmentMode, EngineConfig};
use read_aloud_lib::{
    init_logging, Assessor, HttpDictionaryLookup, SentenceAligner, Syllabifier, WordMatcher,
    WordValidator,
};

#[derive(Parser)]
#[command(name = "read-aloud", version, about = "Reading accuracy scoring")]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check one spoken chunk against a target word
    Match { spoken: String, target: String },
    /// Score a spoken sentence against its target
    Score {
        spoken: String,
        target: String,
        /// Use the dynamic-programming alignment
        #[arg(long)]
        optimal: bool,
    },
    /// Split words into syllable chunks
    Syllabify {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Score a practice attempt with pass/fail and coaching
    Assess { spoken: String, target: String },
    /// Validate a word for a practice list
    CheckWord {
        word: String,
        /// Skip the dictionary lookup
        #[arg(long)]
        offline: bool,
    },
}

#[derive(Serialize)]
struct SyllabifyOutput {
    word: String,
    syllables: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load_from_path(path)?,
        None => EngineConfig::load()?,
    };

    match cli.command {
        Command::Match { spoken, target } => {
            let matcher = WordMatcher::new(config.matcher.clone());
            let found = matcher.explain(&spoken, &target);
            print_json(&serde_json::json!({
                "is_match": found.is_some(),
                "details": found,
            }))?;
        }
        Command::Score {
            spoken,
            target,
            optimal,
        } => {
            let mut aligner_config = config.aligner.clone();
            if optimal {
                aligner_config.mode = AlignmentMode::Optimal;
            }
            let aligner =
                SentenceAligner::new(aligner_config, WordMatcher::new(config.matcher.clone()));
            print_json(&aligner.score(&spoken, &target))?;
        }
        Command::Syllabify { words } => {
            let output: Vec<SyllabifyOutput> = words
                .into_iter()
                .map(|word| {
                    let syllables = Syllabifier::syllabify(&word).into_vec();
                    SyllabifyOutput { word, syllables }
                })
                .collect();
            print_json(&output)?;
        }
        Command::Assess { spoken, target } => {
            let assessor = Assessor::new(&config);
            print_json(&assessor.assess(&spoken, &target))?;
        }
        Command::CheckWord { word, offline } => {
            let result = if offline || !config.dictionary.enabled {
                WordValidator::offline().validate(&word).await
            } else {
                let lookup = HttpDictionaryLookup::new(&config.dictionary);
                WordValidator::new(lookup).validate(&word).await
            };
            print_json(&result)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
