//! CLI command definitions and handlers

mod check;
mod fix;
mod init;
mod rules;
mod sample;
mod stats;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use esl_coach::ai::{AiClient, LlmBackend};
use esl_coach::analyzer::Analyzer;
use esl_coach::config::UserConfig;
use esl_coach::models::{Category, ProficiencyLevel, Profile, Severity};
use esl_coach::reporters::OutputFormat;
use esl_coach::rules::RuleEngine;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// esl-coach - writing feedback for English learners
#[derive(Parser, Debug)]
#[command(name = "esl-coach")]
#[command(
    version,
    about = "Writing feedback for English learners: ranked corrections and a 0-100 score",
    long_about = "esl-coach checks English text written by learners. Local grammar rules \
always run; when an LLM backend is configured its review is merged in. If the model is \
unavailable the local rules and a deterministic score are used instead.\n\n\
Configure backends and defaults in ~/.config/esl-coach/config.toml (see `esl-coach init`).",
    after_help = "\
Examples:
  esl-coach check essay.txt                      Check a file
  echo \"I has a dog.\" | esl-coach check          Check stdin
  esl-coach check essay.txt --level a2 --native-language Japanese
  esl-coach check essay.txt --offline --format json
  esl-coach fix essay.txt                        Print the corrected text
  esl-coach sample --level beginner | esl-coach check --level beginner"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that run an analysis
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Proficiency level: beginner, intermediate, advanced, or a CEFR band (a1-c2)
    #[arg(long, short = 'l')]
    pub level: Option<ProficiencyLevel>,

    /// Writer's native language, used for targeted tips
    #[arg(long)]
    pub native_language: Option<String>,

    /// Category to prioritise (repeatable): grammar, spelling, punctuation, vocabulary, style, clarity
    #[arg(long)]
    pub focus: Vec<Category>,

    /// Use local rules only, never call the model
    #[arg(long)]
    pub offline: bool,

    /// LLM backend: anthropic, openai, openrouter, deepinfra, ollama
    #[arg(long)]
    pub backend: Option<LlmBackend>,

    /// Model name (overrides the backend default)
    #[arg(long)]
    pub model: Option<String>,

    /// Minimum severity to report (info, low, medium, high)
    #[arg(long)]
    pub min_severity: Option<Severity>,
}

impl AnalysisArgs {
    /// Writer profile: config file, then flags
    fn profile(&self, config: &UserConfig) -> Result<Profile> {
        let mut profile = config.profile()?;
        if let Some(level) = self.level {
            profile.level = level;
        }
        if let Some(lang) = &self.native_language {
            profile.native_language = Some(lang.clone());
        }
        if !self.focus.is_empty() {
            profile.focus = self.focus.clone();
        }
        Ok(profile)
    }

    /// Build the analyzer: rules from config, model unless offline
    fn analyzer(&self, config: &UserConfig, top: Option<usize>) -> Result<Analyzer> {
        let mut options = config.analyzer_options()?;
        if let Some(min) = self.min_severity {
            options.min_severity = min;
        }
        if let Some(top) = top {
            options.max_suggestions = top;
        }

        let engine = RuleEngine::builder()
            .builtin()
            .disable_all(config.disabled_rules().iter().cloned())
            .build();
        let analyzer = Analyzer::new(engine).with_options(options);

        if self.offline || !config.ai_enabled() {
            debug!("Model review disabled");
            return Ok(analyzer);
        }

        let mut ai_config = config.ai_config()?;
        if let Some(backend) = self.backend {
            ai_config.backend = backend;
        }
        if self.model.is_some() {
            ai_config.model = self.model.clone();
        }
        let key = config.api_key_for(ai_config.backend);
        match AiClient::with_key(ai_config, key) {
            Ok(client) => Ok(analyzer.with_model(Box::new(client))),
            Err(e) => {
                info!("Model review unavailable, using local rules only: {}", e);
                Ok(analyzer)
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a text and print suggestions with a score
    #[command(after_help = "\
Examples:
  esl-coach check essay.txt                     Text report
  esl-coach check essay.txt --format json       JSON for scripting
  esl-coach check essay.txt --focus grammar     Rank grammar issues first
  esl-coach check essay.txt --fail-under 70     Exit code 1 below 70
  esl-coach check essay.txt --explain-score     Show how the score was computed")]
    Check {
        /// Text file to check (stdin when omitted or "-")
        file: Option<PathBuf>,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text")]
        format: OutputFormat,

        /// Maximum suggestions to show
        #[arg(long)]
        top: Option<usize>,

        /// Exit with code 1 if the score is below this value
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        fail_under: Option<u8>,

        /// Explain the scoring formula with full breakdown
        #[arg(long)]
        explain_score: bool,
    },

    /// Print the text with suggested corrections applied
    Fix {
        /// Text file to fix (stdin when omitted or "-")
        file: Option<PathBuf>,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Overwrite FILE with the corrected text instead of printing it
        #[arg(long, requires = "file")]
        write: bool,
    },

    /// List the built-in grammar rules
    Rules {
        /// Only show rules in this category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Print a practice text with typical learner mistakes
    Sample {
        /// Proficiency level of the sample
        #[arg(long, short = 'l', default_value = "intermediate")]
        level: ProficiencyLevel,

        /// Which sample to print (1-based; default rotates daily)
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        index: Option<usize>,
    },

    /// Show word, sentence and vocabulary statistics
    Stats {
        /// Text file (stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text")]
        format: OutputFormat,
    },

    /// Create ~/.config/esl-coach/config.toml with example settings
    Init,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check {
            file,
            analysis,
            format,
            top,
            fail_under,
            explain_score,
        } => {
            let config = UserConfig::load()?;
            check::run(
                file.as_deref(),
                &analysis,
                &config,
                format,
                top,
                fail_under,
                explain_score,
            )
        }
        Commands::Fix {
            file,
            analysis,
            write,
        } => {
            let config = UserConfig::load()?;
            fix::run(file.as_deref(), &analysis, &config, write)
        }
        Commands::Rules { category } => rules::run(category),
        Commands::Sample { level, index } => sample::run(level, index),
        Commands::Stats { file, format } => stats::run(file.as_deref(), format),
        Commands::Init => init::run(),
    }
}

/// Whether `file` means "read stdin"
fn is_stdin(file: Option<&Path>) -> bool {
    file.map_or(true, |p| p.as_os_str() == "-")
}

/// Read the input text from a file or stdin
fn read_input(file: Option<&Path>) -> Result<String> {
    match file.filter(|_| !is_stdin(file)) {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            Ok(text)
        }
    }
}
