//! Configuration module for esl-coach
//!
//! This module handles:
//! - The user config file (~/.config/esl-coach/config.toml)
//! - Environment variable overrides (API keys, backend, model)
//! - Conversion into AI client settings, the writer profile and analyzer options
//!
//! CLI flags are applied on top by the `check` command.

mod user_config;

pub use user_config::{AiSettings, AnalysisSettings, UserConfig};
