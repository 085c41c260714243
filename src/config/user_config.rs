//! User-level configuration for esl-coach
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/esl-coach/config.toml

use crate::ai::{AiConfig, LlmBackend};
use crate::analyzer::AnalyzerOptions;
use crate::models::{Category, ProficiencyLevel, Profile, Severity};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXAMPLE_CONFIG: &str = r#"# esl-coach User Configuration

[ai]
# Set to false to always use the local rules only
# enabled = true

# Backend: "anthropic" (default), "openai", "openrouter", "deepinfra" or "ollama" (free, local)
# backend = "anthropic"
# model = "claude-sonnet-4-20250514"
# timeout_secs = 60

# Keys can also come from ANTHROPIC_API_KEY, OPENAI_API_KEY,
# OPENROUTER_API_KEY or DEEPINFRA_API_KEY
# anthropic_api_key = "sk-ant-..."
# openai_api_key = "sk-..."

[analysis]
# beginner, intermediate, advanced, or a CEFR band (a1 ... c2)
# level = "intermediate"
# native_language = "Spanish"
# focus = ["grammar", "vocabulary"]
# max_suggestions = 50
# min_severity = "info"
# disabled_rules = ["weak-intensifier"]
# Share of the final score taken from the model (0.0 - 1.0)
# model_weight = 0.6
# max_input_chars = 20000
"#;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub ai: AiSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiSettings {
    /// Use the model at all (default: true)
    pub enabled: Option<bool>,

    /// LLM backend name (default: anthropic)
    pub backend: Option<String>,

    /// Model override; each backend has its own default
    pub model: Option<String>,

    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub deepinfra_api_key: Option<String>,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisSettings {
    pub level: Option<String>,
    pub native_language: Option<String>,
    pub focus: Option<Vec<String>>,
    pub max_suggestions: Option<usize>,
    pub min_severity: Option<String>,
    pub disabled_rules: Option<Vec<String>>,
    pub model_weight: Option<f64>,
    pub max_input_chars: Option<usize>,
}

macro_rules! take_some {
    ($self:ident, $other:ident, $section:ident: $($field:ident),+ $(,)?) => {
        $(
            if $other.$section.$field.is_some() {
                $self.$section.$field = $other.$section.$field;
            }
        )+
    };
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/esl-coach/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = match Self::user_config_path().filter(|p| p.exists()) {
            Some(path) => Self::load_from(&path)?,
            None => UserConfig::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load a config file without applying environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = UserConfig::default();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        match toml::from_str::<UserConfig>(&content) {
            Ok(file_config) => {
                debug!("Loaded user config from {}", path.display());
                config.merge(file_config);
            }
            Err(e) => warn!("Ignoring invalid config file {}: {}", path.display(), e),
        }
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`)
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty("ANTHROPIC_API_KEY") {
            self.ai.anthropic_api_key = Some(key);
        }
        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.ai.openai_api_key = Some(key);
        }
        if let Some(key) = non_empty("OPENROUTER_API_KEY") {
            self.ai.openrouter_api_key = Some(key);
        }
        if let Some(key) = non_empty("DEEPINFRA_API_KEY") {
            self.ai.deepinfra_api_key = Some(key);
        }
        if let Some(backend) = non_empty("ESL_COACH_BACKEND") {
            self.ai.backend = Some(backend);
        }
        if let Some(model) = non_empty("ESL_COACH_MODEL") {
            self.ai.model = Some(model);
        }
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("esl-coach").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        take_some!(self, other, ai:
            enabled, backend, model, anthropic_api_key, openai_api_key,
            openrouter_api_key, deepinfra_api_key, timeout_secs,
        );
        take_some!(self, other, analysis:
            level, native_language, focus, max_suggestions, min_severity,
            disabled_rules, model_weight, max_input_chars,
        );
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.enabled.unwrap_or(true)
    }

    pub fn backend(&self) -> Result<LlmBackend> {
        match self.ai.backend.as_deref() {
            Some(name) => Ok(name.parse::<LlmBackend>()?),
            None => Ok(LlmBackend::default()),
        }
    }

    /// API key configured for `backend`, if any
    pub fn api_key_for(&self, backend: LlmBackend) -> Option<&str> {
        match backend {
            LlmBackend::Anthropic => self.ai.anthropic_api_key.as_deref(),
            LlmBackend::OpenAi => self.ai.openai_api_key.as_deref(),
            LlmBackend::OpenRouter => self.ai.openrouter_api_key.as_deref(),
            LlmBackend::Deepinfra => self.ai.deepinfra_api_key.as_deref(),
            LlmBackend::Ollama => None,
        }
    }

    pub fn ai_config(&self) -> Result<AiConfig> {
        let defaults = AiConfig::default();
        Ok(AiConfig {
            backend: self.backend()?,
            model: self.ai.model.clone(),
            timeout_secs: self.ai.timeout_secs.unwrap_or(defaults.timeout_secs),
            ..defaults
        })
    }

    /// Writer profile from the `[analysis]` section
    pub fn profile(&self) -> Result<Profile> {
        let level = match self.analysis.level.as_deref() {
            Some(level) => level.parse::<ProficiencyLevel>().map_err(anyhow::Error::msg)?,
            None => ProficiencyLevel::default(),
        };
        let focus = self
            .analysis
            .focus
            .iter()
            .flatten()
            .map(|c| c.parse::<Category>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?;

        let mut profile = Profile::new(level).with_focus(focus);
        profile.native_language = self
            .analysis
            .native_language
            .clone()
            .filter(|l| !l.trim().is_empty());
        Ok(profile)
    }

    pub fn analyzer_options(&self) -> Result<AnalyzerOptions> {
        let defaults = AnalyzerOptions::default();
        let min_severity = match self.analysis.min_severity.as_deref() {
            Some(s) => s.parse::<Severity>().map_err(anyhow::Error::msg)?,
            None => defaults.min_severity,
        };
        let model_weight = self.analysis.model_weight.unwrap_or(defaults.model_weight);
        if !(0.0..=1.0).contains(&model_weight) {
            anyhow::bail!("model_weight must be between 0.0 and 1.0, got {}", model_weight);
        }
        Ok(AnalyzerOptions {
            max_suggestions: self.analysis.max_suggestions.unwrap_or(defaults.max_suggestions),
            min_severity,
            max_input_chars: self.analysis.max_input_chars.unwrap_or(defaults.max_input_chars),
            model_weight,
        })
    }

    pub fn disabled_rules(&self) -> &[String] {
        self.analysis.disabled_rules.as_deref().unwrap_or(&[])
    }

    /// Write the example config to `path` unless a file already exists.
    /// Returns whether a file was written.
    pub fn write_example(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }
}
