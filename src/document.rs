//! In-memory document record
//!
//! Documents live only as long as the process; nothing is persisted.

use crate::merge::apply_suggestions;
use crate::models::Suggestion;
use crate::text::word_count;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// A piece of writing being worked on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub word_count: usize,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            word_count: word_count(&content),
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Load a document from a text file, titled after the file stem
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        Ok(Self::new(title, content))
    }

    /// Replace the content, refreshing word count and `updated_at`
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.word_count = word_count(&self.content);
        self.updated_at = Utc::now();
    }

    /// Accept suggestions made against the current content.
    ///
    /// Returns how many replacements were applied. Content is untouched
    /// when none apply.
    pub fn apply(&mut self, suggestions: &[Suggestion]) -> usize {
        let (fixed, applied) = apply_suggestions(&self.content, suggestions);
        if applied > 0 {
            self.set_content(fixed);
        }
        applied
    }
}
