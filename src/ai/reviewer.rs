//! One round trip to the model: prompt, reply, located suggestions

use crate::ai::{
    locate_suggestions, parse_review, AiResult, LanguageModel, Message, PromptTemplate,
    ReviewPromptBuilder, DEFAULT_MAX_MODEL_SUGGESTIONS,
};
use crate::models::{Profile, Suggestion};
use std::time::Instant;
use tracing::{debug, info};

/// What the model contributed to an analysis
#[derive(Debug, Clone, Default)]
pub struct ModelOutcome {
    /// Suggestions that were found in the text
    pub suggestions: Vec<Suggestion>,
    /// Model's 0-100 score, if it gave one
    pub score: Option<f64>,
    pub summary: Option<String>,
    /// Suggestions the model reported but that could not be located
    pub dropped: usize,
}

/// Reviews text with a [`LanguageModel`]
pub struct ModelReviewer {
    model: Box<dyn LanguageModel>,
    max_suggestions: usize,
}

impl ModelReviewer {
    pub fn new(model: Box<dyn LanguageModel>) -> Self {
        Self {
            model,
            max_suggestions: DEFAULT_MAX_MODEL_SUGGESTIONS,
        }
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.max(1);
        self
    }

    pub fn name(&self) -> String {
        self.model.name()
    }

    /// Ask the model to review `text` for `profile`.
    ///
    /// Transport and parse failures are returned as errors; the caller
    /// decides whether to fall back to rules.
    pub fn review(&self, text: &str, profile: &Profile) -> AiResult<ModelOutcome> {
        let prompt = ReviewPromptBuilder::new(text, profile)
            .max_suggestions(self.max_suggestions)
            .build();
        let system = PromptTemplate::system_prompt(profile.level);

        let started = Instant::now();
        let reply = self.model.generate(vec![Message::user(prompt)], Some(system))?;
        debug!(
            "{} replied with {} chars in {:?}",
            self.model.name(),
            reply.len(),
            started.elapsed()
        );

        let review = parse_review(&reply)?;
        let suggestions = locate_suggestions(text, &review);
        let dropped = review.suggestions.len().saturating_sub(suggestions.len());
        info!(
            "Model review: {} suggestion(s), {} dropped, score {:?}",
            suggestions.len(),
            dropped,
            review.score
        );

        Ok(ModelOutcome {
            suggestions,
            score: review.score,
            summary: review.summary,
            dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiError;
    use std::sync::Mutex;

    struct Scripted {
        reply: AiResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl LanguageModel for Scripted {
        fn name(&self) -> String {
            "scripted".into()
        }

        fn generate(&self, messages: Vec<Message>, system: Option<&str>) -> AiResult<String> {
            assert!(system.is_some());
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.into_iter().map(|m| m.content));
            match &self.reply {
                Ok(r) => Ok(r.clone()),
                Err(_) => Err(AiError::RequestFailed("offline".into())),
            }
        }
    }

    #[test]
    fn test_review_locates_suggestions() {
        let model = Scripted::ok(
            r#"{"score": 64, "summary": "Nice story.", "suggestions": [
                {"original": "goed", "replacement": "went", "category": "grammar", "severity": "high"},
                {"original": "missing", "replacement": "x"}
            ]}"#,
        );
        let reviewer = ModelReviewer::new(Box::new(model));
        let outcome = reviewer
            .review("Yesterday I goed to school.", &Profile::default())
            .unwrap();
        assert_eq!(outcome.score, Some(64.0));
        assert_eq!(outcome.summary.as_deref(), Some("Nice story."));
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(outcome.suggestions[0].original, "goed");
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn test_review_propagates_transport_errors() {
        let model = Scripted {
            reply: Err(AiError::RequestFailed("offline".into())),
            prompts: Mutex::new(Vec::new()),
        };
        let reviewer = ModelReviewer::new(Box::new(model));
        assert!(matches!(
            reviewer.review("Hello.", &Profile::default()),
            Err(AiError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_review_propagates_parse_errors() {
        let reviewer = ModelReviewer::new(Box::new(Scripted::ok("No JSON here")));
        assert!(matches!(
            reviewer.review("Hello.", &Profile::default()),
            Err(AiError::ParseError(_))
        ));
    }
}
