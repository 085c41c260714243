//! Merging model and rule suggestions
//!
//! Applied after both passes and before scoring:
//! 1. Model suggestions first, then rule suggestions
//! 2. Drop overlapping and near-duplicate suggestions (first match wins)
//! 3. Rank for display
//!
//! [`apply_suggestions`] turns a suggestion list back into corrected text.

use crate::models::{Profile, Suggestion};
use std::cmp::Ordering;
use tracing::debug;

/// Maximum byte gap at which two suggestions can still be near-duplicates
const NEAR_GAP: usize = 1;

/// Maximum length difference (bytes) between near-duplicate originals
const SIMILAR_LEN_DIFF: usize = 3;

/// Whether two flagged phrases describe the same mistake: one contains the
/// other (ignoring case) and their lengths are close.
fn similar(a: &str, b: &str) -> bool {
    if a.len().abs_diff(b.len()) > SIMILAR_LEN_DIFF {
        return false;
    }
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    a.contains(&b) || b.contains(&a)
}

fn conflicts(candidate: &Suggestion, accepted: &Suggestion) -> bool {
    if candidate.span.overlaps(&accepted.span) {
        return true;
    }
    candidate.span.gap_to(&accepted.span) <= NEAR_GAP
        && similar(&candidate.original, &accepted.original)
}

/// Combine model and rule suggestions.
///
/// Model suggestions take precedence. A candidate is dropped when it
/// overlaps an already accepted suggestion, or sits within one byte of one
/// flagging a similar phrase.
pub fn merge(model: Vec<Suggestion>, rules: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut accepted: Vec<Suggestion> = Vec::with_capacity(model.len() + rules.len());
    let mut suppressed = 0usize;

    for candidate in model.into_iter().chain(rules) {
        if let Some(winner) = accepted.iter().find(|a| conflicts(&candidate, a)) {
            debug!(
                "Suppressing {} at {}..{} (conflicts with {})",
                candidate.rule, candidate.span.start, candidate.span.end, winner.rule
            );
            suppressed += 1;
            continue;
        }
        accepted.push(candidate);
    }

    if suppressed > 0 {
        debug!("Merge kept {} suggestion(s), suppressed {}", accepted.len(), suppressed);
    }
    accepted
}

/// Order suggestions for display: severity (highest first), then the
/// writer's focus categories, then confidence, then position.
pub fn rank(suggestions: &mut [Suggestion], profile: &Profile) {
    suggestions.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| {
                profile
                    .focuses_on(b.category)
                    .cmp(&profile.focuses_on(a.category))
            })
            .then_with(|| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.span.start.cmp(&b.span.start))
    });
}

/// Apply every replacement to `text`.
///
/// Advisory suggestions, suggestions whose span no longer matches the text,
/// and suggestions overlapping an earlier one are skipped. Returns the new
/// text and the number of replacements applied.
pub fn apply_suggestions(text: &str, suggestions: &[Suggestion]) -> (String, usize) {
    let mut edits: Vec<(&Suggestion, &str)> = suggestions
        .iter()
        .filter_map(|s| s.replacement.as_deref().map(|r| (s, r)))
        .filter(|(s, _)| text.get(s.span.start..s.span.end) == Some(s.original.as_str()))
        .collect();
    edits.sort_by_key(|(s, _)| (s.span.start, s.span.end));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    let mut applied = 0usize;
    for (suggestion, replacement) in edits {
        if suggestion.span.start < cursor {
            debug!("Skipping overlapping edit {} at {}", suggestion.rule, suggestion.span.start);
            continue;
        }
        out.push_str(&text[cursor..suggestion.span.start]);
        out.push_str(replacement);
        cursor = suggestion.span.end;
        applied += 1;
    }
    out.push_str(&text[cursor..]);
    (out, applied)
}
