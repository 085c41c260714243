//! Built-in practice texts
//!
//! Short pieces written the way learners at each level often write, with
//! typical mistakes left in for the analyzer to find.

use crate::models::ProficiencyLevel;
use chrono::Datelike;
use serde::Serialize;

/// A practice text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub level: ProficiencyLevel,
    pub title: &'static str,
    pub text: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        level: ProficiencyLevel::Beginner,
        title: "My family",
        text: "My name is Ana and i have 19 years old. I live with my family in a \
               small house. My brother don't like school but he like football. \
               Every days we eat a apple after dinner. Their is a park near our house \
               and we go there alot.",
    },
    Sample {
        level: ProficiencyLevel::Beginner,
        title: "My weekend",
        text: "Last saturday I didn't went to work. I can to sleep late on weekends. \
               In the afternoon we made a photo in the park. My friend is married with \
               a teacher. She give me many advices about english.",
    },
    Sample {
        level: ProficiencyLevel::Intermediate,
        title: "Email to a colleague",
        text: "Hi Tom,\n\nThank you for the informations about the project. I am agree \
               with your plan, but it depends of the budget. We should discuss about \
               it on Monday. Could you explain me the new process? I think it will be \
               more easier than the old one.\n\nI look forward to hear from you.",
    },
    Sample {
        level: ProficiencyLevel::Intermediate,
        title: "Learning English",
        text: "I study English since three years. At the beginning I did a lot of \
               mistakes, but now I make less mistakes then before. The people in my \
               class is very friendly. Your welcome to join us,we meet every Tuesday.",
    },
    Sample {
        level: ProficiencyLevel::Advanced,
        title: "Opinion essay",
        text: "According to me, remote work is more better for most employees. \
               In the other hand, companies could of lost some of the informal \
               communication that happens in an office. Managers who returned back to \
               the office full time often report that their teams feel very tired \
               because of the commute , which is an problem that is rarely discussed \
               in the debates about productivity that are published every week.",
    },
];

/// Samples written for `level`
pub fn samples_for(level: ProficiencyLevel) -> Vec<&'static Sample> {
    SAMPLES.iter().filter(|s| s.level == level).collect()
}

/// Pick a sample for `level`.
///
/// With no index the choice rotates daily. Returns `None` when `index` is
/// out of range.
pub fn pick(level: ProficiencyLevel, index: Option<usize>) -> Option<&'static Sample> {
    let candidates = samples_for(level);
    if candidates.is_empty() {
        return None;
    }
    let index = index.unwrap_or_else(|| chrono::Utc::now().ordinal() as usize % candidates.len());
    candidates.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use crate::rules::RuleEngine;

    #[test]
    fn test_every_level_has_samples() {
        for level in [
            ProficiencyLevel::Beginner,
            ProficiencyLevel::Intermediate,
            ProficiencyLevel::Advanced,
        ] {
            assert!(!samples_for(level).is_empty(), "{level}");
            assert!(pick(level, None).is_some());
        }
    }

    #[test]
    fn test_pick_by_index() {
        let second = pick(ProficiencyLevel::Beginner, Some(1)).unwrap();
        assert_eq!(second.title, "My weekend");
        assert!(pick(ProficiencyLevel::Beginner, Some(99)).is_none());
    }

    #[test]
    fn test_samples_contain_detectable_mistakes() {
        let engine = RuleEngine::builtin();
        for sample in SAMPLES {
            let found = engine.run(sample.text, &Profile::new(sample.level));
            assert!(
                found.len() >= 4,
                "{} produced only {} suggestion(s)",
                sample.title,
                found.len()
            );
        }
    }
}
