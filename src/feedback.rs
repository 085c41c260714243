//! User-facing feedback for an analysis
//!
//! Builds the encouraging headline, strengths and improvement tips shown
//! under the score. Wording is simpler for beginners.

use crate::models::{
    Category, Feedback, ProficiencyLevel, Profile, Suggestion, SuggestionsSummary,
};
use crate::text::TextStats;

/// Most improvement tips shown at once
const MAX_IMPROVEMENTS: usize = 3;

/// Native languages without articles; speakers often drop or misuse a/an/the
const ARTICLELESS_LANGUAGES: &[&str] = &[
    "chinese", "mandarin", "cantonese", "japanese", "korean", "russian", "ukrainian",
    "belarusian", "polish", "czech", "slovak", "slovenian", "serbian", "croatian", "bosnian",
    "lithuanian", "latvian", "estonian", "finnish", "hindi", "urdu", "punjabi", "tamil",
    "thai", "vietnamese", "indonesian", "malay", "turkish", "persian", "farsi", "kazakh",
];

const ARTICLES: &[&str] = &["a", "an", "the"];

fn headline(score: u8) -> &'static str {
    match score {
        90..=100 => "Excellent work! Your writing is clear and almost error-free.",
        80..=89 => "Great job! Only a few small things to polish.",
        70..=79 => "Good work. Fixing the points below will make your writing stronger.",
        60..=69 => "Nice effort. Focus on the main issues below.",
        _ => "Keep practicing! Start with the most important corrections below.",
    }
}

fn category_tip(category: Category, level: ProficiencyLevel) -> &'static str {
    let simple = level == ProficiencyLevel::Beginner;
    match category {
        Category::Grammar if simple => "Grammar: check verb forms (he goes, I went) and a/an.",
        Category::Grammar => {
            "Grammar: review subject-verb agreement, verb patterns and article use."
        }
        Category::Spelling if simple => "Spelling: read your text again slowly before sending.",
        Category::Spelling => "Spelling: proofread for typos and commonly confused words.",
        Category::Punctuation if simple => {
            "Punctuation: start sentences with a capital letter and put a space after commas."
        }
        Category::Punctuation => {
            "Punctuation: check capitalization and spacing around commas and full stops."
        }
        Category::Vocabulary if simple => "Word choice: learn words in pairs, like \"make a mistake\".",
        Category::Vocabulary => {
            "Word choice: learn collocations and the prepositions that go with verbs."
        }
        Category::Style if simple => "Style: avoid chat words like \"gonna\" in writing.",
        Category::Style => "Style: match the register to your reader and cut redundant words.",
        Category::Clarity if simple => "Clarity: use shorter sentences with one idea each.",
        Category::Clarity => "Clarity: split long sentences and put the main point first.",
    }
}

fn has_articleless_native_language(profile: &Profile) -> Option<&str> {
    let lang = profile.native_language.as_deref()?;
    let lower = lang.trim().to_lowercase();
    ARTICLELESS_LANGUAGES
        .iter()
        .any(|l| lower == *l || lower.starts_with(&format!("{} ", l)))
        .then_some(lang.trim())
}

fn article_set(phrase: &str) -> Vec<String> {
    crate::text::words(phrase)
        .map(str::to_lowercase)
        .filter(|w| ARTICLES.contains(&w.as_str()))
        .collect()
}

/// Whether a suggestion corrects an article (a/an/the)
fn is_article_issue(suggestion: &Suggestion) -> bool {
    if suggestion.rule.starts_with("article-") {
        return true;
    }
    match &suggestion.replacement {
        Some(replacement) => article_set(&suggestion.original) != article_set(replacement),
        None => false,
    }
}

fn join_categories(categories: &[Category]) -> String {
    let names: Vec<&str> = categories.iter().map(Category::as_str).collect();
    match names.as_slice() {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn strengths(summary: &SuggestionsSummary, stats: &TextStats) -> Vec<String> {
    let mut out = Vec::new();
    if stats.words < 10 {
        return out;
    }

    let clean: Vec<Category> = [Category::Grammar, Category::Spelling, Category::Punctuation]
        .into_iter()
        .filter(|c| summary.count(*c) == 0)
        .collect();
    if !clean.is_empty() {
        out.push(format!("No {} mistakes found.", join_categories(&clean)));
    }
    if stats.words >= 30 && stats.lexical_diversity >= 0.6 {
        out.push("You use a varied vocabulary.".to_string());
    }
    if stats.sentences >= 2
        && (8.0..=22.0).contains(&stats.avg_sentence_length)
        && stats.long_sentences == 0
    {
        out.push("Your sentences are a comfortable length.".to_string());
    }
    out
}

/// Build feedback for an analysed text
pub fn build_feedback(
    score: u8,
    suggestions: &[Suggestion],
    summary: &SuggestionsSummary,
    stats: &TextStats,
    profile: &Profile,
    model_summary: Option<String>,
) -> Feedback {
    let mut improvements: Vec<String> = summary
        .by_category
        .iter()
        .filter(|(_, count)| *count > 0)
        .take(MAX_IMPROVEMENTS)
        .map(|(category, _)| category_tip(*category, profile.level).to_string())
        .collect();

    if let Some(lang) = has_articleless_native_language(profile) {
        if suggestions.iter().any(is_article_issue) {
            improvements.push(format!(
                "{} has no articles, so a, an and the are easy to miss. \
                 Check every singular countable noun.",
                lang
            ));
        }
    }

    Feedback {
        headline: headline(score).to_string(),
        strengths: strengths(summary, stats),
        improvements,
        model_summary,
    }
}
