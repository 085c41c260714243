//! Text utilities: word tokens, sentence spans, positions and statistics

use crate::models::Span;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Sentences longer than this count as "long" in [`TextStats`]
pub const LONG_SENTENCE_WORDS: usize = 30;

/// Words that end in a period without ending the sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "vs", "etc", "e.g", "i.e", "jr", "sr", "no",
];

static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn word_pattern() -> &'static Regex {
    WORD_PATTERN.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").expect("valid regex")
    })
}

/// Word tokens with their spans. Inner apostrophes and hyphens stay part of
/// the word ("don't", "well-known").
pub fn word_spans(text: &str) -> impl Iterator<Item = (Span, &str)> {
    word_pattern()
        .find_iter(text)
        .map(|m| (Span::new(m.start(), m.end()), m.as_str()))
}

pub fn words(text: &str) -> impl Iterator<Item = &str> {
    word_spans(text).map(|(_, w)| w)
}

pub fn word_count(text: &str) -> usize {
    words(text).count()
}

/// Split text into trimmed sentence spans.
///
/// A sentence ends at `.`, `!` or `?` (runs like `?!` or `...` included,
/// plus closing quotes/brackets) followed by whitespace or end of text, or at
/// a blank line. Common abbreviations do not end a sentence.
pub fn sentences(text: &str) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let boundary = match bytes[i] {
            b'.' | b'!' | b'?' => {
                let mut j = i + 1;
                while j < bytes.len() && matches!(bytes[j], b'.' | b'!' | b'?' | b'"' | b'\'' | b')') {
                    j += 1;
                }
                let at_break = j == bytes.len() || bytes[j].is_ascii_whitespace();
                if at_break && !(bytes[i] == b'.' && ends_with_abbreviation(&text[start..i])) {
                    Some(j)
                } else {
                    None
                }
            }
            b'\n' if bytes.get(i + 1) == Some(&b'\n') => Some(i),
            _ => None,
        };

        match boundary {
            Some(end) => {
                push_trimmed(text, start, end, &mut out);
                start = end;
                i = end.max(i + 1);
            }
            None => i += 1,
        }
    }
    push_trimmed(text, start, text.len(), &mut out);
    out
}

fn ends_with_abbreviation(before: &str) -> bool {
    let last = before
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
        .to_lowercase();
    ABBREVIATIONS.contains(&last.as_str())
}

fn push_trimmed(text: &str, start: usize, end: usize, out: &mut Vec<Span>) {
    let slice = &text[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let trail = slice.len() - slice.trim_end().len();
    if lead + trail < slice.len() {
        out.push(Span::new(start + lead, end - trail));
    }
}

/// 1-based line and column (column counted in chars) of a byte offset.
pub fn line_col(text: &str, offset: usize) -> (u32, u32) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = text[line_start..offset].chars().count() + 1;
    (line as u32, column as u32)
}

/// Document statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub characters: usize,
    pub unique_words: usize,
    /// unique words / words (0.0 for empty text)
    pub lexical_diversity: f64,
    pub avg_sentence_length: f64,
    pub long_sentences: usize,
}

impl TextStats {
    pub fn compute(text: &str) -> Self {
        let words: Vec<&str> = words(text).collect();
        let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let sentence_spans = sentences(text);

        let long_sentences = sentence_spans
            .iter()
            .filter(|s| word_count(s.slice(text)) > LONG_SENTENCE_WORDS)
            .count();

        let paragraphs = text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count();

        let lexical_diversity = if words.is_empty() {
            0.0
        } else {
            unique.len() as f64 / words.len() as f64
        };
        let avg_sentence_length = if sentence_spans.is_empty() {
            0.0
        } else {
            words.len() as f64 / sentence_spans.len() as f64
        };

        Self {
            words: words.len(),
            sentences: sentence_spans.len(),
            paragraphs,
            characters: text.chars().count(),
            unique_words: unique.len(),
            lexical_diversity,
            avg_sentence_length,
            long_sentences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_contractions_and_hyphens() {
        let w: Vec<&str> = words("I don't like well-known places, 2 times.").collect();
        assert_eq!(w, vec!["I", "don't", "like", "well-known", "places", "2", "times"]);
    }

    #[test]
    fn test_sentences_split() {
        let text = "I went home. Was it late?! Yes...  Then I slept";
        let spans = sentences(text);
        let parts: Vec<&str> = spans.iter().map(|s| s.slice(text)).collect();
        assert_eq!(parts, vec!["I went home.", "Was it late?!", "Yes...", "Then I slept"]);
    }

    #[test]
    fn test_sentences_keep_abbreviations_and_decimals() {
        let text = "I met Dr. Smith at 3.5 km from here. He was nice.";
        let spans = sentences(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].slice(text), "I met Dr. Smith at 3.5 km from here.");
    }

    #[test]
    fn test_blank_line_ends_sentence() {
        let text = "A title\n\nThe body starts here.";
        let spans = sentences(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].slice(text), "A title");
    }

    #[test]
    fn test_line_col() {
        let text = "ab\ncdé\nf";
        assert_eq!(line_col(text, 0), (1, 1));
        assert_eq!(line_col(text, 4), (2, 2));
        assert_eq!(line_col(text, text.find('f').unwrap()), (3, 1));
        // mid-char offsets snap back to the char start
        assert_eq!(line_col(text, 6), (2, 3));
    }

    #[test]
    fn test_stats() {
        let stats = TextStats::compute("The cat sat. The cat ran.\n\nA dog barked!");
        assert_eq!(stats.words, 9);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.unique_words, 7);
        assert!((stats.avg_sentence_length - 3.0).abs() < 1e-9);
        assert_eq!(stats.long_sentences, 0);
    }

    #[test]
    fn test_stats_empty() {
        let stats = TextStats::compute("   ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.sentences, 0);
        assert_eq!(stats.lexical_diversity, 0.0);
    }
}
