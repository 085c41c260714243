//! Text (terminal) reporter with colors and formatting

use crate::models::{AnalysisReport, Severity, Suggestion};
use anyhow::Result;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: &str) -> &'static str {
    match grade {
        "A" => "\x1b[32m", // Green
        "B" => "\x1b[92m", // Light green
        "C" => "\x1b[33m", // Yellow
        "D" => "\x1b[91m", // Light red
        "F" => "\x1b[31m", // Red
        _ => "\x1b[0m",
    }
}

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::High => "\x1b[91m",   // Light red
        Severity::Medium => "\x1b[33m", // Yellow
        Severity::Low => "\x1b[34m",    // Blue
        Severity::Info => "\x1b[90m",   // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";

/// Severity tag
fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
        Severity::Info => "[I]",
    }
}

/// Quote a phrase for display, shortening long ones on a char boundary
fn quoted(phrase: &str) -> String {
    const MAX: usize = 40;
    if phrase.chars().count() > MAX {
        let head: String = phrase.chars().take(MAX - 3).collect();
        format!("\"{}...\"", head)
    } else {
        format!("\"{}\"", phrase)
    }
}

fn change_line(suggestion: &Suggestion) -> String {
    match &suggestion.replacement {
        Some(r) if r.is_empty() => format!("{} → (remove)", quoted(&suggestion.original)),
        Some(r) => format!("{} → {GREEN}{}{RESET}", quoted(&suggestion.original), quoted(r)),
        None => quoted(&suggestion.original),
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();

    // Header
    let grade_c = grade_color(&report.grade);
    out.push_str(&format!("\n{BOLD}esl-coach Writing Review{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{}/100{RESET}  Grade: {grade_c}{BOLD}{}{RESET}  ",
        report.score, report.grade
    ));
    out.push_str(&format!(
        "Level: {} ({})  Words: {}  Source: {}\n\n",
        report.profile.level,
        report.profile.level.cefr(),
        report.stats.words,
        report.source
    ));
    out.push_str(&format!("{}\n\n", report.feedback.headline));

    // Suggestions summary
    let s = &report.summary;
    out.push_str(&format!("{BOLD}SUGGESTIONS{RESET} ({} total)\n", s.total));

    let mut summary_parts = Vec::new();
    if s.high > 0 {
        summary_parts.push(format!("\x1b[91m{} high{RESET}", s.high));
    }
    if s.medium > 0 {
        summary_parts.push(format!("\x1b[33m{} medium{RESET}", s.medium));
    }
    if s.low > 0 {
        summary_parts.push(format!("\x1b[34m{} low{RESET}", s.low));
    }
    if s.info > 0 {
        summary_parts.push(format!("\x1b[90m{} info{RESET}", s.info));
    }
    if !summary_parts.is_empty() {
        out.push_str(&format!("  {}\n\n", summary_parts.join(" | ")));
    } else {
        out.push_str(&format!("  {GREEN}Nothing to correct.{RESET}\n\n"));
    }

    for (i, suggestion) in report.suggestions.iter().enumerate() {
        let sev_c = severity_color(&suggestion.severity);
        out.push_str(&format!(
            "  {DIM}{:>3}{RESET}  {sev_c}{}{RESET}  {DIM}{}:{}{RESET}  {BOLD}{}{RESET}: {}\n",
            i + 1,
            severity_tag(&suggestion.severity),
            suggestion.line,
            suggestion.column,
            suggestion.message,
            change_line(suggestion)
        ));
        if !suggestion.explanation.is_empty() {
            out.push_str(&format!("            {DIM}{}{RESET}\n", suggestion.explanation));
        }
    }
    if !report.suggestions.is_empty() {
        out.push('\n');
    }

    let fb = &report.feedback;
    if !fb.strengths.is_empty() {
        out.push_str(&format!("{BOLD}STRENGTHS{RESET}\n"));
        for strength in &fb.strengths {
            out.push_str(&format!("  {GREEN}✓{RESET} {}\n", strength));
        }
        out.push('\n');
    }
    if !fb.improvements.is_empty() {
        out.push_str(&format!("{BOLD}TO IMPROVE{RESET}\n"));
        for tip in &fb.improvements {
            out.push_str(&format!("  • {}\n", tip));
        }
        out.push('\n');
    }
    if let Some(summary) = &fb.model_summary {
        out.push_str(&format!("{BOLD}TUTOR'S NOTE{RESET}\n  {}\n\n", summary));
    }

    Ok(out)
}
