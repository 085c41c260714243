//! Fix command - apply suggested corrections to a text
//!
//! Advisory suggestions (no replacement) are listed on stderr so the
//! corrected text on stdout can be piped.

use super::{is_stdin, read_input, AnalysisArgs};
use anyhow::{Context, Result};
use console::style;
use esl_coach::config::UserConfig;
use esl_coach::document::Document;
use std::path::Path;

/// Run the fix command
pub fn run(file: Option<&Path>, args: &AnalysisArgs, config: &UserConfig, write: bool) -> Result<()> {
    if write && is_stdin(file) {
        anyhow::bail!("--write needs a file path, not stdin");
    }
    let mut doc = match file.filter(|_| !is_stdin(file)) {
        Some(path) => Document::from_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => Document::new("stdin", read_input(None)?),
    };

    let profile = args.profile(config)?;
    // Every correction is applied, not just the ones a report would show
    let analyzer = args.analyzer(config, Some(usize::MAX))?;
    let report = analyzer.analyze(&doc.content, &profile)?;

    let applied = doc.apply(&report.suggestions);
    let advisory: Vec<_> = report
        .suggestions
        .iter()
        .filter(|s| s.replacement.is_none())
        .collect();

    match file {
        Some(path) if write => {
            std::fs::write(path, &doc.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Applied {} correction(s) to {}",
                style("✓").green(),
                applied,
                style(path.display()).cyan()
            );
        }
        _ => {
            print!("{}", doc.content);
            if !doc.content.ends_with('\n') {
                println!();
            }
            eprintln!("{} Applied {} correction(s)", style("✓").green(), applied);
        }
    }

    for s in advisory {
        eprintln!(
            "  {} {}:{} {}",
            style("note").yellow(),
            s.line,
            s.column,
            s.message
        );
    }
    Ok(())
}
