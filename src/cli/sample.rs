//! Sample command - print a practice text

use anyhow::Result;
use console::style;
use esl_coach::models::ProficiencyLevel;
use esl_coach::samples;

/// Run the sample command. `index` is 1-based.
pub fn run(level: ProficiencyLevel, index: Option<usize>) -> Result<()> {
    let available = samples::samples_for(level).len();
    let Some(sample) = samples::pick(level, index.map(|i| i - 1)) else {
        anyhow::bail!(
            "No sample {} for level {} (available: 1-{})",
            index.unwrap_or(0),
            level,
            available
        );
    };

    // Title on stderr so stdout can be piped into `check`
    eprintln!("{}", style(format!("{} ({})", sample.title, level)).dim());
    println!("{}", sample.text);
    Ok(())
}
