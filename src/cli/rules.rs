//! Rules command - list the built-in checkers

use anyhow::Result;
use console::style;
use esl_coach::models::Category;
use esl_coach::rules::RuleEngine;

/// Run the rules command
pub fn run(category: Option<Category>) -> Result<()> {
    let engine = RuleEngine::builtin();
    let mut shown = 0usize;

    for checker in engine
        .checkers()
        .filter(|c| category.map_or(true, |cat| c.category() == cat))
    {
        println!(
            "{:<28} {:<12} {:<13} {}",
            style(checker.id()).cyan(),
            checker.category(),
            format!("{}+", checker.min_level()),
            checker.description()
        );
        shown += 1;
    }

    eprintln!("{}", style(format!("{} rule(s)", shown)).dim());
    Ok(())
}
