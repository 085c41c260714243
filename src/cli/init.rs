//! Init command - create the user config file

use anyhow::Result;
use console::style;
use esl_coach::config::UserConfig;

/// Run the init command
pub fn run() -> Result<()> {
    let path = UserConfig::user_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if UserConfig::write_example(&path)? {
        println!("{} Created {}", style("✓").green(), style(path.display()).cyan());
        println!("\nNext steps:");
        println!("  1. Set your level and native language under [analysis]");
        println!("  2. Add an API key under [ai] or export ANTHROPIC_API_KEY");
        println!("  3. Run: {}", style("esl-coach check essay.txt").bold());
    } else {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}
