//! Check command - analyze a text and print the report

use super::{read_input, AnalysisArgs};
use anyhow::Result;
use console::style;
use esl_coach::config::UserConfig;
use esl_coach::reporters::{self, OutputFormat};
use esl_coach::scoring::Scorer;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}

/// Run the check command
#[allow(clippy::too_many_arguments)]
pub fn run(
    file: Option<&Path>,
    args: &AnalysisArgs,
    config: &UserConfig,
    format: OutputFormat,
    top: Option<usize>,
    fail_under: Option<u8>,
    explain_score: bool,
) -> Result<()> {
    let text = read_input(file)?;
    let profile = args.profile(config)?;
    let analyzer = args.analyzer(config, top)?;

    // Spinner only while waiting on the model; hidden when stderr is not a terminal
    let spinner = analyzer.has_model().then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(create_spinner_style());
        spinner.set_message("Asking the tutor...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    });
    let result = analyzer.analyze(&text, &profile);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    print!("{}", reporters::report_with_format(&report, format)?);
    if format == OutputFormat::Json {
        println!();
    }

    if explain_score {
        eprintln!("{}", Scorer::default().explain(&report.breakdown));
    }

    if let Some(threshold) = fail_under {
        if report.score < threshold {
            eprintln!(
                "{} score {} is below --fail-under={}",
                style("✗").red(),
                report.score,
                threshold
            );
            std::process::exit(1);
        }
    }
    Ok(())
}
