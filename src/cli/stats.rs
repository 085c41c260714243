//! Stats command - document statistics

use super::read_input;
use anyhow::Result;
use console::style;
use esl_coach::reporters::OutputFormat;
use esl_coach::text::TextStats;
use std::path::Path;

/// Run the stats command
pub fn run(file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let text = read_input(file)?;
    let stats = TextStats::compute(&text);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", style("Text statistics").bold());
    println!("  Words:               {}", stats.words);
    println!("  Sentences:           {}", stats.sentences);
    println!("  Paragraphs:          {}", stats.paragraphs);
    println!("  Characters:          {}", stats.characters);
    println!("  Unique words:        {}", stats.unique_words);
    println!("  Lexical diversity:   {:.2}", stats.lexical_diversity);
    println!("  Avg sentence length: {:.1} words", stats.avg_sentence_length);
    println!("  Long sentences:      {}", stats.long_sentences);
    Ok(())
}
