use colored::Colorize;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, limit: usize) -> Result<(), String> {
    let c = super::load(config)?;
    let history = c.history();

    if history.is_empty() {
        println!("  No saved sessions.");
    } else {
        let skip = history.len().saturating_sub(limit);
        for entry in &history[skip..] {
            println!(
                "  {} {} {}",
                format!("v{}", entry.version).bold(),
                entry.timestamp.format("%Y-%m-%d").to_string().dimmed(),
                entry.note
            );
            if !entry.changes.is_empty() {
                println!("    {}", entry.summary(5));
            }
        }
    }

    if !c.pending().is_empty() {
        println!();
        println!("  Pending:");
        for line in c.pending() {
            println!("    {line}");
        }
    }
    Ok(())
}
