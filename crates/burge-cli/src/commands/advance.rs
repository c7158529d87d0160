use burge_mechanics::service;
use colored::Colorize;

use crate::config::CliConfig;

pub fn run(config: &CliConfig) -> Result<(), String> {
    let mut rng = config.rng();
    let report = super::update(config, |c| Ok(service::advance(c, &mut rng)))?;

    if report.is_empty() {
        println!("  No skills are marked for advancement.");
        return Ok(());
    }
    for r in &report.results {
        if r.passed {
            println!(
                "  {}: rolled {} {} {} → {} (+{})",
                r.skill.bold(),
                r.roll.total,
                "improved".green(),
                r.old,
                r.new,
                r.gain()
            );
        } else {
            println!(
                "  {}: rolled {} {}",
                r.skill.bold(),
                r.roll.total,
                "no improvement".dimmed()
            );
        }
    }
    println!();
    println!(
        "  {} of {} skill(s) improved",
        report.improved().count(),
        report.results.len()
    );
    Ok(())
}
