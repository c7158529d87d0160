use burge_mechanics::service;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, note: &str) -> Result<(), String> {
    let entry = super::update(config, |c| service::save_session(c, note))?;
    println!(
        "  Saved v{}: {} ({} change(s))",
        entry.version,
        entry.note,
        entry.changes.len()
    );
    Ok(())
}
