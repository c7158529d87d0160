use burge_mechanics::service;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, skill: &str, amount: Option<u32>) -> Result<(), String> {
    let character = super::load(config)?;
    let result = super::update(config, |c| service::spend(c, skill, amount))
        .map_err(|e| super::hint_skill(e, &character, skill))?;
    println!(
        "  {}: {} → {} ({} XP spent, {} left)",
        result.skill, result.old, result.new, result.spent, result.xp_remaining
    );
    Ok(())
}
