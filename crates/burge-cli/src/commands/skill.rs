use burge_mechanics::service;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, name: &str, difficulty: &str, modifier: &str) -> Result<(), String> {
    let difficulty = super::parse_difficulty(difficulty)?;
    let dice = super::parse_dice(modifier)?;
    let mut rng = config.rng();
    let roll = super::update(config, |c| {
        service::skill_check(c, name, difficulty, dice, &mut rng)
    })?;
    tracing::info!(skill = %roll.name, total = roll.total, "skill check");
    super::print_roll(&roll);
    Ok(())
}
