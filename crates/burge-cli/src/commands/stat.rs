use burge_mechanics::{Characteristic, service};

use crate::config::CliConfig;

pub fn run(config: &CliConfig, name: &str, difficulty: &str, modifier: &str) -> Result<(), String> {
    let difficulty = super::parse_difficulty(difficulty)?;
    let dice = super::parse_dice(modifier)?;
    let c = super::load(config)?;
    let mut rng = config.rng();

    let roll = if name.trim().eq_ignore_ascii_case("luck") {
        service::value_check(
            "Luck",
            c.resources().luck.current,
            difficulty,
            dice,
            &mut rng,
        )
    } else {
        let characteristic: Characteristic = name
            .parse()
            .map_err(|e: burge_mechanics::MechError| format!("{e}; use STR..EDU or luck"))?;
        service::characteristic_check(&c, characteristic, difficulty, dice, &mut rng)
            .map_err(|e| e.to_string())?
    };
    super::print_roll(&roll);
    Ok(())
}
