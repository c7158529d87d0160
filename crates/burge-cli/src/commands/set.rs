use burge_mechanics::{Characteristic, ResourceKind, ResourceUpdate, service};
use colored::Colorize;

use crate::config::CliConfig;

fn parse_value(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value: {value}"))
}

pub fn run(config: &CliConfig, target: &str, value: &str) -> Result<(), String> {
    if let Ok(characteristic) = target.parse::<Characteristic>() {
        let v = parse_value(value)?;
        let ((old, new), c) = super::update(config, |c| {
            let change = service::set_characteristic(c, characteristic, v);
            Ok((change, c.clone()))
        })?;
        println!("  {characteristic}: {old} → {new}");
        let r = c.resources();
        println!("  HP {}  MP {}  SAN {}", r.hp, r.mp, r.sanity);
        return Ok(());
    }

    if let Ok(kind) = target.parse::<ResourceKind>() {
        let update: ResourceUpdate = value.parse().map_err(|e: burge_mechanics::MechError| e.to_string())?;
        let mut rng = config.rng();
        let change = super::update(config, |c| {
            service::adjust_resource(c, kind, update, &mut rng)
        })?;
        if let Some(roll) = &change.roll {
            println!("  rolled {roll}");
        }
        match change.max {
            Some(max) => println!("  {kind}: {} → {} (max {max})", change.old, change.new),
            None => println!("  {kind}: {} → {}", change.old, change.new),
        }
        if change.major_wound_threshold_crossed {
            println!(
                "  {}",
                "HP fell to half CON or below: a major wound? (`burge wound on`)".yellow()
            );
        }
        if change.unconscious {
            println!("  {}", "HP 0: unconscious".red().bold());
        }
        return Ok(());
    }

    let v = parse_value(value)?;
    let change = super::update(config, |c| service::set_skill(c, target, v))?;
    match change.old {
        Some(old) => println!("  {}: {old} → {}", change.name, change.new),
        None if change.custom => println!(
            "  {}: {} {}",
            change.name,
            change.new,
            "(new custom skill)".dimmed()
        ),
        None => println!("  {}: {}", change.name, change.new),
    }
    Ok(())
}
