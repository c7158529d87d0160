use burge_mechanics::service;
use colored::Colorize;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, state: Option<&str>) -> Result<(), String> {
    let wanted = match state.map(|s| s.trim().to_lowercase()) {
        None => None,
        Some(s) if matches!(s.as_str(), "on" | "yes" | "true") => Some(true),
        Some(s) if matches!(s.as_str(), "off" | "no" | "false") => Some(false),
        Some(s) => return Err(format!("unknown wound state '{s}': use on or off")),
    };

    let wounded = super::update(config, |c| {
        let next = wanted.unwrap_or(!c.major_wound());
        service::set_wound(c, next);
        Ok(next)
    })?;
    if wounded {
        println!("  {}", "Major wound: checks take a penalty die".red());
    } else {
        println!("  Major wound cleared");
    }
    Ok(())
}
