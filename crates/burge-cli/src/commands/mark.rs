use burge_mechanics::service;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, skill: &str) -> Result<(), String> {
    let name = super::update(config, |c| Ok(service::check(c, skill)))?;
    println!("  {name} marked for advancement");
    Ok(())
}
