use burge_mechanics::{CharacterStore, service};
use colored::Colorize;

use crate::config::CliConfig;

pub fn run(
    config: &CliConfig,
    name: &str,
    occupation: &str,
    stats: Option<&[u32]>,
    luck: Option<u32>,
    force: bool,
) -> Result<(), String> {
    let mut store = super::open_store(config);
    if !force && store.load(config.user()).map_err(|e| e.to_string())?.is_some() {
        return Err(format!(
            "'{}' already has an investigator; pass --force to replace it",
            config.user()
        ));
    }

    let values = stats
        .map(|s| {
            <[u32; 8]>::try_from(s).map_err(|_| "--stats takes exactly eight values".to_string())
        })
        .transpose()?;
    let mut character = service::create(name, occupation, values).map_err(|e| e.to_string())?;
    if let Some(luck) = luck {
        service::set_starting_luck(&mut character, luck);
    }
    store
        .save(config.user(), &character)
        .map_err(|e| e.to_string())?;
    tracing::info!(user = config.user(), name = %character.name, "created investigator");

    println!("  Created {}", character.name.bold());
    if values.is_none() {
        println!(
            "  {}",
            "Set characteristics with `burge set STR 50` or recreate with --stats".dimmed()
        );
    } else {
        let r = character.resources();
        println!("  HP {}  MP {}  SAN {}", r.hp, r.mp, r.sanity);
    }
    Ok(())
}
