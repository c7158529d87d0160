use std::fs;
use std::path::Path;

use burge_mechanics::{CharacterStore, service};
use colored::Colorize;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, file: &Path, force: bool) -> Result<(), String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let character = service::import_json(&text).map_err(|e| e.to_string())?;

    let mut store = super::open_store(config);
    if !force && store.load(config.user()).map_err(|e| e.to_string())?.is_some() {
        return Err(format!(
            "'{}' already has an investigator; pass --force to replace it",
            config.user()
        ));
    }
    store
        .save(config.user(), &character)
        .map_err(|e| e.to_string())?;
    tracing::info!(file = %file.display(), skills = character.skills().len(), "imported");

    println!(
        "  Imported {} with {} skills",
        character.name.bold(),
        character.skills().len()
    );
    Ok(())
}
