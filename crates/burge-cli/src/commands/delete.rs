use burge_mechanics::CharacterStore;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("deleting an investigator cannot be undone; pass --yes to confirm".into());
    }
    let mut store = super::open_store(config);
    if store.delete(config.user()).map_err(|e| e.to_string())? {
        tracing::info!(user = config.user(), "deleted investigator");
        println!("  Deleted investigator for '{}'", config.user());
        Ok(())
    } else {
        Err(super::no_character(config))
    }
}
