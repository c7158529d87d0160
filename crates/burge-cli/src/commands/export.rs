use std::fs;
use std::path::Path;

use burge_mechanics::service;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, output: Option<&Path>) -> Result<(), String> {
    let character = super::load(config)?;
    let json = service::export_json(&character).map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            fs::write(path, &json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            eprintln!("  Exported {} to {}", character.name, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
