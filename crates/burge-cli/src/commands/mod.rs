pub mod advance;
pub mod create;
pub mod delete;
pub mod export;
pub mod history;
pub mod import;
pub mod mark;
pub mod odds;
pub mod roll;
pub mod save;
pub mod set;
pub mod sheet;
pub mod skill;
pub mod spend;
pub mod stat;
pub mod wound;

use burge_mechanics::{
    Character, CharacterStore, Difficulty, MechError, MechResult, PercentileDice, RollResult,
    SuccessLevel,
};
use burge_mechanics::store::with_character;
use colored::{ColoredString, Colorize};

use crate::config::CliConfig;
use crate::store::JsonFileStore;

fn open_store(config: &CliConfig) -> JsonFileStore {
    JsonFileStore::new(config.data_dir())
}

fn no_character(config: &CliConfig) -> String {
    format!(
        "no investigator for '{}'; run `burge create` or `burge import` first",
        config.user()
    )
}

/// Load the configured user's character.
fn load(config: &CliConfig) -> Result<Character, String> {
    open_store(config)
        .load(config.user())
        .map_err(|e| e.to_string())?
        .ok_or_else(|| no_character(config))
}

/// Run an operation on the configured user's character and save it if the
/// operation succeeds.
fn update<T>(
    config: &CliConfig,
    op: impl FnOnce(&mut Character) -> MechResult<T>,
) -> Result<T, String> {
    let mut store = open_store(config);
    let mut loaded = false;
    let result = with_character(&mut store, config.user(), |c| {
        loaded = true;
        op(c)
    });
    match result {
        // NotFound from the operation itself (an unknown skill) keeps its message.
        Err(MechError::NotFound(_)) if !loaded => Err(no_character(config)),
        other => other.map_err(|e| e.to_string()),
    }
}

/// Append a "did you mean" hint when `input` names no skill on the sheet.
fn hint_skill(message: String, character: &Character, input: &str) -> String {
    if character.skill(input).is_some() {
        return message;
    }
    match burge_mechanics::service::suggest_skill(character, input) {
        Some(name) => format!("{message} (did you mean '{name}'?)"),
        None => message,
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.parse().map_err(|e: MechError| e.to_string())
}

fn parse_dice(s: &str) -> Result<PercentileDice, String> {
    PercentileDice::parse(s).map_err(|e| e.to_string())
}

fn level_label(level: SuccessLevel) -> ColoredString {
    let text = level.to_string();
    match level {
        SuccessLevel::Critical => text.green().bold(),
        SuccessLevel::Extreme | SuccessLevel::Hard | SuccessLevel::Regular => text.green(),
        SuccessLevel::Failure => text.yellow(),
        SuccessLevel::Fumble => text.red().bold(),
    }
}

/// Print a check result.
fn print_roll(roll: &RollResult) {
    let base = if roll.is_base { " (base)" } else { "" };
    println!(
        "  {} {}{base} vs {}",
        roll.name.bold(),
        roll.difficulty.to_string().dimmed(),
        roll.threshold()
    );
    if roll.dice_rolled.len() > 1 {
        let tens: Vec<String> = roll
            .dice_rolled
            .iter()
            .map(|t| format!("{t:02}"))
            .collect();
        println!(
            "  {} tens [{}], units {}",
            roll.dice.to_string().dimmed(),
            tens.join(", "),
            roll.units
        );
    }
    println!("  Rolled {}: {}", roll.total, level_label(roll.success_level));
    if !roll.passed() && roll.success_level.is_success() {
        println!("  {}", format!("not enough for a {} check", roll.difficulty).dimmed());
    }
    if roll.marked {
        println!("  {} marked for advancement", roll.name);
    }
}
