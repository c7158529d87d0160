use burge_mechanics::Characteristic;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::config::CliConfig;

pub fn run(config: &CliConfig) -> Result<(), String> {
    let c = super::load(config)?;

    let occupation = if c.occupation.is_empty() {
        String::new()
    } else {
        format!(" ({})", c.occupation)
    };
    println!("  {}{} v{}", c.name.bold(), occupation.dimmed(), c.version());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        Characteristic::ALL
            .iter()
            .map(|ch| ch.to_string())
            .collect::<Vec<_>>(),
    );
    table.add_row(
        c.characteristics()
            .map(|(_, v)| v.to_string())
            .collect::<Vec<_>>(),
    );
    println!("{table}");

    let r = c.resources();
    println!(
        "  HP {}  MP {}  SAN {}  Luck {}  XP {}",
        r.hp, r.mp, r.sanity, r.luck.current, r.xp
    );
    if c.major_wound() {
        println!("  {}", "Major wound: checks take a penalty die".red());
    }
    println!();

    if c.skills().is_empty() {
        println!("  No skills recorded.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Skill", "Value", "Half", "Fifth", ""]);
        for (name, skill) in c.skills() {
            table.add_row(vec![
                name.clone(),
                skill.value.to_string(),
                (skill.value / 2).to_string(),
                (skill.value / 5).to_string(),
                if skill.checked { "✓" } else { "" }.to_string(),
            ]);
        }
        println!("{table}");
    }

    if !c.pending().is_empty() {
        println!();
        println!(
            "  {} unsaved change(s); `burge save` to record them",
            c.pending().len()
        );
    }
    Ok(())
}
