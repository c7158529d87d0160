use burge_mechanics::{Difficulty, SuccessLevel, service};
use comfy_table::{ContentArrangement, Table};

pub fn run(target: u32, modifier: &str) -> Result<(), String> {
    if target > 99 {
        return Err(format!("target must be between 0 and 99, got {target}"));
    }
    let dice = super::parse_dice(modifier)?;
    let odds = service::odds(target, dice);

    println!("  Target {target}, {dice}");
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Result", "Outcomes", "Chance"]);
    for level in SuccessLevel::ALL.iter().rev() {
        table.add_row(vec![
            level.to_string(),
            format!("{}/{}", odds.count(*level), odds.denominator()),
            format!("{:.2}%", odds.probability(*level) * 100.0),
        ]);
    }
    println!("{table}");

    for difficulty in [Difficulty::Regular, Difficulty::Hard, Difficulty::Extreme] {
        println!(
            "  {difficulty} pass: {:.2}%",
            odds.pass_probability(difficulty) * 100.0
        );
    }
    Ok(())
}
