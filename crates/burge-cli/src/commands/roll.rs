use burge_mechanics::DiceExpr;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, expr: &str) -> Result<(), String> {
    let expr = DiceExpr::parse(expr).map_err(|e| e.to_string())?;
    let mut rng = config.rng();
    println!("  {}", expr.roll(&mut rng));
    Ok(())
}
