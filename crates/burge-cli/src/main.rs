//! CLI frontend for the BURGE character mechanics engine.

mod commands;
mod config;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{CliConfig, DEFAULT_DATA_DIR, DEFAULT_USER};

#[derive(Parser)]
#[command(
    name = "burge",
    about = "BURGE: Call of Cthulhu 7e investigator manager",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding character files
    #[arg(long, global = true, env = "BURGE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// User whose investigator is used
    #[arg(short, long, global = true, env = "BURGE_USER", default_value = DEFAULT_USER)]
    user: String,

    /// Seed for reproducible dice
    #[arg(long, global = true, env = "BURGE_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new investigator
    Create {
        /// Investigator name
        name: String,

        /// Occupation
        #[arg(short, long, default_value = "")]
        occupation: String,

        /// All eight characteristics: STR CON DEX SIZ POW APP INT EDU
        #[arg(long, num_args = 8, value_names = ["STR", "CON", "DEX", "SIZ", "POW", "APP", "INT", "EDU"])]
        stats: Option<Vec<u32>>,

        /// Starting Luck
        #[arg(long)]
        luck: Option<u32>,

        /// Replace an existing investigator
        #[arg(long)]
        force: bool,
    },

    /// Show the character sheet
    Sheet,

    /// Set a characteristic, skill, or resource (hp, mp, san, luck, xp)
    Set {
        /// STR..EDU, a resource, or a skill name
        target: String,

        /// A value; resources also take +N, -N, or max
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Roll a skill check
    Skill {
        /// Skill name or alias
        name: String,

        /// regular, hard, or extreme
        #[arg(short, long, default_value = "regular")]
        difficulty: String,

        /// Bonus (+N) or penalty (-N) dice
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        modifier: String,
    },

    /// Roll dice notation such as 1d6 or 2d4+1
    Roll {
        /// Dice expression
        expr: String,
    },

    /// Roll a characteristic or Luck check
    Stat {
        /// STR..EDU or luck
        name: String,

        /// regular, hard, or extreme
        #[arg(short, long, default_value = "regular")]
        difficulty: String,

        /// Bonus (+N) or penalty (-N) dice
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        modifier: String,
    },

    /// Mark a skill for advancement
    Mark {
        /// Skill name or alias
        skill: String,
    },

    /// Roll advancement for every marked skill
    Advance,

    /// Spend XP on a skill
    Spend {
        /// Skill name or alias
        skill: String,

        /// Points to spend (default 1)
        amount: Option<u32>,
    },

    /// Import a Dhole's House JSON export
    Import {
        /// Path to the export file
        file: PathBuf,

        /// Replace an existing investigator
        #[arg(long)]
        force: bool,
    },

    /// Export as Dhole's House JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Set or toggle the major wound ruling
    Wound {
        /// on or off (default: toggle)
        state: Option<String>,
    },

    /// Commit pending changes as a history entry
    Save {
        /// Session note
        note: Vec<String>,
    },

    /// Show session history
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Exact success odds for a target value
    Odds {
        /// Target value
        target: u32,

        /// Bonus (+N) or penalty (-N) dice
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        modifier: String,
    },

    /// Delete the investigator
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::default()
        .with_data_dir(cli.data_dir)
        .with_user(cli.user)
        .with_seed(cli.seed);
    tracing::debug!(
        user = config.user(),
        data_dir = %config.data_dir().display(),
        "starting"
    );

    let result = match cli.command {
        Commands::Create {
            name,
            occupation,
            stats,
            luck,
            force,
        } => commands::create::run(&config, &name, &occupation, stats.as_deref(), luck, force),
        Commands::Sheet => commands::sheet::run(&config),
        Commands::Set { target, value } => commands::set::run(&config, &target, &value),
        Commands::Skill {
            name,
            difficulty,
            modifier,
        } => commands::skill::run(&config, &name, &difficulty, &modifier),
        Commands::Roll { expr } => commands::roll::run(&config, &expr),
        Commands::Stat {
            name,
            difficulty,
            modifier,
        } => commands::stat::run(&config, &name, &difficulty, &modifier),
        Commands::Mark { skill } => commands::mark::run(&config, &skill),
        Commands::Advance => commands::advance::run(&config),
        Commands::Spend { skill, amount } => commands::spend::run(&config, &skill, amount),
        Commands::Import { file, force } => commands::import::run(&config, &file, force),
        Commands::Export { output } => commands::export::run(&config, output.as_deref()),
        Commands::Wound { state } => commands::wound::run(&config, state.as_deref()),
        Commands::Save { note } => commands::save::run(&config, &note.join(" ")),
        Commands::History { limit } => commands::history::run(&config, limit),
        Commands::Odds { target, modifier } => commands::odds::run(target, &modifier),
        Commands::Delete { yes } => commands::delete::run(&config, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
