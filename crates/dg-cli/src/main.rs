//! CLI frontend for Demigod, a character sheet for the children of the gods.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::power::PowerFields;
use commands::roll::RollRequest;
use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "demigod",
    about = "Demigod: character sheets, dice, and prophecies for the children of the gods",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding saved sheets and histories
    #[arg(long, global = true, env = "DEMIGOD_DATA_DIR", default_value = config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true, env = "DEMIGOD_SEED")]
    seed: Option<u64>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and save a blank sheet
    New {
        /// Name to save the sheet under
        name: String,

        /// The hero's name
        #[arg(long)]
        character: Option<String>,

        /// The divine parent's name
        #[arg(long)]
        god: Option<String>,

        /// Patron id from `demigod gods`
        #[arg(long)]
        patron: Option<String>,

        /// Overwrite an existing sheet
        #[arg(long)]
        force: bool,
    },

    /// List saved sheets
    List,

    /// Show a sheet
    Show {
        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Print the raw JSON record
        #[arg(long)]
        json: bool,
    },

    /// Set an attribute or identity field
    Set {
        /// Attribute (e.g. strength, "melee weapons") or field (name, god, patron, age, ...)
        field: String,

        /// New value; +N or -N adjusts an attribute
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Manage divine powers
    Power {
        #[command(subcommand)]
        action: PowerAction,
    },

    /// Delete a saved sheet
    Delete {
        /// Sheet name
        name: String,
    },

    /// Export a sheet as JSON
    Export {
        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write to <sheet>.json in the current directory
        #[arg(long, conflicts_with = "output")]
        file: bool,
    },

    /// Import a sheet from a JSON file
    Import {
        /// JSON file to read
        file: PathBuf,

        /// Save under this name (default: file name without extension)
        #[arg(long = "as")]
        name: Option<String>,
    },

    /// Roll dice: an expression, a preset, or a divine power
    Roll {
        /// Dice expression such as d20, 2d6+3 (default: d20)
        #[arg(conflicts_with_all = ["quick", "power", "history", "presets"])]
        expr: Option<String>,

        /// Preset roll by id or label (see --presets)
        #[arg(short, long, conflicts_with_all = ["power", "history", "presets"])]
        quick: Option<String>,

        /// Roll the damage of a divine power by id
        #[arg(short, long, conflicts_with_all = ["history", "presets"])]
        power: Option<String>,

        /// Show the last five rolls
        #[arg(long, conflicts_with = "presets")]
        history: bool,

        /// List the preset rolls for the sheet
        #[arg(long)]
        presets: bool,

        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Pause before revealing the result
        #[arg(long)]
        dramatic: bool,
    },

    /// Attack with a weapon
    Attack {
        /// Weapon kind: melee, ranged, unarmed, magic
        weapon: String,

        /// Target difficulty (enemy armour class, 1-30)
        #[arg(short, long, default_value = "10", allow_hyphen_values = true)]
        difficulty: i32,

        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Pause before revealing the result
        #[arg(long)]
        dramatic: bool,
    },

    /// Roll defense from dodge and agility
    Defend {
        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Pause before revealing the result
        #[arg(long)]
        dramatic: bool,
    },

    /// Consult the Oracle of Delphi
    Prophecy {
        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Pause before revealing the prophecy
        #[arg(long)]
        dramatic: bool,
    },

    /// Draw a Greek hero name and a god name
    Names {
        /// Write one of the names into the sheet: character or god
        #[arg(long)]
        apply: Option<String>,

        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// List the patron deities
    Gods,

    /// Show divine transformation progress
    Transformation {
        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

#[derive(Subcommand)]
enum PowerAction {
    /// Add a divine power
    Add {
        #[command(flatten)]
        fields: PowerArgs,

        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Change fields of a divine power
    Set {
        /// Power id, e.g. power_1
        id: String,

        #[command(flatten)]
        fields: PowerArgs,

        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Remove a divine power
    Remove {
        /// Power id, e.g. power_1
        id: String,

        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// List divine powers
    List {
        /// Sheet name (default: last opened)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

#[derive(clap::Args)]
struct PowerArgs {
    /// Power name
    #[arg(long)]
    name: Option<String>,

    /// Activation cost
    #[arg(long, allow_hyphen_values = true)]
    cost: Option<i64>,

    /// Damage dice, e.g. "2d6 + 5"
    #[arg(long)]
    damage: Option<String>,

    /// Category: attack, defense, buff, ...
    #[arg(long = "type")]
    power_type: Option<String>,

    /// What the power does
    #[arg(long)]
    description: Option<String>,

    /// Image path or data URL
    #[arg(long)]
    image: Option<String>,
}

impl From<PowerArgs> for PowerFields {
    fn from(args: PowerArgs) -> Self {
        Self {
            name: args.name,
            cost: args.cost,
            damage: args.damage,
            power_type: args.power_type,
            description: args.description,
            image: args.image,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::default()
        .with_data_dir(cli.data_dir)
        .with_seed(cli.seed);

    let result = match cli.command {
        Commands::New {
            name,
            character,
            god,
            patron,
            force,
        } => commands::new::run(
            &config,
            commands::new::NewSheet {
                name: &name,
                character_name: character.as_deref(),
                god_name: god.as_deref(),
                patron: patron.as_deref(),
                force,
            },
        ),
        Commands::List => commands::list::run(&config),
        Commands::Show { sheet, json } => commands::show::run(&config, sheet.as_deref(), json),
        Commands::Set {
            field,
            value,
            sheet,
        } => commands::set::run(&config, sheet.as_deref(), &field, &value),
        Commands::Power { action } => match action {
            PowerAction::Add { fields, sheet } => {
                commands::power::add(&config, sheet.as_deref(), fields.into())
            }
            PowerAction::Set { id, fields, sheet } => {
                commands::power::set(&config, sheet.as_deref(), &id, fields.into())
            }
            PowerAction::Remove { id, sheet } => {
                commands::power::remove(&config, sheet.as_deref(), &id)
            }
            PowerAction::List { sheet } => commands::power::list(&config, sheet.as_deref()),
        },
        Commands::Delete { name } => commands::delete::run(&config, &name),
        Commands::Export {
            sheet,
            output,
            file,
        } => commands::export::run(&config, sheet.as_deref(), output.as_deref(), file),
        Commands::Import { file, name } => commands::import::run(&config, &file, name.as_deref()),
        Commands::Roll {
            expr,
            quick,
            power,
            history,
            presets,
            sheet,
            dramatic,
        } => {
            let config = config.with_dramatic(dramatic);
            if history {
                commands::roll::history(&config)
            } else if presets {
                commands::roll::presets(&config, sheet.as_deref())
            } else {
                let request = match (&quick, &power) {
                    (Some(name), _) => RollRequest::Quick(name),
                    (None, Some(id)) => RollRequest::Power(id),
                    (None, None) => RollRequest::Expr(expr.as_deref().unwrap_or("d20")),
                };
                commands::roll::run(&config, sheet.as_deref(), request)
            }
        }
        Commands::Attack {
            weapon,
            difficulty,
            sheet,
            dramatic,
        } => commands::attack::run(
            &config.with_dramatic(dramatic),
            sheet.as_deref(),
            &weapon,
            difficulty,
        ),
        Commands::Defend { sheet, dramatic } => {
            commands::defend::run(&config.with_dramatic(dramatic), sheet.as_deref())
        }
        Commands::Prophecy { sheet, dramatic } => {
            commands::prophecy::run(&config.with_dramatic(dramatic), sheet.as_deref())
        }
        Commands::Names { apply, sheet } => {
            commands::names::run(&config, sheet.as_deref(), apply.as_deref())
        }
        Commands::Gods => commands::gods::run(),
        Commands::Transformation { sheet } => {
            commands::transformation::run(&config, sheet.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
