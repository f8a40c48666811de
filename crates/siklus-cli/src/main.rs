mod calendar_cmd;
mod catalog_cmds;
mod config;
mod planting_cmds;
mod recommend_cmd;
mod resolve;
mod update_cmds;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use siklus_store::json::JsonStore;

#[derive(Parser)]
#[command(name = "siklus", about = "Growth-phase scheduling for plantings")]
struct Cli {
    /// Data directory (overrides SIKLUS_DATA_DIR env var and config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog TOML file (overrides config file and the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a siklus config file recording the data directory
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Inspect the phase catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Planting registry
    Planting {
        #[command(subcommand)]
        command: PlantingCommands,
    },
    /// Show the derived calendar for a planting
    Calendar {
        /// Planting ID
        planting_id: String,
        /// Reference date (YYYY-MM-DD, default today)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Recommend the next growth phase for a planting
    Recommend {
        /// Planting ID
        planting_id: String,
        /// Reference date (YYYY-MM-DD, default today)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Submit a phase update for review
    Submit {
        /// Planting ID
        planting_id: String,
        /// Phase sequence number being reported
        #[arg(long)]
        phase: u32,
        /// Observed crop condition
        #[arg(long)]
        condition: String,
        /// Name of the submitting operator
        #[arg(long = "by")]
        submitted_by: String,
        /// Observation date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Save as a draft instead of sending to review
        #[arg(long)]
        draft: bool,
    },
    /// Send a draft update to review
    Finalize {
        /// Update record ID
        record_id: String,
    },
    /// Approve or reject a pending phase update
    Review {
        /// Update record ID
        record_id: String,
        /// Name of the reviewer
        #[arg(long)]
        approver: String,
        /// Approve the update
        #[arg(long, conflicts_with = "reject")]
        approve: bool,
        /// Reject the update
        #[arg(long)]
        reject: bool,
        /// Review note shown to the operator
        #[arg(long)]
        note: Option<String>,
    },
    /// Show the full update history for a planting
    History {
        /// Planting ID
        planting_id: String,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List growth phases, optionally filtered to one variety
    Phases {
        /// Variety ID to filter by
        #[arg(long)]
        variety: Option<String>,
    },
    /// List known varieties
    Varieties,
}

#[derive(Subcommand)]
pub enum PlantingCommands {
    /// Register a new planting
    Add {
        /// Field name
        #[arg(long)]
        field: String,
        /// Variety ID (must exist in the catalog)
        #[arg(long)]
        variety: String,
        /// Planting date (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,
    },
    /// List registered plantings
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Init only writes the config file; it must not require a store.
    let command = match cli.command {
        Commands::Init { force } => {
            let dir = cli
                .data_dir
                .unwrap_or_else(siklus_store::config::default_data_dir);
            let path = config::save_config(
                &config::ConfigFile {
                    data: config::DataSection { dir: dir.clone() },
                    catalog: None,
                },
                force,
            )?;
            println!("Wrote config to {}", path.display());
            println!("Data directory: {}", dir.display());
            return Ok(());
        }
        command => command,
    };

    let catalog = config::resolve_catalog(cli.catalog)?;
    let data_dir = config::resolve_data_dir(cli.data_dir)?;
    let store = JsonStore::open(&data_dir)?;

    match command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Catalog { command } => match command {
            CatalogCommands::Phases { variety } => {
                catalog_cmds::run_phases(&catalog, variety.as_deref())
            }
            CatalogCommands::Varieties => catalog_cmds::run_varieties(&catalog),
        },
        Commands::Planting { command } => match command {
            PlantingCommands::Add {
                field,
                variety,
                start_date,
            } => planting_cmds::run_add(&store, &catalog, &field, &variety, start_date),
            PlantingCommands::List => planting_cmds::run_list(&store),
        },
        Commands::Calendar { planting_id, on } => {
            calendar_cmd::run_calendar(&store, &catalog, &planting_id, on)
        }
        Commands::Recommend { planting_id, on } => {
            recommend_cmd::run_recommend(&store, &catalog, &planting_id, on)
        }
        Commands::Submit {
            planting_id,
            phase,
            condition,
            submitted_by,
            date,
            draft,
        } => update_cmds::run_submit(
            &store,
            &catalog,
            &planting_id,
            phase,
            &condition,
            &submitted_by,
            date,
            draft,
        ),
        Commands::Finalize { record_id } => update_cmds::run_finalize(&store, &record_id),
        Commands::Review {
            record_id,
            approver,
            approve,
            reject,
            note,
        } => update_cmds::run_review(&store, &record_id, &approver, approve, reject, note),
        Commands::History { planting_id } => update_cmds::run_history(&store, &planting_id),
    }
}
