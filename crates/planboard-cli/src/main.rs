mod cmd_phase;
mod cmd_search;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use planboard_core::PhaseStatus;
use planboard_gateway::{GatewayConfig, HttpGateway};
use planboard_service::{NewPhase, PhaseUpdate, DEFAULT_TASK_FETCH_CONCURRENCY};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "planboard",
    version,
    about = "Phase boards and search over the planboard REST API"
)]
struct Cli {
    /// Path to config.json (default: <config dir>/planboard/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a project's phases with their task previews
    Phases {
        /// Project ID
        project_id: i64,
        /// Maximum task listings in flight
        #[arg(long, default_value_t = DEFAULT_TASK_FETCH_CONCURRENCY)]
        concurrency: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create, copy, update, move, or delete a phase
    Phase {
        #[command(subcommand)]
        cmd: PhaseCmd,
    },
    /// Search projects, phases, and tasks by keyword
    Search {
        /// Keyword, sent as-is
        keyword: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PhaseCmd {
    /// Create a phase in a project
    Create {
        /// Project ID
        project_id: i64,
        #[command(flatten)]
        fields: NewPhaseArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a copy of a phase (tasks are not copied)
    Copy {
        /// Project ID
        project_id: i64,
        #[command(flatten)]
        fields: NewPhaseArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a phase's name, description, or position
    Update {
        /// Phase ID
        phase_id: i64,
        /// Project the phase belongs to
        #[arg(long)]
        project: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        position: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a phase to an absolute position
    Move {
        /// Phase ID
        phase_id: i64,
        /// New position within the project
        position: i32,
    },
    /// Delete a phase
    Delete {
        /// Phase ID
        phase_id: i64,
    },
}

#[derive(Args)]
struct NewPhaseArgs {
    /// Phase name
    #[arg(long)]
    name: String,
    /// Description (default: empty)
    #[arg(long)]
    description: Option<String>,
    /// Position within the project
    #[arg(long, default_value_t = 0)]
    position: i32,
    /// NOT_STARTED, IN_PROGRESS or COMPLETED
    #[arg(long, default_value = "NOT_STARTED")]
    status: PhaseStatus,
    /// RFC 3339 start date (default: now)
    #[arg(long)]
    start_date: Option<String>,
    /// RFC 3339 end date
    #[arg(long)]
    end_date: Option<String>,
}

impl From<NewPhaseArgs> for NewPhase {
    fn from(args: NewPhaseArgs) -> Self {
        NewPhase {
            phase_name: args.name,
            description: args.description,
            order_index: args.position,
            status: args.status,
            start_date: args.start_date,
            end_date: args.end_date,
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PLANBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = GatewayConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    let gateway = HttpGateway::new(&config)?;
    let rt = tokio::runtime::Runtime::new()?;

    let output = match cli.cmd {
        Command::Phases {
            project_id,
            concurrency,
            json,
        } => rt.block_on(cmd_phase::list(&gateway, project_id, concurrency, json))?,
        Command::Phase { cmd } => match cmd {
            PhaseCmd::Create {
                project_id,
                fields,
                json,
            } => rt.block_on(cmd_phase::create(&gateway, project_id, fields.into(), json))?,
            PhaseCmd::Copy {
                project_id,
                fields,
                json,
            } => rt.block_on(cmd_phase::copy(&gateway, project_id, fields.into(), json))?,
            PhaseCmd::Update {
                phase_id,
                project,
                name,
                description,
                position,
                json,
            } => {
                let update = PhaseUpdate {
                    title: name,
                    description,
                    position,
                };
                rt.block_on(cmd_phase::update(&gateway, phase_id, update, project, json))?
            }
            PhaseCmd::Move { phase_id, position } => {
                rt.block_on(cmd_phase::move_to(&gateway, phase_id, position))?
            }
            PhaseCmd::Delete { phase_id } => rt.block_on(cmd_phase::delete(&gateway, phase_id))?,
        },
        Command::Search { keyword, json } => {
            rt.block_on(cmd_search::execute(&gateway, &keyword, json))?
        }
    };

    println!("{output}");
    Ok(())
}
