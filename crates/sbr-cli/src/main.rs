mod cmd_edit;
mod cmd_notes;
mod cmd_tasks;
mod show;

use clap::{ArgGroup, Parser};
use sbr_store::{Brain, Config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sb",
    version,
    about = "Second BRain.",
    arg_required_else_help = true
)]
#[command(group(ArgGroup::new("action").args([
    "daily", "nextdaily", "prevdaily", "open", "find", "tasks", "alltasks",
])))]
struct Cli {
    /// Target daily note
    #[arg(short, long)]
    daily: bool,
    /// Open target for edition
    #[arg(short, long)]
    edit: bool,
    /// Open file matching pattern
    #[arg(short, long, value_name = "REGEX")]
    find: Option<String>,
    /// List files matching a pattern
    #[arg(short, long, value_name = "REGEX")]
    grep: Option<String>,
    /// List notes
    #[arg(short, long)]
    list: bool,
    /// Target next daily note
    #[arg(short, long)]
    nextdaily: bool,
    /// Target existing note
    #[arg(short, long, value_name = "PATH")]
    open: Option<String>,
    /// Target previous daily note
    #[arg(short, long)]
    prevdaily: bool,
    /// List unchecked items in daily notes
    #[arg(short, long)]
    tasks: bool,
    /// List all items in daily notes with their locations
    #[arg(short = 'T', long)]
    alltasks: bool,
    /// View target content (default)
    #[arg(short, long, conflicts_with = "edit")]
    view: bool,
    /// Days of daily notes scanned for tasks (default: task_days from config)
    #[arg(long, value_name = "N")]
    days: Option<u32>,
    /// Print tasks as JSON instead of markdown
    #[arg(long)]
    json: bool,
    /// Config file (default: $SBR_CONFIG or ~/.config/sbr/config.yaml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = match &cli.config {
        Some(p) => p.clone(),
        None => Config::default_path()?,
    };
    let mut brain = Brain::load(&config_path)?;
    let days = cli.days.unwrap_or(brain.config().task_days);

    // ── Reports: print and exit ──

    if cli.list {
        return cmd_notes::list(&brain);
    }
    if let Some(pattern) = &cli.grep {
        return cmd_notes::grep(&mut brain, pattern);
    }
    if cli.alltasks {
        return cmd_tasks::all(&brain, days, cli.json);
    }
    if cli.tasks {
        return cmd_tasks::pending(&brain, days, cli.json);
    }

    // ── Target selection ──

    if let Some(pattern) = &cli.find {
        brain.find(pattern)?;
        if let Some(target) = brain.target() {
            tracing::info!("Matched {}", target.display());
        }
    } else if let Some(rel) = &cli.open {
        brain.open(rel)?;
    } else if cli.prevdaily {
        brain.prev_daily()?;
    } else if cli.nextdaily {
        brain.next_daily()?;
    } else {
        brain.daily()?;
    }

    if cli.view || !cli.edit {
        return cmd_notes::view(&brain);
    }
    cmd_edit::execute(&brain)
}
