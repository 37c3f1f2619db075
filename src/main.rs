//! reposcan: lists git repositories under a directory together with their status

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;

use reposcan::commands::handle_list_command;
use reposcan::core::{Settings, SettingsOverrides, ENV_FETCH, ENV_JOBS, ENV_OUTPUT, ENV_ROOT};
use reposcan::output::{OutputFormat, Style};

#[derive(Parser)]
#[command(name = "reposcan")]
#[command(about = "List git repositories under a directory and show their status")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status of every repository found under the root
    List(ListArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Directory to scan [default: ~/repositories]
    #[arg(short, long, env = ENV_ROOT)]
    root: Option<String>,

    /// Fetch from all remotes before reading the status
    #[arg(short, long, env = ENV_FETCH)]
    fetch: bool,

    /// Output format
    #[arg(short, long = "out", env = ENV_OUTPUT, value_enum)]
    out: Option<OutputFormat>,

    /// Number of repositories loaded at the same time
    #[arg(short, long, env = ENV_JOBS)]
    jobs: Option<usize>,

    /// Don't color the output
    #[arg(long)]
    no_color: bool,
}

impl From<&ListArgs> for SettingsOverrides {
    fn from(args: &ListArgs) -> Self {
        Self {
            root: args.root.clone(),
            fetch: args.fetch,
            output: args.out,
            jobs: args.jobs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::List(args) => {
            let settings = Settings::load(SettingsOverrides::from(&args))?;
            let style = if args.no_color { Style::PLAIN } else { Style::COLORED };
            handle_list_command(settings, style).await
        }
    }
}
