mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rogue",
    about = "Rogue AI Protocol: a narrative skills assessment played from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Game root (default: auto-detect from .rogue/)
    #[arg(long, global = true, env = "ROGUE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Override the pause before a decision's outcome is shown
    #[arg(long, global = true, env = "ROGUE_PACING_MS")]
    pacing_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .rogue/ with a default config and a fresh game
    Init,

    /// Show phase, scenario, progress, and score
    Status,

    /// Begin the mission, or continue where you left off
    Start,

    /// Skip the mission briefing
    SkipIntro,

    /// Show the current question
    Question,

    /// Answer the current question
    Choose {
        /// Option id, as listed by `rogue question`
        option: String,

        /// Time taken to answer, for the speed bonus. Measured from when the
        /// question was shown unless given
        #[arg(long)]
        elapsed_ms: Option<u64>,
    },

    /// List the scenario catalog
    Scenarios {
        /// Only scenarios in this phase
        #[arg(long)]
        phase: Option<String>,
    },

    /// Show the analysis report
    Results,

    /// Start over from the briefing
    Reset,

    /// Inspect or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Start => cmd::start::run(&root, cli.json),
        Commands::SkipIntro => cmd::start::skip_intro(&root, cli.json),
        Commands::Question => cmd::question::run(&root, cli.json),
        Commands::Choose { option, elapsed_ms } => {
            cmd::choose::run(&root, &option, elapsed_ms, cli.pacing_ms, cli.json)
        }
        Commands::Scenarios { phase } => cmd::scenarios::run(&root, phase.as_deref(), cli.json),
        Commands::Results => cmd::results::run(&root, cli.json),
        Commands::Reset => cmd::reset::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
