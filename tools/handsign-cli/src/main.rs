//! Handsign CLI: command-line interface for replaying hand landmark logs.
//!
//! Usage:
//!   handsign classify <LOG>     Classify every frame of a frame log
//!   handsign count <LOG>        Count how often a gesture starts
//!   handsign synth [OPTIONS]    Write a synthetic frame log
//!   handsign config show|init   Inspect or create the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use handsign_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "handsign",
    about = "Hand gesture classification from landmark frame logs",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/handsign/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every frame of a JSONL frame log
    Classify {
        /// Path to the frame log
        path: PathBuf,

        /// Thumb distance metric: spatial|planar (overrides config)
        #[arg(long)]
        thumb_metric: Option<String>,

        /// Write per-frame results as JSONL
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Count rising edges of one gesture in a frame log
    Count {
        /// Path to the frame log
        path: PathBuf,

        /// Gesture to count
        #[arg(short, long, default_value = "index_up")]
        gesture: String,
    },

    /// Write a synthetic frame log from a list of poses
    Synth {
        /// Comma-separated poses: gesture names, `none`, or `malformed`
        #[arg(long, value_delimiter = ',', required = true)]
        poses: Vec<String>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Nominal frame rate
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Frames per pose
        #[arg(long, default_value = "1")]
        hold: u32,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a config file with defaults and the built-in gesture table
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config init` must work even when the target file is missing or broken.
    let writes_config = matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Init { .. }
        }
    );
    let config = match &cli.config {
        _ if writes_config => AppConfig::default(),
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    handsign_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Classify {
            path,
            thumb_metric,
            output,
            quiet,
        } => commands::classify::run(&config, path, thumb_metric, output, quiet),
        Commands::Count { path, gesture } => commands::count::run(&config, path, gesture),
        Commands::Synth {
            poses,
            output,
            fps,
            hold,
        } => commands::synth::run(poses, output, fps, hold),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(cli.config, force),
        },
    }
}
