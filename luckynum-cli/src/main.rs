mod commands;
mod config;
mod render;

use clap::{Parser, Subcommand};
use config::CliConfig;
use luckynum_core::{GeneratorConfig, LuckyError};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "luckynum")]
#[command(about = "Lucky number generator - six numbers from your favourite digits")]
#[command(version)]
struct Cli {
    /// Data directory holding luckynum.json
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the digit pool for some numbers
    Pool(commands::PoolArgs),

    /// Draw six numbers at once
    Draw(commands::DrawArgs),

    /// Reveal six numbers one at a time
    Reveal(commands::RevealArgs),

    /// Interactive session
    Play(commands::PlayArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(commands::ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cli_config = CliConfig::new(cli.data_dir, cli.verbose);

    // Initialize logging
    let log_level = if cli_config.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "luckynum={},luckynum_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Config commands must work even when the file is broken, so they get
    // the load result instead of a validated config.
    let loaded = GeneratorConfig::load(cli_config.config_path());

    // Execute command
    let result = match cli.command {
        Commands::Config(cmd) => commands::handle_config_command(cmd, &cli_config, loaded),
        Commands::Pool(args) => loaded.and_then(|g| commands::handle_pool(args, &g)),
        Commands::Draw(args) => loaded.and_then(|g| commands::handle_draw(args, &g)),
        Commands::Reveal(args) => match loaded {
            Ok(g) => commands::handle_reveal(args, &g).await,
            Err(e) => Err(e),
        },
        Commands::Play(args) => match loaded {
            Ok(g) => commands::handle_play(args, &g).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        match e {
            LuckyError::InsufficientCombinations {
                drawn,
                needed,
                attempts,
            } => {
                eprintln!("Error: {}", e);
                eprintln!(
                    "Drew {} of {} numbers after {} attempts",
                    drawn, needed, attempts
                );
            }
            LuckyError::EmptyPool | LuckyError::EmptyInput => {
                eprintln!("Error: {}", e);
                eprintln!("Pass one or more numbers, e.g. 'luckynum draw 1988 2025'");
            }
            LuckyError::Config(_) | LuckyError::Serialization(_) => {
                eprintln!("Error: {}: {}", cli_config.config_path().display(), e);
                eprintln!("Use 'luckynum config init --force' to reset it");
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

