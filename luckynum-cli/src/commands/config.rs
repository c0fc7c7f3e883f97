use crate::config::CliConfig;
use clap::Subcommand;
use luckynum_core::{GeneratorConfig, Result};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the active configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_config_command(
    cmd: ConfigCommands,
    cli: &CliConfig,
    loaded: Result<GeneratorConfig>,
) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let active = loaded?;
            println!("Config file: {}", cli.config_path().display());
            println!("{}", serde_json::to_string_pretty(&active)?);
        }
        ConfigCommands::Init { force } => {
            let path = cli.config_path();
            if let Err(e) = &loaded {
                tracing::debug!("Replacing unreadable config: {}", e);
            }
            if path.exists() && !force {
                println!("{} already exists; use --force to overwrite", path.display());
                return Ok(());
            }

            GeneratorConfig::default().save(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}
