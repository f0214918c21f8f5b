//! `pathfinder config`: inspect and edit the config file

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one value
    Get {
        /// One of: data_dir, backend, host, port
        key: String,
    },
    /// Change one value and save
    Set { key: String, value: String },
    /// Print every key
    List,
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();

    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load_from(&path)?;
            if !Config::keys().contains(&key.as_str()) {
                anyhow::bail!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::keys().join(", ")
                );
            }
            println!("{}", config.get(key).unwrap_or_default());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            config.set(key, value)?;
            config.save_to(&path)?;
            tracing::info!("Updated {} in {}", key, path.display());
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::List => {
            let config = Config::load_from(&path)?;
            println!("# {}", path.display());
            for key in Config::keys() {
                let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
                println!("{} = {}", key, value);
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save_to(&path)?;
            println!("Created config file at {}", path.display());
        }
    }

    Ok(())
}
