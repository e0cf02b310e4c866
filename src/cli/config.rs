use std::path::Path;

use anyhow::Context;
use tracing::instrument;
use variant::{Config, Pairing, Uid};

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set (uid, pairing)
        key: String,

        /// Value to set
        value: String,
    },

    /// Remove the configured uid
    Unset {
        /// Configuration key to clear (uid)
        key: String,
    },
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, path: &Path) -> anyhow::Result<()> {
        let mut config = load_or_default(path)?;

        match self.command {
            ConfigCommand::Show => {
                println!("Configuration ({}):", path.display().to_string().dim());
                match config.uid {
                    Some(uid) => println!("  uid: {uid}"),
                    None => println!("  uid: {}", "unset".dim()),
                }
                println!("  pairing: {}", pairing_name(config.pairing));
                return Ok(());
            }
            ConfigCommand::Set { key, value } => set(&mut config, &key, &value)?,
            ConfigCommand::Unset { key } => match key.as_str() {
                "uid" => config.uid = None,
                _ => anyhow::bail!("Unknown or required configuration key: {key}"),
            },
        }

        config.save(path).map_err(anyhow::Error::msg)?;
        println!("{}", format!("Saved {}", path.display()).success());
        Ok(())
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Config::load(path).map_err(anyhow::Error::msg)
    } else {
        Ok(Config::default())
    }
}

fn set(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "uid" => {
            let uid: Uid = value.parse().context("Value must be a 32-bit integer")?;
            config.uid = Some(uid);
        }
        "pairing" => {
            config.pairing = match value {
                "positional" => Pairing::Positional,
                "strict" => Pairing::Strict,
                _ => anyhow::bail!("Value must be 'positional' or 'strict'"),
            };
        }
        _ => anyhow::bail!("Unknown configuration key: {key}"),
    }
    Ok(())
}

const fn pairing_name(pairing: Pairing) -> &'static str {
    match pairing {
        Pairing::Positional => "positional",
        Pairing::Strict => "strict",
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn run(path: &Path, command: ConfigCommand) -> anyhow::Result<()> {
        Command { command }.run(path)
    }

    #[test]
    fn set_creates_config_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("variant.toml");

        run(
            &path,
            ConfigCommand::Set {
                key: "uid".to_string(),
                value: "32987".to_string(),
            },
        )
        .unwrap();
        run(
            &path,
            ConfigCommand::Set {
                key: "pairing".to_string(),
                value: "strict".to_string(),
            },
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.uid, Some(Uid::new(32987)));
        assert_eq!(config.pairing, Pairing::Strict);
    }

    #[test]
    fn unset_clears_uid() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("variant.toml");
        Config {
            uid: Some(Uid::new(1)),
            pairing: Pairing::Strict,
        }
        .save(&path)
        .unwrap();

        run(
            &path,
            ConfigCommand::Unset {
                key: "uid".to_string(),
            },
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.uid, None);
        assert_eq!(config.pairing, Pairing::Strict);
    }

    #[test]
    fn rejects_bad_values_without_writing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("variant.toml");

        let error = run(
            &path,
            ConfigCommand::Set {
                key: "uid".to_string(),
                value: "abc".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "Value must be a 32-bit integer");

        assert!(run(
            &path,
            ConfigCommand::Set {
                key: "pairing".to_string(),
                value: "loose".to_string(),
            },
        )
        .is_err());
        assert!(run(
            &path,
            ConfigCommand::Set {
                key: "colour".to_string(),
                value: "red".to_string(),
            },
        )
        .is_err());

        assert!(!path.exists());
    }
}
