use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::{Path, PathBuf},
};

mod check;
mod config;
mod list;
mod render;
mod terminal;

use anyhow::Context;
use check::Check;
use clap::ArgAction;
use list::List;
use render::Render;
use tracing::debug;
use variant::{Config, Pairing, Source};

/// Configuration file used when `--config` is not given.
const DEFAULT_CONFIG: &str = "variant.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file [default: ./variant.toml, if present]
    #[arg(short, long, global = true, env = "VARIANT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

        let command = match self.command {
            Command::Config(command) => return command.run(&path),
            command => command,
        };

        let config = if self.config.is_some() || path.exists() {
            Config::load(&path).map_err(anyhow::Error::msg)?
        } else {
            Config::default()
        };
        debug!(?config, path = %path.display(), "loaded configuration");

        command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the rendered document
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Render the document with a single region visible
    ///
    /// Every other region stays in the output, wrapped in a zero-opacity
    /// envelope.
    Render(Render),

    /// List the regions in a document
    List(List),

    /// Check that a document scans cleanly
    Check(Check),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Render(command) => command.run(config)?,
            Self::List(command) => command.run(config)?,
            Self::Check(command) => command.run(config)?,
            Self::Config(_) => unreachable!("handled before the configuration is loaded"),
        }
        Ok(())
    }
}

/// Input options shared by every command.
#[derive(Debug, Default, clap::Args)]
pub struct Input {
    /// Source document (defaults to stdin)
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Require each close tag to repeat its open tag's uid
    #[arg(long)]
    strict: bool,
}

impl Input {
    /// The pairing mode, with `--strict` overriding the configuration.
    const fn pairing(&self, config: &Config) -> Pairing {
        if self.strict {
            Pairing::Strict
        } else {
            config.pairing
        }
    }

    /// Read the whole source document.
    fn read(&self) -> anyhow::Result<Source> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Source::read(BufReader::new(file))
                    .with_context(|| format!("failed to read {}", path.display()))
            }
            None => Source::read(io::stdin().lock()).context("failed to read stdin"),
        }
    }

    /// Open the source document for reading.
    fn open(&self) -> anyhow::Result<Box<dyn Read>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

/// Write `bytes` to `path`, or to stdout if no path is given.
fn write_output(path: Option<&Path>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("failed to write stdout")?;
            stdout.flush().context("failed to write stdout")
        }
    }
}
