use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::instrument;
use variant::{Config, Document, Uid};

use super::{terminal::Colorize, Input};

/// Command arguments for `variant list`.
#[derive(Debug, Parser)]
#[command(about = "List the regions in a document, in document order")]
pub struct List {
    #[command(flatten)]
    input: Input,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Row {
    index: usize,
    uid: Uid,
    name: String,
    bytes: usize,
}

fn rows(document: &Document<'_>) -> Vec<Row> {
    document
        .regions()
        .enumerate()
        .map(|(index, region)| Row {
            index,
            uid: region.uid(),
            name: region.name().to_string(),
            bytes: region.content().len(),
        })
        .collect()
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let source = self.input.read()?;
        let document = source
            .parse(self.input.pairing(config))
            .context("failed to scan document")?;
        let rows = rows(&document);

        match self.output {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(io::stdout(), &rows)
                    .context("failed to render json output")?;
                println!();
            }
            OutputFormat::Table => self
                .write_table(&mut io::stdout().lock(), &rows)
                .context("failed to write table")?,
        }
        Ok(())
    }

    fn write_table<W: Write>(&self, writer: &mut W, rows: &[Row]) -> io::Result<()> {
        if self.quiet {
            for row in rows {
                writeln!(writer, "{}\t{}\t{}", row.uid, row.name, row.bytes)?;
            }
            return Ok(());
        }

        if rows.is_empty() {
            return writeln!(writer, "{}", "No content elements found.".dim());
        }

        writeln!(writer, "{:<4} {:<12} {:<24} Bytes", "#", "Uid", "Name")?;
        for row in rows {
            writeln!(
                writer,
                "{:<4} {:<12} {:<24} {}",
                row.index, row.uid, row.name, row.bytes
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "{} region(s)", rows.len())
    }
}
