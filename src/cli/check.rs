use std::{collections::BTreeMap, process};

use anyhow::Context;
use clap::Parser;
use tracing::instrument;
use variant::{Config, Document, Uid};

use super::{terminal::Colorize, Input};

#[derive(Debug, Parser, Default)]
#[command(about = "Check that a document scans cleanly and report shared uids")]
pub struct Check {
    #[command(flatten)]
    input: Input,

    /// Also check that exactly one region has this uid
    #[arg(short, long)]
    uid: Option<Uid>,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Report {
    elements: usize,
    regions: usize,
    /// Uids used by more than one region, with their counts.
    shared: BTreeMap<Uid, usize>,
    /// Regions matching the requested uid, if one was given.
    matches: Option<usize>,
}

impl Report {
    fn new(document: &Document<'_>, uid: Option<Uid>) -> Self {
        let mut counts: BTreeMap<Uid, usize> = BTreeMap::new();
        for region in document.regions() {
            *counts.entry(region.uid()).or_insert(0) += 1;
        }

        let regions = counts.values().sum();
        let matches = uid.map(|uid| counts.get(&uid).copied().unwrap_or(0));
        counts.retain(|_, count| *count > 1);

        Self {
            elements: document.len(),
            regions,
            shared: counts,
            matches,
        }
    }

    /// Exit code: 0 when clean, 2 when the requested uid does not select
    /// exactly one region.
    fn exit_code(&self) -> i32 {
        match self.matches {
            Some(1) | None => 0,
            Some(_) => 2,
        }
    }
}

impl Check {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let source = self.input.read()?;
        let document = source
            .parse(self.input.pairing(config))
            .context("failed to scan document")?;
        let report = Report::new(&document, self.uid);

        if !self.quiet {
            self.print(&report);
        }

        let exit_code = report.exit_code();
        if exit_code != 0 {
            process::exit(exit_code);
        }
        Ok(())
    }

    fn print(&self, report: &Report) {
        println!(
            "{} {} element(s), {} region(s)",
            "OK".success(),
            report.elements,
            report.regions
        );

        for (uid, count) in &report.shared {
            println!(
                "{} uid {uid} is shared by {count} regions",
                "warning:".warning()
            );
        }

        if let (Some(uid), Some(matches)) = (self.uid, report.matches) {
            match matches {
                0 => println!(
                    "{} uid {uid} matches no region; every region would be hidden",
                    "warning:".warning()
                ),
                1 => println!("uid {} selects one region", uid.to_string().success()),
                n => println!(
                    "{} uid {uid} selects {n} regions; all would be shown",
                    "warning:".warning()
                ),
            }
        }
    }
}
