use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, instrument};
use variant::{Config, Uid};

use super::{write_output, Input};

#[derive(Debug, Parser)]
#[command(about = "Render the document with a single region visible")]
pub struct Render {
    /// Uid of the region to show
    #[arg(short, long, env = "VARIANT_UID")]
    pub(super) uid: Option<Uid>,

    #[command(flatten)]
    pub(super) input: Input,

    /// Destination for the rendered document (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub(super) output: Option<PathBuf>,
}

impl Render {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let uid = config.resolve_uid(self.uid).context(
            "no uid to render: pass --uid, set VARIANT_UID, or set `uid` in the config file",
        )?;
        let pairing = self.input.pairing(config);

        // Render fully before touching the output, so a scan failure leaves it
        // alone.
        let mut rendered = Vec::new();
        let summary =
            variant::render_variant(self.input.open()?, &mut rendered, uid, pairing)
                .context("failed to render document")?;

        info!(
            %uid,
            regions = summary.regions,
            visible = summary.visible,
            "rendered document"
        );

        write_output(self.output.as_deref(), &rendered)
    }
}
