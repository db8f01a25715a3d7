use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use codex_registry::Config;
use tracing::instrument;

/// The codex to read and the registry to write
#[derive(Debug, Default, Args)]
pub struct Compile {
    /// The markdown codex [default: docs/codex_abyssiae_master.md]
    pub input: Option<PathBuf>,

    /// Where to write the registry [default: assets/data/cards.json]
    pub output: Option<PathBuf>,
}

impl Compile {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let input = self.input.unwrap_or_else(|| config.input().to_path_buf());
        let output = self.output.unwrap_or_else(|| config.output().to_path_buf());

        let compilation = codex_registry::compile(&input, &output)
            .with_context(|| format!("failed to compile {}", input.display()))?;

        println!(
            "Wrote {} cards -> {}",
            compilation.registry().len(),
            output.display()
        );

        Ok(())
    }
}
