use std::path::PathBuf;

mod compile;
mod logging;

use clap::ArgAction;
use codex_registry::Config;
use compile::Compile;

/// Compile a markdown codex into a JSON card registry
///
/// Use `registry-validate` to check a compiled registry.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file [default: registry.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    compile: Compile,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        logging::setup(self.verbose);

        let config = Config::discover(self.config.as_deref())?;

        self.compile.run(&config)
    }
}
