//! `registry-compile`: compiles a markdown codex into a JSON card registry.

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
