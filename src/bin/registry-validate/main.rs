//! `registry-validate`: checks a compiled card registry for duplicate ids,
//! inconsistent suits and other data-shape problems.

use clap::Parser;

#[path = "../../cli/logging.rs"]
mod logging;
mod terminal;
mod validate;

fn main() -> anyhow::Result<()> {
    validate::Validate::parse().run()
}
