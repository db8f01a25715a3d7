//! Card Registry Compiler
//!
//! Card descriptions are authored as a markdown codex and compiled into a
//! JSON registry of normalized card records.

pub mod domain;
pub use domain::{CardRecord, Config, Issue, Suit};

/// Reading the codex and reading and writing the registry.
pub mod storage;
pub use storage::{Compilation, CompileError, Registry, compile};
