pub mod compiler;
/// Parsing of the markdown codex.
pub mod markdown;
mod registry;

pub use compiler::{Compilation, CompileError, compile, compile_markdown};
pub use registry::{ReadError, Registry, WriteError};
