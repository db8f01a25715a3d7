use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration for the registry compiler.
///
/// Holds the default locations of the codex and the compiled registry. Paths
/// given on the command line take precedence over these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// The markdown codex to compile.
    input: PathBuf,

    /// Where the compiled registry is written.
    output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

impl Config {
    /// The file name looked up in the working directory when no configuration
    /// path is given explicitly.
    pub const FILE_NAME: &'static str = "registry.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration from `path` if given, otherwise from
    /// [`Self::FILE_NAME`] when that file exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, or if the
    /// chosen file cannot be read or parsed.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let implicit = Path::new(Self::FILE_NAME);
                if implicit.is_file() {
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The markdown codex to compile.
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Where the compiled registry is written.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("docs/codex_abyssiae_master.md")
}

fn default_output() -> PathBuf {
    PathBuf::from("assets/data/cards.json")
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}", .path.display())]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        /// The file that was parsed.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_input")]
        input: PathBuf,

        #[serde(default = "default_output")]
        output: PathBuf,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { input, output } => Self { input, output },
        }
    }
}
