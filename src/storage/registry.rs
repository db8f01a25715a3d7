use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::CardRecord;

/// An ordered collection of compiled cards, as stored in the JSON registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    cards: Vec<CardRecord>,
}

impl Registry {
    /// Creates a registry holding `cards` in the given order.
    #[must_use]
    pub const fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }

    /// The cards, in registry order.
    #[must_use]
    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    /// The number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the registry holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Writes the registry as a pretty-printed JSON array.
    ///
    /// Indentation is two spaces and non-ASCII text is written as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.cards)
    }

    /// Writes the registry to `path`, replacing any existing file.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory cannot be created or if the file
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), WriteError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| WriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush().map_err(|source| WriteError::Create {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a registry previously written by [`Self::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or does not hold a JSON
    /// array of cards.
    pub fn load(path: &Path) -> Result<Self, ReadError> {
        let file = File::open(path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
            _ => ReadError::Io(io_error),
        })?;

        let cards = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self { cards })
    }
}

/// Errors that can occur when writing a registry.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The output directory could not be created.
    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The output file could not be created or written.
    #[error("failed to write {}", .path.display())]
    Create {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The cards could not be serialized.
    #[error("failed to serialize cards")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that can occur when reading a registry.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The registry file was not found.
    #[error("registry not found at {}", .0.display())]
    NotFound(PathBuf),
    /// An I/O error occurred.
    #[error("failed to read registry")]
    Io(#[from] io::Error),
    /// The file is not a valid registry.
    #[error("failed to parse registry")]
    Json(#[from] serde_json::Error),
}
