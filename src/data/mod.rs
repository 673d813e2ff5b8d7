mod board;
mod trace;

use std::{io, path::PathBuf};

use thiserror::Error;

pub use board::*;
pub use trace::*;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{source} in {}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

impl DataError {
    /// Tells whether this error originated because of a path not existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            DataError::Io { source } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
