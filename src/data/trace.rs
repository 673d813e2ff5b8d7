use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::{data::DataError, tile_name::TileName};

/// A recorded drag gesture: one tile, picked up and moved around by the
/// pointer, then released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct DragTrace {
    /// The tile being dragged.
    pub tile: TileName,

    /// When the pointer was released, in milliseconds from the start of the
    /// gesture. Defaults to one throttle interval after the last move.
    #[serde(default)]
    pub release_at_ms: Option<u64>,

    /// Pointer positions, in the order they happened.
    #[serde(default)]
    pub moves: Vec<PointerMove>,

    #[serde(skip)]
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PointerMove {
    /// Milliseconds from the start of the gesture.
    pub at_ms: u64,

    /// Pointer position in board coordinates.
    pub pointer: (f64, f64),
}

impl PointerMove {
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

impl DragTrace {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut trace = Self::from_toml(&contents).map_err(|source| DataError::Toml {
            path: path.to_owned(),
            source,
        })?;
        trace.file_path = path.to_owned();

        Ok(trace)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// When the gesture ends, given the throttle interval used to replay it.
    pub fn release_at(&self, interval: Duration) -> Duration {
        match self.release_at_ms {
            Some(ms) => Duration::from_millis(ms),
            None => {
                let last = self.moves.iter().map(PointerMove::at).max();
                last.unwrap_or_default() + interval
            }
        }
    }
}
