use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// The name a board file gives to a tile.
///
/// This is really just a string, but giving it its own type keeps tile names
/// from getting mixed up with other strings, and makes clones cheap since
/// every snapshot and log line carries one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileName(Arc<str>);

impl TileName {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        TileName(name.as_ref().into())
    }
}

impl AsRef<str> for TileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
