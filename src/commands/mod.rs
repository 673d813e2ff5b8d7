mod drag;
mod layout;

pub use drag::*;
pub use layout::*;

use std::path::Path;

use anyhow::{bail, Context};

use crate::data::BoardConfig;

fn read_board(path: &Path) -> anyhow::Result<BoardConfig> {
    match BoardConfig::read_from_file(path) {
        Ok(config) => Ok(config),
        Err(err) if err.is_not_found() => bail!("No board file found at {}", path.display()),
        Err(err) => Err(err).context("Could not read board file"),
    }
}

