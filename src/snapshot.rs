use std::{
    io::{self, BufWriter, Write},
    path::Path,
};

use fs_err as fs;
use serde::Serialize;

use crate::tile_name::TileName;

/// Where every tile on a board ended up, plus the board's remaining free
/// space. This is what Tiler prints after every command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BoardSnapshot {
    pub name: String,
    pub size: (f64, f64),
    pub tiles: Vec<TileSnapshot>,
    pub free_space: Vec<RegionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TileSnapshot {
    pub name: TileName,
    pub position: (f64, f64),
    pub size: (f64, f64),

    /// False if the board had no room for this tile, in which case it's
    /// still wherever it started out.
    pub placed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegionSnapshot {
    pub position: (f64, f64),
    pub size: (f64, f64),
}

impl BoardSnapshot {
    /// Writes the snapshot as pretty-printed JSON to `output`, or to stdout if
    /// no path is given.
    pub fn write(&self, output: Option<&Path>) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                if let Some(folder) = path.parent() {
                    fs::create_dir_all(folder)?;
                }

                let mut file = BufWriter::new(fs::File::create(path)?);
                self.write_to(&mut file)?;
                file.flush()?;

                log::info!("Wrote snapshot of \"{}\" to {}", self.name, path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.write_to(&mut handle)?;
                handle.flush()?;
            }
        }

        Ok(())
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}
