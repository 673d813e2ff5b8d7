use std::collections::HashMap;

use thiserror::Error;
use tilepack::{ItemId, PackError, Packer, Placement, Rect, Relocation};

use crate::{
    data::BoardConfig,
    snapshot::{BoardSnapshot, RegionSnapshot, TileSnapshot},
    tile_name::TileName,
};

/// A board being laid out: the packer plus the mapping from tile names to the
/// packer's ids.
#[derive(Debug)]
pub struct Board {
    name: String,
    packer: Packer<TileName>,
    ids: HashMap<TileName, ItemId>,
}

impl Board {
    /// Creates the board described by `config` and appends every tile to it,
    /// in order.
    pub fn from_config(config: &BoardConfig) -> Result<Self, Error> {
        log::trace!("Setting up board \"{}\"", config.name);

        let packer = Packer::with_segment_length(config.size, config.segment_length)?
            .snap_mode(config.snap.into());

        let mut board = Self {
            name: config.name.clone(),
            packer,
            ids: HashMap::new(),
        };

        for tile in &config.tiles {
            if board.ids.contains_key(&tile.name) {
                return Err(Error::DuplicateTile(tile.name.clone()));
            }

            let (x, y) = tile.position.unwrap_or((0.0, 0.0));
            let rect = Rect::new(x, y, tile.size.0, tile.size.1);

            let (id, placement) = board.packer.append(rect, tile.name.clone())?;
            board.ids.insert(tile.name.clone(), id);

            match placement {
                Placement::Placed { x, y } => {
                    log::trace!("Placed {} at ({}, {})", tile.name, x, y);
                }
                Placement::Exhausted => {
                    log::warn!(
                        "Board \"{}\" has no room for {} ({}x{}), leaving it at ({}, {})",
                        config.name,
                        tile.name,
                        tile.size.0,
                        tile.size.1,
                        x,
                        y
                    );
                }
            }
        }

        Ok(board)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn packer_mut(&mut self) -> &mut Packer<TileName> {
        &mut self.packer
    }

    pub fn id_of(&self, name: &TileName) -> Result<ItemId, Error> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownTile(name.clone()))
    }

    pub fn relayout(&mut self) {
        log::info!("Relaying out {} tiles", self.packer.len());
        self.packer.relayout();
    }

    pub fn align(&mut self) -> Result<(), Error> {
        log::info!("Aligning {} tiles to their columns", self.packer.len());
        self.packer.align_all(None)?;
        Ok(())
    }

    /// Drags the named tile toward `pointer`.
    pub fn drag(&mut self, name: &TileName, pointer: (f64, f64)) -> Result<Relocation, Error> {
        let id = self.id_of(name)?;
        let relocation = self.packer.relocate(id, pointer)?;

        if relocation.placement == Placement::Exhausted {
            log::warn!(
                "{} has no room to settle into near ({}, {})",
                name,
                pointer.0,
                pointer.1
            );
        }

        for &other in &relocation.unsettled {
            if let Some(item) = self.packer.item(other) {
                log::warn!(
                    "Dragging {} left no room for {}, which stays at ({}, {})",
                    name,
                    item.payload(),
                    item.rect().x,
                    item.rect().y
                );
            }
        }

        Ok(relocation)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let tiles = self
            .packer
            .items()
            .map(|item| TileSnapshot {
                name: item.payload().clone(),
                position: item.position(),
                size: item.size(),
                placed: item.is_placed(),
            })
            .collect();

        let free_space = self
            .packer
            .free_space()
            .iter()
            .map(|region| RegionSnapshot {
                position: region.position(),
                size: region.size(),
            })
            .collect();

        BoardSnapshot {
            name: self.name.clone(),
            size: self.packer.size(),
            tiles,
            free_space,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Tile \"{0}\" appears more than once")]
    DuplicateTile(TileName),

    #[error("There is no tile named \"{0}\"")]
    UnknownTile(TileName),

    #[error(transparent)]
    Pack {
        #[from]
        source: PackError,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::data::BoardConfig;

    fn gallery() -> BoardConfig {
        BoardConfig::from_toml(
            r#"
            name = "gallery"
            size = [1800, 15000]
            segment-length = 80

            [[tiles]]
            name = "a"
            size = [200, 100]

            [[tiles]]
            name = "b"
            size = [200, 100]

            [[tiles]]
            name = "c"
            size = [200, 100]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn tiles_are_appended_in_order() {
        let board = Board::from_config(&gallery()).unwrap();
        let snapshot = board.snapshot();

        let positions: Vec<_> = snapshot
            .tiles
            .iter()
            .map(|tile| (tile.name.to_string(), tile.position))
            .collect();

        assert_eq!(
            positions,
            vec![
                ("a".to_owned(), (0.0, 0.0)),
                ("b".to_owned(), (200.0, 0.0)),
                ("c".to_owned(), (400.0, 0.0)),
            ]
        );
        assert_eq!(snapshot.free_space.len(), 2);
        assert!(snapshot.tiles.iter().all(|tile| tile.placed));
    }

    #[test]
    fn drag_moves_tile() {
        let mut board = Board::from_config(&gallery()).unwrap();

        let relocation = board.drag(&TileName::new("b"), (0.0, 5000.0)).unwrap();

        assert_eq!(relocation.placement, Placement::Placed { x: 0.0, y: 100.0 });
        assert!(relocation.unsettled.is_empty());
    }

    #[test]
    fn unknown_and_duplicate_tiles() {
        let mut board = Board::from_config(&gallery()).unwrap();
        assert!(matches!(
            board.drag(&TileName::new("z"), (0.0, 0.0)),
            Err(Error::UnknownTile(_))
        ));

        let mut config = gallery();
        let repeated = config.tiles[0].clone();
        config.tiles.push(repeated);

        assert!(matches!(
            Board::from_config(&config),
            Err(Error::DuplicateTile(_))
        ));
    }

    #[test]
    fn invalid_tiles_are_rejected() {
        let mut config = gallery();
        config.tiles[1].size = (-5.0, 10.0);

        assert!(matches!(
            Board::from_config(&config),
            Err(Error::Pack {
                source: PackError::InvalidGeometry { .. }
            })
        ));
    }
}
