use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use tilepack::SnapMode;

use crate::{data::DataError, tile_name::TileName};

/// Describes a board and the tiles that should be packed onto it, contained
/// in a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BoardConfig {
    /// The name of the board, used in logs and in the output snapshot.
    pub name: String,

    /// Width and height of the board. Tiles never extend past it.
    pub size: (f64, f64),

    /// The width of one snapping column.
    #[serde(default = "default_segment_length")]
    pub segment_length: f64,

    /// Which positions a dragged tile may snap to.
    #[serde(default)]
    pub snap: SnapConfig,

    /// Tiles in the order they should be appended.
    #[serde(default)]
    pub tiles: Vec<TileConfig>,

    /// The path that this config came from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl BoardConfig {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut config = Self::from_toml(&contents).map_err(|source| DataError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

fn default_segment_length() -> f64 {
    tilepack::DEFAULT_SEGMENT_LENGTH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapConfig {
    /// Snap to the top row of columns and to the corners and bottom edges of
    /// other tiles.
    Anchors,

    /// Snap to a uniform grid of square cells covering the whole board.
    Grid,
}

impl Default for SnapConfig {
    fn default() -> Self {
        SnapConfig::Anchors
    }
}

impl From<SnapConfig> for SnapMode {
    fn from(config: SnapConfig) -> SnapMode {
        match config {
            SnapConfig::Anchors => SnapMode::Anchors,
            SnapConfig::Grid => SnapMode::Grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TileConfig {
    /// A name for the tile, unique within its board.
    pub name: TileName,

    /// Width and height of the tile.
    pub size: (f64, f64),

    /// Where the tile sits before packing. It stays here if the board has no
    /// room for it.
    #[serde(default)]
    pub position: Option<(f64, f64)>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimal_board() {
        let config = BoardConfig::from_toml(
            r#"
            name = "empty"
            size = [640, 480]
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "empty");
        assert_eq!(config.size, (640.0, 480.0));
        assert_eq!(config.segment_length, 60.0);
        assert_eq!(config.snap, SnapConfig::Anchors);
        assert!(config.tiles.is_empty());
    }

    #[test]
    fn full_board() {
        let config = BoardConfig::from_toml(
            r#"
            name = "gallery"
            size = [1800, 15000]
            segment-length = 80
            snap = "grid"

            [[tiles]]
            name = "hero"
            size = [400, 300]

            [[tiles]]
            name = "caption"
            size = [200.5, 100]
            position = [10, 20]
            "#,
        )
        .unwrap();

        assert_eq!(config.segment_length, 80.0);
        assert_eq!(config.snap, SnapConfig::Grid);
        assert_eq!(SnapMode::from(config.snap), SnapMode::Grid);
        assert_eq!(
            config.tiles,
            vec![
                TileConfig {
                    name: TileName::new("hero"),
                    size: (400.0, 300.0),
                    position: None,
                },
                TileConfig {
                    name: TileName::new("caption"),
                    size: (200.5, 100.0),
                    position: Some((10.0, 20.0)),
                },
            ]
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = BoardConfig::from_toml(
            r#"
            name = "typo"
            size = [10, 10]
            segment_length = 5
            "#,
        );

        assert!(result.is_err());
    }
}
