use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Asset manifest describing all atlases and named sprites for a game.
/// Games build one during preload; the host reads it as JSON to know which
/// images to fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases. A plain image is a 1×1 atlas.
    pub atlases: Vec<AtlasDescriptor>,
    /// Named sprite lookup: name → atlas index + cell coordinates.
    #[serde(default)]
    pub sprites: BTreeMap<String, SpriteDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "tile").
    pub name: String,
    /// Number of columns in the atlas grid.
    #[serde(default = "one")]
    pub cols: u32,
    /// Number of rows in the atlas grid.
    #[serde(default = "one")]
    pub rows: u32,
    /// Relative path to the image file (e.g., "tile.png").
    pub path: String,
}

/// Describes a named sprite within an atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Column in the atlas grid.
    #[serde(default)]
    pub col: u32,
    /// Row in the atlas grid.
    #[serde(default)]
    pub row: u32,
}

fn one() -> u32 {
    1
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the manifest for the host.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}
