use std::collections::HashMap;
use crate::assets::manifest::{AssetManifest, AtlasDescriptor, SpriteDescriptor};
use crate::components::sprite::{SpriteComponent, AtlasId};
use crate::error::EngineError;

/// Registry of named sprites.
/// Filled by the game's preload step (or from an external manifest), then
/// used for name-based sprite lookup while building the scene.
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
    manifest: AssetManifest,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
            manifest: AssetManifest::default(),
        }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            sprites.insert(name.clone(), SpriteComponent {
                atlas: AtlasId(desc.atlas),
                col: desc.col as f32,
                row: desc.row as f32,
                alpha: 1.0,
            });
        }
        Self {
            sprites,
            manifest: manifest.clone(),
        }
    }

    /// Register a standalone image under `name`, as its own 1×1 atlas.
    pub fn load_image(&mut self, name: &str, path: &str) -> Result<SpriteComponent, EngineError> {
        if self.sprites.contains_key(name) {
            return Err(EngineError::DuplicateAsset(name.to_string()));
        }

        let atlas = self.manifest.atlases.len() as u32;
        self.manifest.atlases.push(AtlasDescriptor {
            name: name.to_string(),
            cols: 1,
            rows: 1,
            path: path.to_string(),
        });
        self.manifest.sprites.insert(
            name.to_string(),
            SpriteDescriptor { atlas, col: 0, row: 0 },
        );

        let sprite = SpriteComponent::whole(AtlasId(atlas));
        self.sprites.insert(name.to_string(), sprite.clone());
        log::debug!("registered image `{}` ({}) as atlas {}", name, path, atlas);
        Ok(sprite)
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    /// Look up a sprite that must have been registered.
    pub fn sprite(&self, name: &str) -> Result<SpriteComponent, EngineError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownAsset(name.to_string()))
    }

    /// Manifest of everything registered so far.
    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
