use glam::Vec2;

use crate::api::types::{Color, EntityId};
use crate::assets::registry::SpriteRegistry;
use crate::components::entity::Entity;
use crate::components::sprite::SpriteComponent;
use crate::components::tilemap::{Tile, TilemapComponent};
use crate::core::collision::CollisionWorld;
use crate::core::scene::Scene;
use crate::core::time::FrameTime;
use crate::error::EngineError;
use crate::input::keyboard::KeyboardState;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera2D;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Viewport width in world units.
    pub viewport_width: f32,
    /// Viewport height in world units.
    pub viewport_height: f32,
    /// Clear color behind the tilemap.
    pub background: Color,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            background: Color::rgb8(0x12, 0x55, 0x55),
            max_instances: 512,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before preload.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Register every image the game will use.
    fn preload(&mut self, _assets: &mut SpriteRegistry) -> Result<(), EngineError> {
        Ok(())
    }

    /// Build the world: tilemap, entities, collision bodies, camera.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError>;

    /// Called once per rendered frame. `input` holds this frame's raw events;
    /// `ctx.keyboard` already reflects them.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, frame: FrameTime);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub collisions: CollisionWorld,
    pub tilemap: Option<TilemapComponent>,
    pub camera: Camera2D,
    pub keyboard: KeyboardState,
    pub assets: SpriteRegistry,
    follow: Option<EntityId>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            collisions: CollisionWorld::new(),
            tilemap: None,
            camera: Camera2D::new(config.viewport_width, config.viewport_height),
            keyboard: KeyboardState::new(),
            assets: SpriteRegistry::new(),
            follow: None,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replace the tilemap with a blank `width × height` grid drawn with
    /// `sprite`'s atlas.
    pub fn create_tilemap(
        &mut self,
        tile_size: f32,
        width: u32,
        height: u32,
        sprite: &SpriteComponent,
    ) -> &mut TilemapComponent {
        log::debug!("tilemap {}x{} cells of {} units", width, height, tile_size);
        self.tilemap
            .insert(TilemapComponent::new(width, height, tile_size).with_atlas(sprite.atlas))
    }

    /// Stamp a tile at cell (x, y).
    pub fn put_tile(&mut self, x: u32, y: u32) -> Result<(), EngineError> {
        let tilemap = self.tilemap.as_mut().ok_or(EngineError::NoTilemap)?;
        if !tilemap.contains(x, y) {
            return Err(EngineError::TileOutOfBounds {
                x,
                y,
                width: tilemap.width,
                height: tilemap.height,
            });
        }
        tilemap.set(x, y, Some(Tile::new(0.0, 0.0)));
        Ok(())
    }

    /// Spawn an entity showing the named sprite, centered at `pos` and
    /// drawn `size` units wide.
    pub fn add_sprite(&mut self, name: &str, pos: Vec2, size: f32) -> Result<EntityId, EngineError> {
        let sprite = self.assets.sprite(name)?;
        let id = self.next_id();
        self.scene.spawn(
            Entity::new(id)
                .with_tag(name)
                .with_pos(pos)
                .with_scale(Vec2::splat(size))
                .with_sprite(sprite),
        );
        Ok(id)
    }

    /// Keep the camera on `id` from now on. The camera snaps to it right away.
    pub fn start_follow(&mut self, id: EntityId) {
        self.follow = Some(id);
        if let Some(entity) = self.scene.get(id) {
            self.camera.look_at(entity.pos);
        }
    }

    pub fn following(&self) -> Option<EntityId> {
        self.follow
    }

    /// Move the camera toward the followed entity. `dt` in seconds.
    pub fn update_camera(&mut self, dt: f32) {
        let target = self.follow.and_then(|id| self.scene.get(id)).map(|e| e.pos);
        if let Some(target) = target {
            self.camera.follow(target, dt);
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
