use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::sprite::SpriteComponent;
use crate::core::collision::BodyHandle;

/// Something placed in the world: a sprite, a collision body, or both.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Free-form label; `add_sprite` uses the sprite name.
    pub tag: String,
    /// Inactive entities are not drawn.
    pub active: bool,
    /// Sprite center in world space.
    pub pos: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Drawn size in world units.
    pub scale: Vec2,
    pub sprite: Option<SpriteComponent>,
    /// Body in the engine's `CollisionWorld`, if the entity collides.
    pub body: Option<BodyHandle>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            sprite: None,
            body: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }
}
