pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{Color, EntityId};
pub use components::entity::Entity;
pub use components::sprite::{SpriteComponent, AtlasId};
pub use components::tilemap::{TilemapComponent, Tile};
pub use core::collision::{BodyHandle, BodyShape, CollisionWorld, Overlap};
pub use core::scene::Scene;
pub use core::time::{FrameClock, FrameTime};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::Camera2D;
pub use input::keyboard::{key, CursorKeys, KeyboardState};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_render_buffer;
pub use error::EngineError;
