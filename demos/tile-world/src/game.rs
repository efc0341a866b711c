use tileworld::*;
use tileworld::api::game::GameConfig;
use tileworld::input::queue::InputQueue;

use crate::level::{LevelGrid, Obstacle, PartLayout, TILE_SIZE};
use crate::motion::{Resolution, Resolver};
use crate::settings::DemoSettings;

/// Keyboard-driven circle walking through a repeating field of tiles,
/// boxes and circles, pushed out of whatever it walks into.
pub struct TileWorldDemo {
    settings: DemoSettings,
    resolver: Resolver,
    /// The avatar's scene entity. Its collision body lives on the entity.
    player: Option<EntityId>,
    last_resolution: Resolution,
}

impl TileWorldDemo {
    pub fn new() -> Self {
        Self::with_settings(DemoSettings::default())
    }

    pub fn with_settings(settings: DemoSettings) -> Self {
        Self {
            resolver: Resolver::from_settings(&settings),
            settings,
            player: None,
            last_resolution: Resolution::default(),
        }
    }

    pub fn settings(&self) -> &DemoSettings {
        &self.settings
    }

    pub fn player_entity(&self) -> Option<EntityId> {
        self.player
    }

    /// Correction loop outcome of the latest frame.
    pub fn last_resolution(&self) -> Resolution {
        self.last_resolution
    }

    fn add_character(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        let spawn = self.settings.spawn_point();
        let radius = self.settings.player_radius;

        let body = ctx.collisions.create_circle(spawn, radius)?;
        let entity = ctx.add_sprite("character", spawn, radius * 2.0)?;
        if let Some(e) = ctx.scene.get_mut(entity) {
            e.body = Some(body);
        }

        ctx.camera.set_smoothing(self.settings.camera_smoothing);
        ctx.start_follow(entity);
        self.player = Some(entity);
        Ok(())
    }

    fn add_world_part(ctx: &mut EngineContext, layout: &PartLayout) -> Result<(), EngineError> {
        for &(x, y) in &layout.tiles {
            ctx.put_tile(x, y)?;
            add_obstacle(ctx, Obstacle::tile_at(x, y))?;
        }
        for prop in &layout.rects {
            ctx.add_sprite("rect", prop.center, prop.size)?;
            add_obstacle(ctx, prop.obstacle)?;
        }
        for prop in &layout.circles {
            ctx.add_sprite("circ", prop.center, prop.size)?;
            add_obstacle(ctx, prop.obstacle)?;
        }
        Ok(())
    }
}

impl Default for TileWorldDemo {
    fn default() -> Self {
        Self::new()
    }
}

fn add_obstacle(ctx: &mut EngineContext, obstacle: Obstacle) -> Result<BodyHandle, EngineError> {
    match obstacle {
        Obstacle::Box { top_left, size } => ctx.collisions.create_box(top_left, size.x, size.y),
        Obstacle::Circle { center, radius } => ctx.collisions.create_circle(center, radius),
    }
}

impl Game for TileWorldDemo {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        match Color::from_hex(&self.settings.background) {
            Ok(color) => config.background = color,
            Err(e) => log::warn!("{}, keeping the default background", e),
        }
        config
    }

    fn preload(&mut self, assets: &mut SpriteRegistry) -> Result<(), EngineError> {
        assets.load_image("tile", "tile.png")?;
        assets.load_image("rect", "rect.png")?;
        assets.load_image("circ", "circ.png")?;
        assets.load_image("character", "character.png")?;
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        let grid = LevelGrid::new(self.settings.parts_wide, self.settings.parts_high);
        let (cols, rows) = grid.tile_dims();
        let tile = ctx.assets.sprite("tile")?;
        ctx.create_tilemap(TILE_SIZE, cols, rows, &tile);

        self.add_character(ctx)?;

        for part in grid.parts() {
            Self::add_world_part(ctx, &part.layout())?;
        }

        log::debug!(
            "level: {} parts, {} tiles, {} bodies",
            grid.cols * grid.rows,
            ctx.tilemap.as_ref().map_or(0, |t| t.tile_count()),
            ctx.collisions.len()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, _input: &InputQueue, frame: FrameTime) {
        let Some(player) = self.player else {
            return;
        };
        let Some(body) = ctx.scene.get(player).and_then(|e| e.body) else {
            log::warn!("player {:?} has no collision body", player);
            return;
        };

        let keys = ctx.keyboard.cursor_keys();
        self.last_resolution = self
            .resolver
            .step(&mut ctx.collisions, body, keys, frame.delta_ms);

        let Some(pos) = ctx.collisions.position(body) else {
            log::warn!("player body {:?} is not in the collision world", body);
            return;
        };
        if let Some(entity) = ctx.scene.get_mut(player) {
            entity.pos = pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn small_demo() -> (TileWorldDemo, EngineContext) {
        let settings = DemoSettings {
            parts_wide: 2,
            parts_high: 2,
            ..DemoSettings::default()
        };
        let mut demo = TileWorldDemo::with_settings(settings);
        let mut ctx = EngineContext::new(&demo.config());
        demo.preload(&mut ctx.assets).unwrap();
        demo.init(&mut ctx).unwrap();
        (demo, ctx)
    }

    fn frame(delta_ms: f32) -> FrameTime {
        FrameTime { elapsed_ms: 0.0, delta_ms }
    }

    #[test]
    fn init_builds_every_part() {
        let (demo, ctx) = small_demo();

        // 4 parts × (15 tiles + 3 rects + 3 circles) + the player.
        assert_eq!(ctx.collisions.len(), 4 * 21 + 1);
        // Rect and circle sprites plus the player sprite.
        assert_eq!(ctx.scene.len(), 4 * 6 + 1);

        let tilemap = ctx.tilemap.as_ref().unwrap();
        assert_eq!((tilemap.width, tilemap.height), (32, 24));
        assert_eq!(tilemap.tile_count(), 4 * 15);
        assert!(tilemap.get(16 + 3, 12 + 7).is_some());

        let player = ctx.scene.get(demo.player_entity().unwrap()).unwrap();
        assert_eq!(player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(ctx.camera.center, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn held_key_moves_player_and_sprite() {
        let (mut demo, mut ctx) = small_demo();
        ctx.keyboard.apply(&InputEvent::KeyDown { key_code: key::UP });

        demo.update(&mut ctx, &InputQueue::new(), frame(25.0));

        let id = demo.player_entity().unwrap();
        let pos = ctx.scene.get(id).unwrap().pos;
        assert!((pos - Vec2::new(100.0, 90.0)).length() < 1e-3);
        assert_eq!(demo.last_resolution(), Resolution::default());
    }

    #[test]
    fn player_never_ends_a_frame_inside_a_box() {
        let (mut demo, mut ctx) = small_demo();
        // Walk right into the first 100x100 box at (150..250, 100..200).
        ctx.keyboard.apply(&InputEvent::KeyDown { key_code: key::RIGHT });

        for _ in 0..30 {
            demo.update(&mut ctx, &InputQueue::new(), frame(16.0));
        }

        let id = demo.player_entity().unwrap();
        let pos = ctx.scene.get(id).unwrap().pos;
        assert!(pos.x < 100.0 + 1e-3, "walked through the box: {:?}", pos);
        assert!(!demo.last_resolution().capped);
    }

    #[test]
    fn player_body_is_read_from_its_entity() {
        let (mut demo, mut ctx) = small_demo();
        let id = demo.player_entity().unwrap();
        let body = ctx.scene.get(id).unwrap().body.unwrap();
        assert_eq!(ctx.collisions.position(body), Some(Vec2::new(100.0, 100.0)));

        // Detached from its body, the player no longer moves.
        ctx.scene.get_mut(id).unwrap().body = None;
        ctx.keyboard.apply(&InputEvent::KeyDown { key_code: key::UP });
        demo.update(&mut ctx, &InputQueue::new(), frame(25.0));

        assert_eq!(ctx.scene.get(id).unwrap().pos, Vec2::new(100.0, 100.0));
        assert_eq!(ctx.collisions.position(body), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn bad_background_falls_back_to_default() {
        let demo = TileWorldDemo::with_settings(DemoSettings {
            background: "teal".into(),
            ..DemoSettings::default()
        });
        assert_eq!(demo.config().background, GameConfig::default().background);
    }
}
