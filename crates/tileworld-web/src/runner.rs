use tileworld::{
    Game, GameConfig, EngineContext, EngineError,
    InputEvent, InputQueue, RenderBuffer,
    FrameClock, ProtocolLayout,
};
use tileworld::bridge::protocol::{write_frame, FrameHeader};
use tileworld::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `tile-world`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    frame: Vec<f32>,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            clock: FrameClock::new(),
            frame: layout.allocate(),
            layout,
            config,
            initialized: false,
        }
    }

    /// Preload assets and initialize the game. Call once after construction.
    pub fn init(&mut self) -> Result<(), EngineError> {
        self.game.preload(&mut self.ctx.assets)?;
        self.game.init(&mut self.ctx)?;
        self.initialized = true;

        log::info!(
            "{} entities, {} collision bodies, {} assets",
            self.ctx.scene.len(),
            self.ctx.collisions.len(),
            self.ctx.assets.len()
        );
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fold input, update the game, move the camera,
    /// build the render buffer and publish the frame.
    /// `delta_ms` is the time since the previous frame in milliseconds.
    pub fn tick(&mut self, delta_ms: f32) {
        if !self.initialized {
            return;
        }

        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };

        self.ctx.keyboard.apply_all(self.input.iter());
        let frame = self.clock.advance(delta_ms);
        self.game.update(&mut self.ctx, &self.input, frame);

        // Drain input after update
        self.input.drain();

        self.ctx.update_camera(delta_ms / 1000.0);

        build_render_buffer(
            self.ctx.tilemap.as_ref(),
            self.ctx.scene.iter(),
            &self.ctx.camera,
            &mut self.render_buffer,
        );

        let header = FrameHeader {
            frame: self.clock.frames(),
            camera: self.ctx.camera,
            background: self.config.background,
        };
        write_frame(&self.layout, &header, &self.render_buffer, &mut self.frame);
    }

    /// Fit the camera to a new host viewport, keeping the configured world
    /// area visible.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.ctx.camera.resize(
            width,
            height,
            self.config.viewport_width,
            self.config.viewport_height,
        );
    }

    /// Asset manifest as JSON, for the host to fetch images.
    pub fn manifest_json(&self) -> Result<String, EngineError> {
        self.ctx.assets.manifest().to_json()
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use tileworld::bridge::protocol::{
        HEADER_CAMERA_X, HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT,
        HEADER_TILE_INSTANCE_COUNT,
    };
    use tileworld::core::time::FrameTime;
    use tileworld::{key, EntityId, SpriteRegistry};

    /// Moves its sprite right by one unit per millisecond while RIGHT is held.
    #[derive(Default)]
    struct Walker {
        id: Option<EntityId>,
        last_frame: FrameTime,
    }

    impl Game for Walker {
        fn preload(&mut self, assets: &mut SpriteRegistry) -> Result<(), EngineError> {
            assets.load_image("tile", "tile.png")?;
            assets.load_image("walker", "walker.png")?;
            Ok(())
        }

        fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
            let tile = ctx.assets.sprite("tile")?;
            ctx.create_tilemap(50.0, 4, 4, &tile);
            ctx.put_tile(0, 0)?;
            let id = ctx.add_sprite("walker", Vec2::new(100.0, 100.0), 50.0)?;
            ctx.start_follow(id);
            self.id = Some(id);
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext, _input: &InputQueue, frame: FrameTime) {
            self.last_frame = frame;
            if !ctx.keyboard.cursor_keys().right {
                return;
            }
            if let Some(entity) = self.id.and_then(|id| ctx.scene.get_mut(id)) {
                entity.pos.x += frame.delta_ms;
            }
        }
    }

    struct Broken;

    impl Game for Broken {
        fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
            ctx.put_tile(0, 0)
        }

        fn update(&mut self, _ctx: &mut EngineContext, _input: &InputQueue, _frame: FrameTime) {}
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Walker::default());
        runner.tick(16.0);
        assert_eq!(runner.frame()[HEADER_FRAME_COUNTER], 0.0);
    }

    #[test]
    fn init_errors_propagate() {
        let mut runner = GameRunner::new(Broken);
        assert!(matches!(runner.init(), Err(EngineError::NoTilemap)));
    }

    #[test]
    fn held_key_moves_every_frame_until_released() {
        let mut runner = GameRunner::new(Walker::default());
        runner.init().unwrap();

        runner.push_input(InputEvent::KeyDown { key_code: key::RIGHT });
        runner.tick(10.0);
        runner.tick(10.0);
        let id = runner.game().id.unwrap();
        assert_eq!(runner.context().scene.get(id).unwrap().pos.x, 120.0);

        runner.push_input(InputEvent::KeyUp { key_code: key::RIGHT });
        runner.tick(10.0);
        assert_eq!(runner.context().scene.get(id).unwrap().pos.x, 120.0);
        assert_eq!(runner.game().last_frame.elapsed_ms, 30.0);
    }

    #[test]
    fn frame_header_tracks_camera_and_counts() {
        let mut runner = GameRunner::new(Walker::default());
        runner.init().unwrap();
        runner.push_input(InputEvent::KeyDown { key_code: key::RIGHT });
        runner.tick(50.0);

        let frame = runner.frame();
        assert_eq!(frame[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(frame[HEADER_CAMERA_X], 150.0);
        assert_eq!(frame[HEADER_TILE_INSTANCE_COUNT], 1.0);
        assert_eq!(frame[HEADER_INSTANCE_COUNT], 2.0);
        assert_eq!(runner.instance_count(), 2);
    }

    #[test]
    fn negative_delta_is_clamped() {
        let mut runner = GameRunner::new(Walker::default());
        runner.init().unwrap();
        runner.push_input(InputEvent::KeyDown { key_code: key::RIGHT });
        runner.tick(-5.0);
        let id = runner.game().id.unwrap();
        assert_eq!(runner.context().scene.get(id).unwrap().pos.x, 100.0);
    }

    #[test]
    fn manifest_lists_preloaded_images() {
        let mut runner = GameRunner::new(Walker::default());
        runner.init().unwrap();
        let json = runner.manifest_json().unwrap();
        assert!(json.contains("walker.png"));
        assert!(json.contains("tile.png"));
    }
}
