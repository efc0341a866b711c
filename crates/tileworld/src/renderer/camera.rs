use glam::Vec2;

/// The world-space rectangle shown in the viewport. Y-down, like the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    pub center: Vec2,
    /// Follow smoothing: 0.0 snaps to the target, values near 1.0 lag behind.
    pub smoothing: f32,
}

impl Camera2D {
    /// A camera whose view starts at the world origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(width, height) / 2.0,
            smoothing: 0.0,
        }
    }

    /// Fit a `game` sized area into a host viewport of a different shape.
    /// The whole game area stays visible; the spare axis shows extra world.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32, game_width: f32, game_height: f32) {
        let scale = (viewport_width / game_width).min(viewport_height / game_height);
        self.width = viewport_width / scale;
        self.height = viewport_height / scale;
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
    }

    /// Move toward `target`; `dt` in seconds. The approach rate is tuned
    /// per 60 Hz frame so it does not depend on the frame rate.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        if self.smoothing <= 0.0 {
            self.look_at(target);
            return;
        }
        let t = 1.0 - self.smoothing.powf(dt * 60.0);
        self.center = self.center.lerp(target, t);
    }

    /// Visible world rectangle as (min, max) corners.
    pub fn view_rect(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(self.width, self.height) / 2.0;
        (self.center - half, self.center + half)
    }

    /// Whether an axis-aligned rectangle touches the view.
    pub fn is_rect_visible(&self, rect_center: Vec2, rect_half_size: Vec2) -> bool {
        let (min, max) = self.view_rect();
        let lo = rect_center - rect_half_size;
        let hi = rect_center + rect_half_size;
        hi.cmpge(min).all() && lo.cmple(max).all()
    }
}
