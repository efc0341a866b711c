/// Timing passed to `Game::update` once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Milliseconds since the first frame.
    pub elapsed_ms: f64,
    /// Milliseconds since the previous frame.
    pub delta_ms: f32,
}

/// Variable-step frame clock.
/// One tick per rendered frame; game logic scales by `delta_ms` itself.
pub struct FrameClock {
    elapsed_ms: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0.0,
            frames: 0,
        }
    }

    /// Advance by one frame of `delta_ms` milliseconds.
    /// Callers must pass a non-negative delta.
    pub fn advance(&mut self, delta_ms: f32) -> FrameTime {
        self.elapsed_ms += delta_ms as f64;
        self.frames += 1;
        FrameTime {
            elapsed_ms: self.elapsed_ms,
            delta_ms,
        }
    }

    /// Number of frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
