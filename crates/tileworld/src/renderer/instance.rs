use bytemuck::{Pod, Zeroable};

/// Per-instance render data written to the shared frame buffer for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// The `scale` field is the world-space rendered size in game units.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in world space (sprite center).
    pub x: f32,
    /// Y position in world space (sprite center).
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// World-space rendered size in game units.
    pub scale: f32,
    /// Atlas index.
    pub atlas: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Atlas row.
    pub atlas_row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer: tile instances first, then sprite instances.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    /// Number of leading instances that come from the tilemap.
    pub tile_count: u32,
    capacity: usize,
}

impl RenderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            tile_count: 0,
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.tile_count = 0;
    }

    /// Append an instance. Returns false once the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    /// Mark everything pushed so far as tilemap output.
    pub fn mark_tiles_end(&mut self) {
        self.tile_count = self.instances.len() as u32;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(4096)
    }
}
