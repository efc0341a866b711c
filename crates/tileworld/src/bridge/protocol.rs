/// Shared frame buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]  tiles first, then sprites
/// ```
///
/// The capacity is written into the header every frame so the host can
/// compute offsets without a separate handshake.

use crate::api::game::GameConfig;
use crate::api::types::Color;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TILE_INSTANCE_COUNT: usize = 4;
pub const HEADER_VIEW_WIDTH: usize = 5;
pub const HEADER_VIEW_HEIGHT: usize = 6;
pub const HEADER_CAMERA_X: usize = 7;
pub const HEADER_CAMERA_Y: usize = 8;
pub const HEADER_BG_R: usize = 9;
pub const HEADER_BG_G: usize = 10;
pub const HEADER_BG_B: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;

        Self {
            max_instances,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances)
    }

    /// Allocate a zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }
}

/// Per-frame values that go into the header besides the instance data.
#[derive(Debug, Clone, Copy)]
pub struct FrameHeader {
    pub frame: u64,
    pub camera: Camera2D,
    pub background: Color,
}

/// Write one frame into `out`: header first, then the instance data.
///
/// The lock slot is held at 1.0 while writing and released at the end.
/// Instances past the layout capacity are not written; the header count
/// reports only what was written.
pub fn write_frame(
    layout: &ProtocolLayout,
    header: &FrameHeader,
    buffer: &RenderBuffer,
    out: &mut [f32],
) {
    if out.len() < layout.buffer_total_floats {
        log::warn!(
            "frame buffer too small: {} floats, layout needs {}",
            out.len(),
            layout.buffer_total_floats
        );
        return;
    }

    out[HEADER_LOCK] = 1.0;

    let count = buffer.instances.len().min(layout.max_instances);
    let tiles = (buffer.tile_count as usize).min(count);
    let src = &buffer.as_floats()[..count * INSTANCE_FLOATS];
    let start = layout.instance_data_offset;
    out[start..start + src.len()].copy_from_slice(src);

    out[HEADER_FRAME_COUNTER] = header.frame as f32;
    out[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    out[HEADER_INSTANCE_COUNT] = count as f32;
    out[HEADER_TILE_INSTANCE_COUNT] = tiles as f32;
    out[HEADER_VIEW_WIDTH] = header.camera.width;
    out[HEADER_VIEW_HEIGHT] = header.camera.height;
    out[HEADER_CAMERA_X] = header.camera.center.x;
    out[HEADER_CAMERA_Y] = header.camera.center.y;
    out[HEADER_BG_R] = header.background.r;
    out[HEADER_BG_G] = header.background.g;
    out[HEADER_BG_B] = header.background.b;
    out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;

    out[HEADER_LOCK] = 0.0;
}
