use crate::components::entity::Entity;
use crate::components::tilemap::TilemapComponent;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer for one frame.
///
/// Visible tiles come first (`tile_count` marks the boundary), then visible
/// sprites in scene order. Instances beyond the buffer capacity are dropped.
pub fn build_render_buffer<'a>(
    tilemap: Option<&TilemapComponent>,
    entities: impl Iterator<Item = &'a Entity>,
    camera: &Camera2D,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();
    let mut dropped = 0usize;

    if let Some(tilemap) = tilemap {
        for instance in tilemap.build_visible_instances(camera) {
            if !buffer.push(instance) {
                dropped += 1;
            }
        }
    }
    buffer.mark_tiles_end();

    for entity in entities {
        if !entity.active {
            continue;
        }

        let sprite = match &entity.sprite {
            Some(s) => s,
            None => continue,
        };

        if !camera.is_rect_visible(entity.pos, entity.scale / 2.0) {
            continue;
        }

        let instance = RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            scale: entity.scale.x,
            atlas: sprite.atlas.0 as f32,
            sprite_col: sprite.col,
            atlas_row: sprite.row,
            alpha: sprite.alpha,
        };
        if !buffer.push(instance) {
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::warn!(
            "render buffer full ({} instances), dropped {}",
            buffer.capacity(),
            dropped
        );
    }
}
