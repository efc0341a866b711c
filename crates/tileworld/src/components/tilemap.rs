//! Grid of tile cells anchored at the world origin, Y-down.
//!
//! Cell (x, y) covers `[x, x+1) × [y, y+1)` tile sizes in world space.
//! Rendering walks only the cells under the camera.

use std::ops::Range;

use crate::components::sprite::AtlasId;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::RenderInstance;
use glam::Vec2;

/// One stamped cell, addressing a cell of the tilemap's atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub col: f32,
    pub row: f32,
}

impl Tile {
    pub fn new(col: f32, row: f32) -> Self {
        Self { col, row }
    }
}

/// Fixed-size tile layer. Cells are stored row by row.
#[derive(Debug, Clone)]
pub struct TilemapComponent {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Edge length of a cell in world units.
    pub tile_size: f32,
    pub atlas: AtlasId,
    cells: Vec<Option<Tile>>,
}

impl TilemapComponent {
    /// A blank `width × height` layer.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            atlas: AtlasId::default(),
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn with_atlas(mut self, atlas: AtlasId) -> Self {
        self.atlas = atlas;
        self
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn slot(&self, x: u32, y: u32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        self.slot(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Stamp or clear cell (x, y). Cells outside the grid are ignored;
    /// check `contains` first when that matters.
    pub fn set(&mut self, x: u32, y: u32, tile: Option<Tile>) {
        if let Some(i) = self.slot(x, y) {
            self.cells[i] = tile;
        }
    }

    /// Top-left corner of cell (x, y).
    pub fn tile_top_left(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(x as f32, y as f32) * self.tile_size
    }

    /// Center of cell (x, y).
    pub fn tile_to_world(&self, x: u32, y: u32) -> Vec2 {
        self.tile_top_left(x, y) + Vec2::splat(self.tile_size / 2.0)
    }

    /// Column and row ranges of the cells touching the camera's view.
    pub fn visible_cells(&self, camera: &Camera2D) -> (Range<u32>, Range<u32>) {
        let (min, max) = camera.view_rect();
        let first = |v: f32, limit: u32| ((v / self.tile_size).floor().max(0.0) as u32).min(limit);
        let last = |v: f32, limit: u32| ((v / self.tile_size).ceil().max(0.0) as u32).min(limit);

        (
            first(min.x, self.width)..last(max.x, self.width),
            first(min.y, self.height)..last(max.y, self.height),
        )
    }

    /// Render instances for the stamped cells under the camera, row by row.
    pub fn build_visible_instances(&self, camera: &Camera2D) -> Vec<RenderInstance> {
        let (cols, rows) = self.visible_cells(camera);
        let mut instances = Vec::with_capacity(cols.len() * rows.len());

        for y in rows {
            for x in cols.clone() {
                let Some(tile) = self.get(x, y) else {
                    continue;
                };
                let center = self.tile_to_world(x, y);
                instances.push(RenderInstance {
                    x: center.x,
                    y: center.y,
                    rotation: 0.0,
                    scale: self.tile_size,
                    atlas: self.atlas.0 as f32,
                    sprite_col: tile.col,
                    atlas_row: tile.row,
                    alpha: 1.0,
                });
            }
        }

        instances
    }

    /// Stamped cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }
}
