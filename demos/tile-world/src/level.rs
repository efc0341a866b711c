use glam::Vec2;

/// Edge length of a tile cell in world units.
pub const TILE_SIZE: f32 = 50.0;
/// Tile columns covered by one world part.
pub const PART_COLS: u32 = 16;
/// Tile rows covered by one world part.
pub const PART_ROWS: u32 = 12;
/// World-space size of one part.
pub const PART_SIZE: Vec2 = Vec2::new(800.0, 600.0);

pub const RECT_SIZE: f32 = 100.0;
pub const CIRCLE_RADIUS: f32 = 50.0;

/// Tile cells of a part, relative to its first cell.
const TILE_CELLS: [(u32, u32); 15] = [
    (3, 7), (3, 8), (2, 9), (2, 10),
    (5, 7), (5, 8), (5, 9), (5, 10),
    (6, 10), (7, 10), (8, 10), (9, 10), (10, 10), (11, 10), (12, 10),
];

const RECT_CENTERS: [(f32, f32); 3] = [(200.0, 150.0), (350.0, 150.0), (430.0, 300.0)];

const CIRCLE_CENTERS: [(f32, f32); 3] = [(600.0, 300.0), (675.0, 250.0), (10.0, 350.0)];

/// A static collision shape placed by the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Obstacle {
    Box { top_left: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32 },
}

impl Obstacle {
    /// A 100×100 box centered on `center`.
    pub fn rect_at(center: Vec2) -> Self {
        let size = Vec2::splat(RECT_SIZE);
        Obstacle::Box { top_left: center - size / 2.0, size }
    }

    /// The box covering tile cell (x, y).
    pub fn tile_at(x: u32, y: u32) -> Self {
        Obstacle::Box {
            top_left: Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE),
            size: Vec2::splat(TILE_SIZE),
        }
    }

    pub fn center(&self) -> Vec2 {
        match *self {
            Obstacle::Box { top_left, size } => top_left + size / 2.0,
            Obstacle::Circle { center, .. } => center,
        }
    }
}

/// A decorative sprite that sits on an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub center: Vec2,
    pub size: f32,
    pub obstacle: Obstacle,
}

/// One 800×600 repetition of the level pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldPart {
    pub col: u32,
    pub row: u32,
}

/// Everything a world part places, in absolute coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartLayout {
    /// Absolute tile cells.
    pub tiles: Vec<(u32, u32)>,
    pub rects: Vec<Prop>,
    pub circles: Vec<Prop>,
}

impl PartLayout {
    /// Every collision shape in the part: tiles, then boxes, then circles.
    pub fn obstacles(&self) -> impl Iterator<Item = Obstacle> + '_ {
        self.tiles
            .iter()
            .map(|&(x, y)| Obstacle::tile_at(x, y))
            .chain(self.rects.iter().map(|p| p.obstacle))
            .chain(self.circles.iter().map(|p| p.obstacle))
    }
}

impl WorldPart {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// World-space offset of the part's top-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.col as f32, self.row as f32) * PART_SIZE
    }

    /// Expand the part into its fixed layout.
    pub fn layout(&self) -> PartLayout {
        let (tx, ty) = (self.col * PART_COLS, self.row * PART_ROWS);
        let origin = self.origin();

        let tiles = TILE_CELLS
            .iter()
            .map(|&(x, y)| (tx + x, ty + y))
            .collect();

        let rects = RECT_CENTERS
            .iter()
            .map(|&(x, y)| {
                let center = origin + Vec2::new(x, y);
                Prop { center, size: RECT_SIZE, obstacle: Obstacle::rect_at(center) }
            })
            .collect();

        let circles = CIRCLE_CENTERS
            .iter()
            .map(|&(x, y)| {
                let center = origin + Vec2::new(x, y);
                Prop {
                    center,
                    size: CIRCLE_RADIUS * 2.0,
                    obstacle: Obstacle::Circle { center, radius: CIRCLE_RADIUS },
                }
            })
            .collect();

        PartLayout { tiles, rects, circles }
    }
}

/// The grid of parts the level is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGrid {
    pub cols: u32,
    pub rows: u32,
}

impl LevelGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Parts in generation order: columns outer, rows inner.
    pub fn parts(&self) -> impl Iterator<Item = WorldPart> {
        let rows = self.rows;
        (0..self.cols).flat_map(move |col| (0..rows).map(move |row| WorldPart::new(col, row)))
    }

    /// Tilemap size in cells.
    pub fn tile_dims(&self) -> (u32, u32) {
        (self.cols * PART_COLS, self.rows * PART_ROWS)
    }
}
