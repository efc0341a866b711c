use std::collections::HashMap;

use glam::Vec2;
use rapier2d::parry::bounding_volume::Aabb;
use rapier2d::parry::query;
use rapier2d::prelude::*;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Handle to a collision body, stored on the owning Entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(ColliderHandle);

/// Shape of a collision body, as registered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Circle { radius: f32 },
    Box { width: f32, height: f32 },
}

/// Result of an exact overlap test between two bodies.
///
/// A fresh value is returned by every check; nothing is shared between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Penetration depth along `vector`, always positive.
    pub depth: f32,
    /// Minimal translation vector. Subtracting it from the first body's
    /// position separates the pair; it points from the first body into the
    /// second.
    pub vector: Vec2,
}

impl Overlap {
    /// Unit direction of the overlap.
    pub fn normal(&self) -> Vec2 {
        self.vector / self.depth
    }
}

// ---------------------------------------------------------------------------
// CollisionWorld
// ---------------------------------------------------------------------------

/// Static boxes and circles plus movable bodies, indexed for broad-phase
/// queries by a Rapier query pipeline.
///
/// Moving a body (`set_position`, `translate`) only changes its shape.
/// The broad-phase index sees the new position after `update_body`.
pub struct CollisionWorld {
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
    /// Bounds each body had when it was last indexed.
    indexed: HashMap<ColliderHandle, Aabb>,
    /// Set when bodies were created since the last full index build.
    needs_rebuild: bool,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self {
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            indexed: HashMap::new(),
            needs_rebuild: false,
        }
    }

    /// Register an axis-aligned box given its top-left corner and extents.
    pub fn create_box(
        &mut self,
        top_left: Vec2,
        width: f32,
        height: f32,
    ) -> Result<BodyHandle, EngineError> {
        check_extent("box width", width)?;
        check_extent("box height", height)?;
        check_point(top_left)?;

        let half = Vec2::new(width / 2.0, height / 2.0);
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .translation(vec2_to_na(top_left + half))
            .build();
        Ok(self.insert(collider))
    }

    /// Register a circle given its center and radius.
    pub fn create_circle(&mut self, center: Vec2, radius: f32) -> Result<BodyHandle, EngineError> {
        check_extent("circle radius", radius)?;
        check_point(center)?;

        let collider = ColliderBuilder::ball(radius)
            .translation(vec2_to_na(center))
            .build();
        Ok(self.insert(collider))
    }

    /// Center of a body, or `None` for a handle this world does not hold.
    /// Boxes report their center, not their top-left.
    pub fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.colliders.get(body.0).map(|c| na_to_vec2(c.translation()))
    }

    /// Move a body's center. Call `update_body` to re-index it.
    pub fn set_position(&mut self, body: BodyHandle, pos: Vec2) {
        if let Some(collider) = self.colliders.get_mut(body.0) {
            collider.set_translation(vec2_to_na(pos));
        }
    }

    /// Offset a body's center. Call `update_body` to re-index it.
    pub fn translate(&mut self, body: BodyHandle, delta: Vec2) {
        if let Some(pos) = self.position(body) {
            self.set_position(body, pos + delta);
        }
    }

    /// Refresh the broad-phase entry of a body after it moved.
    /// Calling it again without moving the body changes nothing.
    pub fn update_body(&mut self, body: BodyHandle) {
        if self.flush() {
            return;
        }
        let Some(collider) = self.colliders.get(body.0) else {
            return;
        };
        self.indexed.insert(body.0, collider.compute_aabb());
        self.query_pipeline
            .update_incremental(&self.colliders, &[body.0], &[], true);
    }

    /// Broad-phase candidates for `body`: every other body whose indexed
    /// bounds intersect the body's indexed bounds. Candidates may not
    /// actually touch it; confirm with `check_collision`.
    pub fn potentials(&mut self, body: BodyHandle) -> Vec<BodyHandle> {
        self.flush();
        let Some(aabb) = self.indexed.get(&body.0).copied() else {
            return Vec::new();
        };

        let mut found = Vec::new();
        self.query_pipeline
            .colliders_with_aabb_intersecting_aabb(&aabb, |handle| {
                if *handle != body.0 {
                    found.push(BodyHandle(*handle));
                }
                true
            });
        found
    }

    /// Exact overlap test at the bodies' current positions.
    /// Returns `None` when the shapes are apart or merely touching.
    pub fn check_collision(&self, a: BodyHandle, b: BodyHandle) -> Option<Overlap> {
        let ca = self.colliders.get(a.0)?;
        let cb = self.colliders.get(b.0)?;

        // Ball and cuboid pairs are always supported by parry.
        let contact = query::contact(ca.position(), ca.shape(), cb.position(), cb.shape(), 0.0)
            .ok()
            .flatten()?;
        if contact.dist >= 0.0 {
            return None;
        }

        let depth = -contact.dist;
        let normal = na_to_vec2(&contact.normal1);
        Some(Overlap {
            depth,
            vector: normal * depth,
        })
    }

    /// Query the registered shape of a body.
    pub fn shape(&self, body: BodyHandle) -> Option<BodyShape> {
        let collider = self.colliders.get(body.0)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(BodyShape::Circle { radius: ball.radius })
        } else {
            shape.as_cuboid().map(|cuboid| BodyShape::Box {
                width: cuboid.half_extents.x * 2.0,
                height: cuboid.half_extents.y * 2.0,
            })
        }
    }

    /// Number of registered bodies.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.len() == 0
    }

    // -- private helpers --

    fn insert(&mut self, collider: Collider) -> BodyHandle {
        let aabb = collider.compute_aabb();
        let handle = self.colliders.insert(collider);
        self.indexed.insert(handle, aabb);
        self.needs_rebuild = true;
        BodyHandle(handle)
    }

    /// Rebuild the whole index if bodies were added since the last build.
    /// Returns whether a rebuild happened.
    fn flush(&mut self) -> bool {
        if !self.needs_rebuild {
            return false;
        }
        self.query_pipeline.update(&self.colliders);
        for (handle, collider) in self.colliders.iter() {
            self.indexed.insert(handle, collider.compute_aabb());
        }
        self.needs_rebuild = false;
        log::debug!("collision index rebuilt with {} bodies", self.colliders.len());
        true
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn check_extent(what: &str, value: f32) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidGeometry(format!("{what} must be positive, got {value}")))
    }
}

fn check_point(p: Vec2) -> Result<(), EngineError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidGeometry(format!("position must be finite, got {p}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
