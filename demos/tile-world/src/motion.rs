use glam::Vec2;
use tileworld::{BodyHandle, CollisionWorld, CursorKeys, Overlap};

use crate::settings::DemoSettings;

/// Unit direction from the arrow keys, or zero. Y grows downward.
/// Down wins over up and right wins over left when both are held.
pub fn movement_vector(keys: CursorKeys) -> Vec2 {
    let vy = if keys.down {
        1.0
    } else if keys.up {
        -1.0
    } else {
        0.0
    };
    let vx = if keys.right {
        1.0
    } else if keys.left {
        -1.0
    } else {
        0.0
    };
    Vec2::new(vx, vy).normalize_or_zero()
}

/// Distance to move this frame: `speed` units per second for `delta_ms`.
pub fn displacement(keys: CursorKeys, delta_ms: f32, speed: f32) -> Vec2 {
    movement_vector(keys) * speed * (delta_ms / 1000.0)
}

/// Outcome of one frame's correction loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Correction pushes applied.
    pub corrections: u32,
    /// True when every allowed pass still found an overlap.
    pub capped: bool,
}

/// Deepest overlap between `body` and any broad-phase candidate.
/// On equal depth the earlier candidate wins.
pub fn deepest_overlap(world: &mut CollisionWorld, body: BodyHandle) -> Option<Overlap> {
    let mut deepest: Option<Overlap> = None;
    for other in world.potentials(body) {
        if let Some(overlap) = world.check_collision(body, other) {
            if deepest.map_or(true, |d| overlap.depth > d.depth) {
                deepest = Some(overlap);
            }
        }
    }
    deepest
}

/// Moves a body by keyboard input and pushes it out of static obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    pub speed: f32,
    pub max_passes: u32,
    pub overshoot: f32,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from_settings(&DemoSettings::default())
    }
}

impl Resolver {
    pub fn from_settings(settings: &DemoSettings) -> Self {
        Self {
            speed: settings.speed,
            max_passes: settings.max_passes,
            overshoot: settings.overshoot,
        }
    }

    /// Push `body` out of its deepest overlap, one pass at a time, until a
    /// pass finds nothing or `max_passes` pushes were made.
    pub fn resolve(&self, world: &mut CollisionWorld, body: BodyHandle) -> Resolution {
        let mut corrections = 0;
        while corrections < self.max_passes {
            let Some(overlap) = deepest_overlap(world, body) else {
                return Resolution { corrections, capped: false };
            };
            world.translate(body, -overlap.vector * self.overshoot);
            world.update_body(body);
            corrections += 1;
        }

        log::trace!("correction cap of {} passes reached", self.max_passes);
        Resolution { corrections, capped: true }
    }

    /// One frame: apply the input displacement, then resolve overlaps.
    pub fn step(
        &self,
        world: &mut CollisionWorld,
        body: BodyHandle,
        keys: CursorKeys,
        delta_ms: f32,
    ) -> Resolution {
        let delta = displacement(keys, delta_ms, self.speed);
        if delta != Vec2::ZERO {
            world.translate(body, delta);
            world.update_body(body);
        }
        self.resolve(world, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn keys(up: bool, down: bool, left: bool, right: bool) -> CursorKeys {
        CursorKeys { up, down, left, right }
    }

    #[test]
    fn displacement_magnitude_is_speed_times_seconds() {
        for bits in 0u8..16 {
            let k = keys(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            let d = displacement(k, 16.0, 400.0);
            let moving = (k.up || k.down) || (k.left || k.right);
            if moving {
                assert!((d.length() - 6.4).abs() < EPS, "{:?} -> {:?}", k, d);
            } else {
                assert_eq!(d, Vec2::ZERO);
            }
        }
    }

    #[test]
    fn opposite_keys_resolve_to_down_and_right() {
        assert_eq!(movement_vector(keys(true, true, false, false)), Vec2::new(0.0, 1.0));
        assert_eq!(movement_vector(keys(false, false, true, true)), Vec2::new(1.0, 0.0));
        let diag = movement_vector(keys(true, false, true, false));
        assert!((diag - Vec2::new(-1.0, -1.0) / 2f32.sqrt()).length() < EPS);
    }

    #[test]
    fn no_input_leaves_body_in_place() {
        let mut world = CollisionWorld::new();
        let player = world.create_circle(Vec2::new(100.0, 100.0), 50.0).unwrap();
        let r = Resolver::default().step(&mut world, player, CursorKeys::default(), 16.0);
        assert_eq!(r, Resolution::default());
        assert_eq!(world.position(player).unwrap(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn zero_delta_does_not_move() {
        let mut world = CollisionWorld::new();
        let player = world.create_circle(Vec2::ZERO, 50.0).unwrap();
        Resolver::default().step(&mut world, player, keys(false, true, false, true), 0.0);
        assert_eq!(world.position(player).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn single_box_overlap_resolves_in_one_pass() {
        let mut world = CollisionWorld::new();
        let player = world.create_circle(Vec2::ZERO, 50.0).unwrap();
        let wall = world.create_box(Vec2::new(30.0, -50.0), 100.0, 100.0).unwrap();

        let r = Resolver::default().resolve(&mut world, player);
        assert_eq!(r, Resolution { corrections: 1, capped: false });
        assert!(world.check_collision(player, wall).is_none());
        // Depth 20 pushed back with 5% overshoot.
        assert!((world.position(player).unwrap().x + 21.0).abs() < 1e-3);
    }

    #[test]
    fn deepest_overlap_is_chosen() {
        let mut world = CollisionWorld::new();
        let player = world.create_circle(Vec2::ZERO, 50.0).unwrap();
        // Penetrates 10 on the left, 30 on the right.
        world.create_box(Vec2::new(-140.0, -50.0), 100.0, 100.0).unwrap();
        world.create_box(Vec2::new(20.0, -50.0), 100.0, 100.0).unwrap();

        let overlap = deepest_overlap(&mut world, player).unwrap();
        assert!((overlap.depth - 30.0).abs() < 1e-3);
        assert!(overlap.vector.x > 0.0);
    }

    #[test]
    fn equal_depths_pick_the_first_candidate() {
        let mut world = CollisionWorld::new();
        let player = world.create_circle(Vec2::ZERO, 50.0).unwrap();
        // Penetrates 20 on both sides.
        world.create_box(Vec2::new(-130.0, -50.0), 100.0, 100.0).unwrap();
        world.create_box(Vec2::new(30.0, -50.0), 100.0, 100.0).unwrap();

        let candidates = world.potentials(player);
        assert_eq!(candidates.len(), 2);
        let first = world.check_collision(player, candidates[0]).unwrap();
        let second = world.check_collision(player, candidates[1]).unwrap();
        assert_eq!(first.depth, second.depth);
        assert!(first.vector.x * second.vector.x < 0.0);

        let chosen = deepest_overlap(&mut world, player).unwrap();
        assert_eq!(chosen.vector, first.vector);

        let one_pass = Resolver { max_passes: 1, ..Resolver::default() };
        let r = one_pass.resolve(&mut world, player);
        assert_eq!(r.corrections, 1);
        // Pushed away from the first candidate's box.
        let pos = world.position(player).unwrap();
        assert!(pos.x * first.vector.x < 0.0, "moved toward it: {:?}", pos);
        assert!((pos.x.abs() - 21.0).abs() < 1e-3);
    }

    #[test]
    fn walking_into_a_wall_stops_at_it() {
        let mut world = CollisionWorld::new();
        let player = world.create_circle(Vec2::new(0.0, 0.0), 50.0).unwrap();
        let wall = world.create_box(Vec2::new(60.0, -200.0), 100.0, 400.0).unwrap();
        let resolver = Resolver::default();

        for _ in 0..60 {
            resolver.step(&mut world, player, keys(false, false, false, true), 16.0);
            assert!(world.check_collision(player, wall).is_none());
        }
        assert!(world.position(player).unwrap().x <= 10.0);
        assert!(world.position(player).unwrap().x > 0.0);
    }

    #[test]
    fn dense_trap_stops_after_max_passes() {
        let mut world = CollisionWorld::new();
        let start = Vec2::new(5.0, 0.0);
        let player = world.create_circle(start, 50.0).unwrap();
        // A gap narrower than the avatar: every push lands in the other wall.
        world.create_box(Vec2::new(-100.0, -500.0), 80.0, 1000.0).unwrap();
        world.create_box(Vec2::new(20.0, -500.0), 80.0, 1000.0).unwrap();

        let r = Resolver::default().resolve(&mut world, player);
        assert_eq!(r, Resolution { corrections: 10, capped: true });
        assert_ne!(world.position(player).unwrap(), start);
    }
}
