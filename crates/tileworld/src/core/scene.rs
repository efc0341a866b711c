use std::collections::HashMap;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage: a flat Vec in spawn order plus an id → slot index.
/// Level content is spawned once and never removed, so slots are stable.
pub struct Scene {
    entities: Vec<Entity>,
    slots: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene. An entity with the same ID replaces the
    /// previous one in place.
    pub fn spawn(&mut self, entity: Entity) {
        match self.slots.get(&entity.id) {
            Some(&slot) => self.entities[slot] = entity,
            None => {
                self.slots.insert(entity.id, self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|&slot| &self.entities[slot])
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.slots.get(&id)?;
        self.entities.get_mut(slot)
    }

    /// Iterate over all entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 20.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec2::new(10.0, 20.0));
        assert!(scene.get(EntityId(2)).is_none());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)));
        scene.get_mut(EntityId(2)).unwrap().pos = Vec2::new(5.0, 6.0);
        assert_eq!(scene.get(EntityId(2)).unwrap().pos, Vec2::new(5.0, 6.0));
        assert_eq!(scene.get(EntityId(1)).unwrap().pos, Vec2::ZERO);
    }

    #[test]
    fn respawn_replaces_without_growing() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("old"));
        scene.spawn(Entity::new(EntityId(1)).with_tag("new"));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(1)).unwrap().tag, "new");
    }

    #[test]
    fn iteration_keeps_spawn_order() {
        let mut scene = Scene::new();
        for i in [3, 1, 2] {
            scene.spawn(Entity::new(EntityId(i)));
        }
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
