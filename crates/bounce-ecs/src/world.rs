use std::any::{type_name, TypeId};
use std::collections::HashMap;

use tracing::trace;

use crate::component::{Component, ComponentStorage, ComponentTicks, SparseSet};
use crate::element::Elements;
use crate::entity::{Entity, EntityRegistry};
use crate::error::EcsError;
use crate::query::{Filter, QueryBuilder, Storages, WorldQuery};

/// The central ECS container. Owns all entities, components, and elements.
///
/// A world is advanced frame by frame: systems run against it, then
/// [`World::tick`] flushes deferred destruction and starts the next frame's
/// change tracking.
pub struct World {
    entities: EntityRegistry,
    components: Storages,
    elements: Elements,
    pending_destroy: Vec<Entity>,
    removed: HashMap<TypeId, Vec<Entity>>,
    tick: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityRegistry::new(),
            components: HashMap::new(),
            elements: Elements::new(),
            pending_destroy: Vec::new(),
            removed: HashMap::new(),
            tick: 1,
        }
    }

    // ---- Entity management ----

    /// Spawn a new entity with no components, returning a builder to attach some.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let entity = self.entities.spawn();
        trace!("spawned {entity}");
        EntityBuilder {
            world: self,
            entity,
        }
    }

    /// Destroy an entity immediately, dropping all its components.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), EcsError> {
        for type_id in self.entities.despawn(entity)? {
            if let Some(storage) = self.components.get_mut(&type_id) {
                storage.remove(entity.index);
            }
            self.removed.entry(type_id).or_default().push(entity);
        }
        trace!("destroyed {entity}");
        Ok(())
    }

    /// Queue an entity for destruction at the next [`World::tick`]. Until then it
    /// stays alive and keeps matching queries.
    pub fn destroy_deferred(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        if !self.pending_destroy.contains(&entity) {
            self.pending_destroy.push(entity);
        }
        Ok(())
    }

    /// Whether `entity` is queued for destruction at the next tick.
    pub fn is_pending_destroy(&self, entity: Entity) -> bool {
        self.pending_destroy.contains(&entity)
    }

    /// Check whether an entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Type names of the components attached to an entity, for diagnostics.
    pub fn component_names(&self, entity: Entity) -> Result<Vec<&'static str>, EcsError> {
        Ok(self
            .entities
            .component_types(entity)?
            .iter()
            .filter_map(|type_id| self.components.get(type_id))
            .map(|storage| storage.type_name())
            .collect())
    }

    // ---- Component management ----

    fn storage_mut<T: Component>(&mut self) -> &mut SparseSet<T> {
        self.components
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()))
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .expect("storage registered under a foreign TypeId")
    }

    fn storage<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|s| s.as_any().downcast_ref::<SparseSet<T>>())
    }

    pub(crate) fn storages_mut(&mut self) -> &mut Storages {
        &mut self.components
    }

    fn ensure_alive(&self, entity: Entity) -> Result<(), EcsError> {
        if self.entities.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::UnknownEntity(entity))
        }
    }

    /// Attach a component to an entity. Fails if the entity already has one of this type.
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        if self.has::<T>(entity) {
            return Err(EcsError::DuplicateComponent {
                entity,
                component: type_name::<T>(),
            });
        }
        self.insert(entity, component)?;
        Ok(())
    }

    /// Attach a component, replacing and returning any existing one of the same type.
    pub fn insert<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, EcsError> {
        self.ensure_alive(entity)?;
        let tick = self.tick;
        let previous = self.storage_mut::<T>().insert(entity.index, component, tick);
        self.entities.attach(entity, TypeId::of::<T>());
        Ok(previous)
    }

    /// Get an immutable reference to a component on an entity.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.ensure_alive(entity)?;
        self.storage::<T>()
            .and_then(|s| s.get(entity.index))
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Get a mutable reference to a component on an entity. Marks it changed.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.ensure_alive(entity)?;
        let tick = self.tick;
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|s| s.as_any_mut().downcast_mut::<SparseSet<T>>())
            .and_then(|s| s.get_mut(entity.index, tick))
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Detach a component from an entity and return it.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.ensure_alive(entity)?;
        let value = self
            .components
            .get_mut(&TypeId::of::<T>())
            .and_then(|s| s.as_any_mut().downcast_mut::<SparseSet<T>>())
            .and_then(|s| s.take(entity.index))
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })?;
        self.entities.detach(entity, TypeId::of::<T>());
        self.removed
            .entry(TypeId::of::<T>())
            .or_default()
            .push(entity);
        Ok(value)
    }

    /// Check whether an entity has a component of the given type.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
            && self
                .storage::<T>()
                .map_or(false, |s| s.has(entity.index))
    }

    /// Frames at which an entity's `T` was attached and last mutably accessed.
    pub fn component_ticks<T: Component>(&self, entity: Entity) -> Option<ComponentTicks> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.storage::<T>()?.ticks(entity.index)
    }

    /// Iterate every entity carrying `T` together with its component.
    pub fn iter_component<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.storage::<T>()
            .into_iter()
            .flat_map(|s| s.iter())
            .filter_map(|(index, value)| Some((self.entities.entity_at(index)?, value)))
    }

    /// Entities that lost their `T` during the current frame, by removal or destruction.
    pub fn removed<T: Component>(&self) -> impl Iterator<Item = Entity> + '_ {
        self.removed
            .get(&TypeId::of::<T>())
            .into_iter()
            .flatten()
            .copied()
    }

    // ---- Queries ----

    /// Query entities that match the given component pattern.
    ///
    /// # Example
    /// ```ignore
    /// for (entity, (pos, vel)) in world.query::<(&mut Position, &Velocity)>().build() {
    ///     // ...
    /// }
    /// ```
    pub fn query<Q: WorldQuery>(&mut self) -> QueryBuilder<'_, Q> {
        QueryBuilder::new(self)
    }

    /// Entities carrying every `required` type and passing `filters`. The smallest
    /// storage is scanned and the rest are probed.
    pub(crate) fn matching_entities(&self, required: &[TypeId], filters: &[Filter]) -> Vec<Entity> {
        let mut required = required.to_vec();
        for filter in filters {
            match *filter {
                Filter::With(id) | Filter::Added(id) | Filter::Changed(id) => required.push(id),
                Filter::Without(_) => {}
            }
        }
        required.sort();
        required.dedup();

        let indices: Vec<u32> = if required.is_empty() {
            self.entities.iter().map(|e| e.index).collect()
        } else {
            let mut storages = Vec::with_capacity(required.len());
            for type_id in &required {
                match self.components.get(type_id) {
                    Some(storage) => storages.push(storage.as_ref()),
                    // No storage for a required type means no matches.
                    None => return Vec::new(),
                }
            }
            storages.sort_by_key(|s| s.len());
            let Some((smallest, rest)) = storages.split_first() else {
                return Vec::new();
            };
            if smallest.is_empty() {
                return Vec::new();
            }
            smallest
                .entity_indices()
                .iter()
                .copied()
                .filter(|&index| rest.iter().all(|s| s.has(index)))
                .collect()
        };

        indices
            .into_iter()
            .filter(|&index| filters.iter().all(|f| self.passes(*f, index)))
            .filter_map(|index| self.entities.entity_at(index))
            .collect()
    }

    fn passes(&self, filter: Filter, index: u32) -> bool {
        let storage = |id: TypeId| self.components.get(&id);
        match filter {
            Filter::With(id) => storage(id).map_or(false, |s| s.has(index)),
            Filter::Without(id) => storage(id).map_or(true, |s| !s.has(index)),
            Filter::Added(id) => storage(id)
                .and_then(|s| s.ticks(index))
                .map_or(false, |t| t.added == self.tick),
            Filter::Changed(id) => storage(id)
                .and_then(|s| s.ticks(index))
                .map_or(false, |t| t.changed == self.tick),
        }
    }

    // ---- Elements ----

    /// Insert a singleton element. Fails if one of this type already exists.
    pub fn add_element<T: 'static + Send + Sync>(&mut self, value: T) -> Result<(), EcsError> {
        self.elements.add(value)
    }

    /// Insert or replace a singleton element, returning the previous value.
    pub fn add_or_replace_element<T: 'static + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.elements.add_or_replace(value)
    }

    /// Get an immutable reference to an element.
    pub fn element<T: 'static + Send + Sync>(&self) -> Result<&T, EcsError> {
        self.elements.get::<T>()
    }

    /// Get a mutable reference to an element.
    pub fn element_mut<T: 'static + Send + Sync>(&mut self) -> Result<&mut T, EcsError> {
        self.elements.get_mut::<T>()
    }

    /// Remove an element.
    pub fn remove_element<T: 'static + Send + Sync>(&mut self) -> Result<T, EcsError> {
        self.elements.remove::<T>()
    }

    pub fn has_element<T: 'static + Send + Sync>(&self) -> bool {
        self.elements.contains::<T>()
    }

    // ---- Frame lifecycle ----

    /// The current frame number, starting at 1.
    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    /// End-of-frame maintenance: forget this frame's removals, advance the frame
    /// counter so added/changed state resets, then destroy deferred entities.
    /// Deferred destructions therefore show up in the next frame's
    /// [`World::removed`] log.
    pub fn tick(&mut self) {
        self.removed.clear();
        self.tick = self.tick.wrapping_add(1).max(1);

        let pending = std::mem::take(&mut self.pending_destroy);
        let mut destroyed = 0;
        for entity in pending {
            // Already gone if it was also destroyed immediately this frame.
            if self.destroy(entity).is_ok() {
                destroyed += 1;
            }
        }
        trace!(
            tick = self.tick,
            destroyed,
            entities = self.entity_count(),
            "world tick"
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent handle over a freshly spawned entity.
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityBuilder<'w> {
    /// Attach a component. Fails if the entity already has one of this type.
    pub fn add<T: Component>(self, component: T) -> Result<Self, EcsError> {
        self.world.add(self.entity, component)?;
        Ok(self)
    }

    /// The spawned entity.
    pub fn id(&self) -> Entity {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Name(String);

    #[derive(Debug, PartialEq)]
    struct A;
    #[derive(Debug, PartialEq)]
    struct B;
    #[derive(Debug, PartialEq)]
    struct C;

    fn sorted(mut entities: Vec<Entity>) -> Vec<Entity> {
        entities.sort();
        entities
    }

    #[test]
    fn spawn_and_destroy() {
        let mut world = World::new();
        let e = world.spawn().id();
        assert!(world.is_alive(e));
        assert_eq!(world.entity_count(), 1);
        world.destroy(e).unwrap();
        assert!(!world.is_alive(e));
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.destroy(e), Err(EcsError::UnknownEntity(e)));
    }

    #[test]
    fn builder_chains_adds() {
        let mut world = World::new();
        let e = world
            .spawn()
            .add(Position { x: 1.0, y: 2.0 })
            .unwrap()
            .add(Velocity { dx: 3.0, dy: 4.0 })
            .unwrap()
            .id();
        assert_eq!(world.get::<Position>(e), Ok(&Position { x: 1.0, y: 2.0 }));
        assert_eq!(world.get::<Velocity>(e), Ok(&Velocity { dx: 3.0, dy: 4.0 }));
        let mut names = world.component_names(e).unwrap();
        names.sort();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("Position"));
    }

    #[test]
    fn add_get_remove_component() {
        let mut world = World::new();
        let e = world.spawn().id();
        world.add(e, Position { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(world.get::<Position>(e), Ok(&Position { x: 1.0, y: 2.0 }));
        assert!(world.has::<Position>(e));
        assert_eq!(world.remove::<Position>(e), Ok(Position { x: 1.0, y: 2.0 }));
        assert!(!world.has::<Position>(e));
        assert!(matches!(
            world.get::<Position>(e),
            Err(EcsError::MissingComponent { .. })
        ));
        assert!(matches!(
            world.remove::<Position>(e),
            Err(EcsError::MissingComponent { .. })
        ));
    }

    #[test]
    fn double_add_fails() {
        let mut world = World::new();
        let e = world.spawn().id();
        world.add(e, Name("first".into())).unwrap();
        assert!(matches!(
            world.add(e, Name("second".into())),
            Err(EcsError::DuplicateComponent { .. })
        ));
        assert_eq!(world.get::<Name>(e), Ok(&Name("first".into())));

        let replaced = world.insert(e, Name("third".into())).unwrap();
        assert_eq!(replaced, Some(Name("first".into())));
    }

    #[test]
    fn component_ops_on_dead_entity() {
        let mut world = World::new();
        let e = world.spawn().id();
        world.destroy(e).unwrap();
        assert_eq!(world.add(e, A), Err(EcsError::UnknownEntity(e)));
        assert_eq!(world.get::<A>(e), Err(EcsError::UnknownEntity(e)));
        assert!(world.get_mut::<A>(e).is_err());
        assert!(!world.has::<A>(e));
        assert_eq!(world.destroy_deferred(e), Err(EcsError::UnknownEntity(e)));
    }

    #[test]
    fn component_mutation() {
        let mut world = World::new();
        let e = world.spawn().id();
        world.add(e, Position { x: 0.0, y: 0.0 }).unwrap();
        world.get_mut::<Position>(e).unwrap().x = 5.0;
        assert_eq!(world.get::<Position>(e).unwrap().x, 5.0);
    }

    #[test]
    fn query_single_component() {
        let mut world = World::new();
        let e1 = world.spawn().id();
        let e2 = world.spawn().id();
        world.add(e1, Position { x: 1.0, y: 0.0 }).unwrap();
        world.add(e2, Position { x: 2.0, y: 0.0 }).unwrap();

        let results: Vec<_> = world.query::<(&Position,)>().build().map(|(e, _)| e).collect();
        assert_eq!(sorted(results), vec![e1, e2]);
    }

    #[test]
    fn query_matches_superset_only() {
        let mut world = World::new();
        let e1 = world.spawn().add(A).unwrap().add(B).unwrap().id();
        let _e2 = world.spawn().add(A).unwrap().id();
        let _e3 = world.spawn().add(B).unwrap().id();
        let e4 = world.spawn().add(A).unwrap().add(B).unwrap().add(C).unwrap().id();
        let _e5 = world.spawn().id();

        let matched: Vec<_> = world.query::<(&A, &B)>().build().map(|(e, _)| e).collect();
        assert_eq!(sorted(matched), vec![e1, e4]);
    }

    #[test]
    fn query_unknown_type_is_empty() {
        let mut world = World::new();
        world.spawn().add(A).unwrap();
        assert_eq!(world.query::<(&A, &Name)>().build().count(), 0);
    }

    #[test]
    fn query_mutation_is_visible() {
        let mut world = World::new();
        let e = world
            .spawn()
            .add(Position { x: 0.0, y: 0.0 })
            .unwrap()
            .add(Velocity { dx: 2.0, dy: -1.0 })
            .unwrap()
            .id();

        for (_, (pos, vel)) in world.query::<(&mut Position, &Velocity)>() {
            pos.x += vel.dx;
            pos.y += vel.dy;
        }
        assert_eq!(world.get::<Position>(e), Ok(&Position { x: 2.0, y: -1.0 }));
    }

    #[test]
    fn query_optional() {
        let mut world = World::new();
        let e1 = world.spawn().id();
        let e2 = world.spawn().id();
        world.add(e1, Position { x: 1.0, y: 0.0 }).unwrap();
        world.add(e1, Name("one".to_string())).unwrap();
        world.add(e2, Position { x: 2.0, y: 0.0 }).unwrap();

        let results: Vec<_> = world
            .query::<(&Position, Option<&Name>)>()
            .build()
            .map(|(e, (_, name))| (e, name.cloned()))
            .collect();
        assert_eq!(results.len(), 2);

        let with_name: Vec<_> = results.iter().filter(|(_, n)| n.is_some()).collect();
        assert_eq!(with_name.len(), 1);
        assert_eq!(with_name[0].0, e1);
    }

    #[test]
    fn query_rebuild_takes_fresh_snapshot() {
        let mut world = World::new();
        world.spawn().add(A).unwrap();
        {
            let mut query = world.query::<&A>();
            assert_eq!(query.build().count(), 1);
            assert_eq!(query.build().count(), 1);
        }
        world.spawn().add(A).unwrap();
        let mut query = world.query::<&A>();
        assert_eq!(query.build().count(), 2);
    }

    #[test]
    fn query_with_and_without_filters() {
        let mut world = World::new();
        let plain = world.spawn().add(A).unwrap().id();
        let tagged = world.spawn().add(A).unwrap().add(C).unwrap().id();

        let without: Vec<_> = world
            .query::<&A>()
            .without::<C>()
            .build()
            .map(|(e, _)| e)
            .collect();
        assert_eq!(without, vec![plain]);

        let with: Vec<_> = world.query::<&A>().with::<C>().build().map(|(e, _)| e).collect();
        assert_eq!(with, vec![tagged]);
    }

    #[test]
    fn added_and_changed_reset_on_tick() {
        let mut world = World::new();
        let old = world.spawn().add(Position { x: 0.0, y: 0.0 }).unwrap().id();
        world.tick();

        let new = world.spawn().add(Position { x: 1.0, y: 1.0 }).unwrap().id();
        let added: Vec<_> = world
            .query::<&Position>()
            .added::<Position>()
            .build()
            .map(|(e, _)| e)
            .collect();
        assert_eq!(added, vec![new]);

        world.get_mut::<Position>(old).unwrap().x = 3.0;
        let changed: Vec<_> = world
            .query::<&Position>()
            .changed::<Position>()
            .build()
            .map(|(e, _)| e)
            .collect();
        assert_eq!(sorted(changed), sorted(vec![old, new]));

        world.tick();
        assert_eq!(world.query::<&Position>().added::<Position>().build().count(), 0);
        assert_eq!(world.query::<&Position>().changed::<Position>().build().count(), 0);

        // A mutable fetch counts as a change.
        for _ in world.query::<&mut Position>().with::<Position>() {}
        assert_eq!(world.query::<&Position>().changed::<Position>().build().count(), 2);
    }

    #[test]
    #[should_panic(expected = "mutably")]
    fn query_conflicting_access_panics() {
        let mut world = World::new();
        world.spawn().add(A).unwrap();
        let _ = world.query::<(&mut A, &A)>().build().count();
    }

    #[test]
    #[should_panic(expected = "more than once")]
    fn query_repeated_read_panics() {
        let mut world = World::new();
        world.spawn().add(A).unwrap();
        let _ = world.query::<(&A, Option<&A>)>().build().count();
    }

    #[test]
    fn destroy_removes_components() {
        let mut world = World::new();
        let e = world.spawn().add(Position { x: 1.0, y: 0.0 }).unwrap().id();
        world.destroy(e).unwrap();

        assert_eq!(world.query::<(&Position,)>().build().count(), 0);
        assert_eq!(world.removed::<Position>().collect::<Vec<_>>(), vec![e]);
    }

    #[test]
    fn deferred_destroy_waits_for_tick() {
        let mut world = World::new();
        let e = world.spawn().add(A).unwrap().id();
        let other = world.spawn().add(A).unwrap().id();

        let snapshot: Vec<_> = world.query::<&A>().build().map(|(e, _)| e).collect();
        world.destroy_deferred(e).unwrap();
        world.destroy_deferred(e).unwrap();
        assert!(world.is_pending_destroy(e));
        assert_eq!(sorted(snapshot), vec![e, other]);

        // Still visible for the rest of the frame.
        assert!(world.is_alive(e));
        assert!(world.has::<A>(e));
        assert_eq!(world.query::<&A>().build().count(), 2);

        world.tick();
        assert!(!world.is_alive(e));
        assert!(!world.has::<A>(e));
        assert!(!world.is_pending_destroy(e));
        let remaining: Vec<_> = world.query::<&A>().build().map(|(e, _)| e).collect();
        assert_eq!(remaining, vec![other]);
    }

    #[test]
    fn deferred_destroy_after_immediate_destroy_is_skipped() {
        let mut world = World::new();
        let e = world.spawn().add(A).unwrap().id();
        world.destroy_deferred(e).unwrap();
        world.destroy(e).unwrap();

        let reused = world.spawn().add(A).unwrap().id();
        assert_eq!(reused.index(), e.index());
        world.tick();
        assert!(world.is_alive(reused));
    }

    #[test]
    fn removed_cleared_by_tick() {
        let mut world = World::new();
        let e = world.spawn().add(A).unwrap().id();
        world.remove::<A>(e).unwrap();
        assert_eq!(world.removed::<A>().collect::<Vec<_>>(), vec![e]);
        world.tick();
        assert_eq!(world.removed::<A>().count(), 0);
    }

    #[test]
    fn deferred_destroy_logged_next_frame() {
        let mut world = World::new();
        let e = world.spawn().add(A).unwrap().add(B).unwrap().id();
        let kept = world.spawn().add(A).unwrap().id();
        world.destroy_deferred(e).unwrap();
        assert_eq!(world.removed::<A>().count(), 0);

        world.tick();
        assert_eq!(world.removed::<A>().collect::<Vec<_>>(), vec![e]);
        assert_eq!(world.removed::<B>().collect::<Vec<_>>(), vec![e]);
        assert!(world.is_alive(kept));

        world.tick();
        assert_eq!(world.removed::<A>().count(), 0);
    }

    #[test]
    fn iter_component_lists_holders() {
        let mut world = World::new();
        let e1 = world.spawn().add(Name("a".into())).unwrap().id();
        let _ = world.spawn().add(A).unwrap();
        let holders: Vec<_> = world.iter_component::<Name>().map(|(e, n)| (e, n.0.clone())).collect();
        assert_eq!(holders, vec![(e1, "a".to_string())]);
    }

    #[test]
    fn element_semantics() {
        let mut world = World::new();
        world.add_element(5u32).unwrap();
        assert_eq!(world.add_element(6u32), Err(EcsError::DuplicateElement("u32")));
        assert_eq!(world.add_or_replace_element(6u32), Some(5));
        assert_eq!(world.element::<u32>(), Ok(&6));
        *world.element_mut::<u32>().unwrap() = 100;
        assert_eq!(world.remove_element::<u32>(), Ok(100));
        assert!(!world.has_element::<u32>());
        assert_eq!(world.element::<u32>(), Err(EcsError::MissingElement("u32")));
    }

    #[test]
    fn generation_reuse_isolation() {
        let mut world = World::new();
        let e1 = world.spawn().add(Position { x: 1.0, y: 0.0 }).unwrap().id();
        world.destroy(e1).unwrap();

        let e2 = world.spawn().id(); // reuses slot 0 with generation 1
        assert_ne!(e1, e2);
        assert_eq!(e1.index(), e2.index());
        assert_eq!(world.get::<Position>(e1), Err(EcsError::UnknownEntity(e1)));
        assert!(matches!(
            world.get::<Position>(e2),
            Err(EcsError::MissingComponent { .. })
        ));
    }
}
