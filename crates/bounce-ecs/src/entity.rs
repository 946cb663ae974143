use std::any::TypeId;
use std::fmt;

use crate::error::EcsError;

/// A generational entity handle. Uses compact u32 index + generation for cache performance.
///
/// Two handles are equal only if both slot and generation match, so a handle kept
/// past its entity's destruction never aliases the slot's next occupant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    /// Create an entity from raw parts (mainly for testing).
    pub fn from_raw(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The slot index of this entity.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The generation of this entity (incremented on reuse).
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Allocates and recycles entity slots with generational tracking, and records
/// which component types each live slot carries.
pub struct EntityRegistry {
    generations: Vec<u32>,
    alive: Vec<bool>,
    components: Vec<Vec<TypeId>>,
    free_list: Vec<u32>,
    len: usize,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            alive: Vec::new(),
            components: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Allocate a new entity, reusing a freed slot if available.
    pub fn spawn(&mut self) -> Entity {
        self.len += 1;
        if let Some(index) = self.free_list.pop() {
            self.alive[index as usize] = true;
            Entity {
                index,
                generation: self.generations[index as usize],
            }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            self.components.push(Vec::new());
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Free an entity's slot and return the component types it still carried.
    pub fn despawn(&mut self, entity: Entity) -> Result<Vec<TypeId>, EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        let idx = entity.index as usize;
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free_list.push(entity.index);
        self.len -= 1;
        Ok(std::mem::take(&mut self.components[idx]))
    }

    /// Check if an entity is currently alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.alive.len() && self.alive[idx] && self.generations[idx] == entity.generation
    }

    /// The live handle occupying `index`, if any.
    pub(crate) fn entity_at(&self, index: u32) -> Option<Entity> {
        let idx = index as usize;
        if idx < self.alive.len() && self.alive[idx] {
            Some(Entity {
                index,
                generation: self.generations[idx],
            })
        } else {
            None
        }
    }

    /// Iterate every live entity in slot order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        (0..self.generations.len() as u32).filter_map(|index| self.entity_at(index))
    }

    /// Component types attached to a live entity.
    pub fn component_types(&self, entity: Entity) -> Result<&[TypeId], EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        Ok(&self.components[entity.index as usize])
    }

    pub(crate) fn attach(&mut self, entity: Entity, type_id: TypeId) {
        let types = &mut self.components[entity.index as usize];
        if !types.contains(&type_id) {
            types.push(type_id);
        }
    }

    pub(crate) fn detach(&mut self, entity: Entity, type_id: TypeId) {
        self.components[entity.index as usize].retain(|t| *t != type_id);
    }

    /// Number of currently alive entities.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no alive entities.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
