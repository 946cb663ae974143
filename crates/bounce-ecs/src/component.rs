use std::any::{type_name, Any};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Marker trait for types that can be stored as ECS components.
pub trait Component: 'static + Send + Sync {}

/// Blanket implementation: any `'static + Send + Sync` type is a valid component.
impl<T: 'static + Send + Sync> Component for T {}

/// Frame numbers at which a component slot was attached and last mutably accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentTicks {
    pub added: u32,
    pub changed: u32,
}

impl ComponentTicks {
    fn new(tick: u32) -> Self {
        Self {
            added: tick,
            changed: tick,
        }
    }
}

/// Type-erased component storage interface.
pub trait ComponentStorage: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Drop the component for `index`, if present.
    fn remove(&mut self, index: u32) -> bool;
    fn has(&self, index: u32) -> bool;
    fn ticks(&self, index: u32) -> Option<ComponentTicks>;
    fn entity_indices(&self) -> &[u32];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn type_name(&self) -> &'static str;
}

/// Sparse-set storage for a single component type. Provides O(1) insert/remove/lookup
/// and dense iteration.
pub(crate) struct SparseSet<T> {
    /// Maps entity index → dense index. `None` means the entity has no component.
    sparse: Vec<Option<usize>>,
    /// Packed component values.
    dense: Vec<T>,
    /// Add/change ticks, parallel to `dense`.
    ticks: Vec<ComponentTicks>,
    /// Entity indices corresponding to each dense slot (for iteration).
    entities: Vec<u32>,
}

impl<T: Component> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            ticks: Vec::new(),
            entities: Vec::new(),
        }
    }

    fn dense_index(&self, index: u32) -> Option<usize> {
        self.sparse.get(index as usize).copied().flatten()
    }

    /// Insert or replace a component for the given entity index. Returns the
    /// replaced value, if any.
    pub fn insert(&mut self, index: u32, value: T, tick: u32) -> Option<T> {
        let idx = index as usize;
        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, None);
        }
        if let Some(dense_idx) = self.sparse[idx] {
            self.ticks[dense_idx].changed = tick;
            Some(std::mem::replace(&mut self.dense[dense_idx], value))
        } else {
            let dense_idx = self.dense.len();
            self.sparse[idx] = Some(dense_idx);
            self.dense.push(value);
            self.ticks.push(ComponentTicks::new(tick));
            self.entities.push(index);
            None
        }
    }

    /// Get an immutable reference to the component for an entity.
    pub fn get(&self, index: u32) -> Option<&T> {
        self.dense_index(index).map(|dense_idx| &self.dense[dense_idx])
    }

    /// Get a mutable reference to the component for an entity, marking it changed at `tick`.
    pub fn get_mut(&mut self, index: u32, tick: u32) -> Option<&mut T> {
        let dense_idx = self.dense_index(index)?;
        self.ticks[dense_idx].changed = tick;
        Some(&mut self.dense[dense_idx])
    }

    /// Detach the component for an entity and hand it back.
    pub fn take(&mut self, index: u32) -> Option<T> {
        let dense_idx = self.dense_index(index)?;
        self.sparse[index as usize] = None;

        // Swap-remove: the last element moves into the removed slot.
        let value = self.dense.swap_remove(dense_idx);
        self.ticks.swap_remove(dense_idx);
        self.entities.swap_remove(dense_idx);
        if let Some(&moved_entity) = self.entities.get(dense_idx) {
            self.sparse[moved_entity as usize] = Some(dense_idx);
        }
        Some(value)
    }

    /// Iterate over all (entity_index, &component) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Raw column view used by query fetches. Valid until the set is structurally
    /// modified.
    pub(crate) fn column(&mut self) -> Column<T> {
        Column {
            sparse: NonNull::from(self.sparse.as_slice()),
            dense: NonNull::new(self.dense.as_mut_ptr()).unwrap_or(NonNull::dangling()),
            ticks: NonNull::new(self.ticks.as_mut_ptr()).unwrap_or(NonNull::dangling()),
            _marker: PhantomData,
        }
    }
}

impl<T: Component> ComponentStorage for SparseSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove(&mut self, index: u32) -> bool {
        self.take(index).is_some()
    }

    fn has(&self, index: u32) -> bool {
        self.dense_index(index).is_some()
    }

    fn ticks(&self, index: u32) -> Option<ComponentTicks> {
        self.dense_index(index).map(|dense_idx| self.ticks[dense_idx])
    }

    fn entity_indices(&self) -> &[u32] {
        &self.entities
    }

    fn len(&self) -> usize {
        self.dense.len()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Pointers into a [`SparseSet`]'s buffers. Lets a query hand out one `&mut T`
/// per entity without re-borrowing the whole dense array for every fetch.
pub struct Column<T> {
    sparse: NonNull<[Option<usize>]>,
    dense: NonNull<T>,
    ticks: NonNull<ComponentTicks>,
    _marker: PhantomData<*mut T>,
}

impl<T> Column<T> {
    fn dense_index(&self, index: u32) -> Option<usize> {
        // SAFETY: the sparse slice is only read, and outlives the column.
        unsafe { self.sparse.as_ref() }
            .get(index as usize)
            .copied()
            .flatten()
    }

    /// # Safety
    /// The set must not have been structurally modified since the column was taken,
    /// and no `&mut T` to the same slot may be live.
    pub unsafe fn get<'w>(&self, index: u32) -> Option<&'w T> {
        let dense_idx = self.dense_index(index)?;
        Some(&*self.dense.as_ptr().add(dense_idx))
    }

    /// # Safety
    /// As [`Column::get`], and additionally no other reference to the same slot may
    /// be live.
    pub unsafe fn get_mut<'w>(&self, index: u32, tick: u32) -> Option<&'w mut T> {
        let dense_idx = self.dense_index(index)?;
        (*self.ticks.as_ptr().add(dense_idx)).changed = tick;
        Some(&mut *self.dense.as_ptr().add(dense_idx))
    }
}
