use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::component::{Column, Component, ComponentStorage, SparseSet};
use crate::entity::Entity;
use crate::world::World;

pub type Storages = HashMap<TypeId, Box<dyn ComponentStorage>>;

/// Component accesses declared by a query, checked for aliasing before iteration.
///
/// Each component type may appear once per query, whatever the access kind:
/// every access takes its own column from the storage.
#[derive(Debug, Default)]
pub struct Access {
    accessed: Vec<(TypeId, &'static str, bool)>,
    required: Vec<TypeId>,
}

impl Access {
    pub fn read<T: Component>(&mut self) {
        self.accessed.push((TypeId::of::<T>(), type_name::<T>(), false));
    }

    pub fn write<T: Component>(&mut self) {
        self.accessed.push((TypeId::of::<T>(), type_name::<T>(), true));
    }

    /// Entities lacking `T` are not matched.
    pub fn require<T: Component>(&mut self) {
        self.required.push(TypeId::of::<T>());
    }

    fn assert_disjoint(&self) {
        for (i, &(id, name, mutable)) in self.accessed.iter().enumerate() {
            let Some(&(_, _, other_mutable)) =
                self.accessed[i + 1..].iter().find(|(other, _, _)| *other == id)
            else {
                continue;
            };
            if mutable || other_mutable {
                panic!("query borrows `{name}` mutably while it is borrowed elsewhere in the same query");
            }
            panic!("query reads `{name}` more than once");
        }
    }
}

/// Trait implemented for query parameter types (`&T`, `&mut T`, `Option<&T>`, and tuples).
///
/// # Safety
/// `access` must declare every component the fetch reads or writes, so that
/// the builder can reject queries naming a component type twice.
pub unsafe trait WorldQuery {
    type Item<'w>;
    type Fetch;

    fn access(access: &mut Access);

    /// Resolve the storages this parameter reads from.
    fn init_fetch(storages: &mut Storages) -> Self::Fetch;

    /// Fetch the item for a given entity index.
    ///
    /// # Safety
    /// Storages must not have been structurally modified since `init_fetch`, each
    /// index may be fetched at most once per `Fetch`, and the declared access must
    /// have passed the aliasing check.
    unsafe fn fetch<'w>(fetch: &Self::Fetch, index: u32, tick: u32) -> Option<Self::Item<'w>>;
}

fn column<T: Component>(storages: &mut Storages) -> Option<Column<T>> {
    storages
        .get_mut(&TypeId::of::<T>())
        .and_then(|s| s.as_any_mut().downcast_mut::<SparseSet<T>>())
        .map(SparseSet::column)
}

// --- Implementations for &T (immutable borrow) ---

unsafe impl<T: Component> WorldQuery for &T {
    type Item<'w> = &'w T;
    type Fetch = Option<Column<T>>;

    fn access(access: &mut Access) {
        access.read::<T>();
        access.require::<T>();
    }

    fn init_fetch(storages: &mut Storages) -> Self::Fetch {
        column::<T>(storages)
    }

    unsafe fn fetch<'w>(fetch: &Self::Fetch, index: u32, _tick: u32) -> Option<Self::Item<'w>> {
        fetch.as_ref()?.get(index)
    }
}

// --- Implementations for &mut T (mutable borrow) ---

unsafe impl<T: Component> WorldQuery for &mut T {
    type Item<'w> = &'w mut T;
    type Fetch = Option<Column<T>>;

    fn access(access: &mut Access) {
        access.write::<T>();
        access.require::<T>();
    }

    fn init_fetch(storages: &mut Storages) -> Self::Fetch {
        column::<T>(storages)
    }

    unsafe fn fetch<'w>(fetch: &Self::Fetch, index: u32, tick: u32) -> Option<Self::Item<'w>> {
        fetch.as_ref()?.get_mut(index, tick)
    }
}

// --- Implementation for Option<&T> (optional immutable borrow) ---

unsafe impl<T: Component> WorldQuery for Option<&T> {
    type Item<'w> = Option<&'w T>;
    type Fetch = Option<Column<T>>;

    fn access(access: &mut Access) {
        access.read::<T>();
    }

    fn init_fetch(storages: &mut Storages) -> Self::Fetch {
        column::<T>(storages)
    }

    unsafe fn fetch<'w>(fetch: &Self::Fetch, index: u32, _tick: u32) -> Option<Self::Item<'w>> {
        Some(fetch.as_ref().and_then(|column| column.get(index)))
    }
}

// --- Tuple implementations ---

macro_rules! impl_world_query_tuple {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        unsafe impl<$($name: WorldQuery),+> WorldQuery for ($($name,)+) {
            type Item<'w> = ($($name::Item<'w>,)+);
            type Fetch = ($($name::Fetch,)+);

            fn access(access: &mut Access) {
                $($name::access(access);)+
            }

            fn init_fetch(storages: &mut Storages) -> Self::Fetch {
                ($($name::init_fetch(storages),)+)
            }

            unsafe fn fetch<'w>(
                fetch: &Self::Fetch,
                index: u32,
                tick: u32,
            ) -> Option<Self::Item<'w>> {
                let ($($name,)+) = fetch;
                Some(($($name::fetch($name, index, tick)?,)+))
            }
        }
    };
}

impl_world_query_tuple!(A);
impl_world_query_tuple!(A, B);
impl_world_query_tuple!(A, B, C);
impl_world_query_tuple!(A, B, C, D);
impl_world_query_tuple!(A, B, C, D, E);
impl_world_query_tuple!(A, B, C, D, E, F);
impl_world_query_tuple!(A, B, C, D, E, F, G);
impl_world_query_tuple!(A, B, C, D, E, F, G, H);

/// Extra conditions on a query's matched entities, independent of what it fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Filter {
    With(TypeId),
    Without(TypeId),
    /// Attached during the current frame.
    Added(TypeId),
    /// Attached or mutably accessed during the current frame.
    Changed(TypeId),
}

/// Returned by [`World::query`]. Add filters, then call [`QueryBuilder::build`]
/// as many times as needed; each call takes a fresh snapshot of the matching set.
///
/// # Example
/// ```ignore
/// let mut query = world.query::<(&mut Position, &Velocity)>().without::<Frozen>();
/// for (entity, (pos, vel)) in query.build() {
///     // ...
/// }
/// ```
pub struct QueryBuilder<'w, Q: WorldQuery> {
    world: &'w mut World,
    filters: Vec<Filter>,
    _marker: PhantomData<fn() -> Q>,
}

impl<'w, Q: WorldQuery> QueryBuilder<'w, Q> {
    pub(crate) fn new(world: &'w mut World) -> Self {
        Self {
            world,
            filters: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Only match entities that also carry `T`.
    pub fn with<T: Component>(mut self) -> Self {
        self.filters.push(Filter::With(TypeId::of::<T>()));
        self
    }

    /// Skip entities that carry `T`.
    pub fn without<T: Component>(mut self) -> Self {
        self.filters.push(Filter::Without(TypeId::of::<T>()));
        self
    }

    /// Only match entities whose `T` was attached this frame.
    pub fn added<T: Component>(mut self) -> Self {
        self.filters.push(Filter::Added(TypeId::of::<T>()));
        self
    }

    /// Only match entities whose `T` was attached or mutably accessed this frame.
    pub fn changed<T: Component>(mut self) -> Self {
        self.filters.push(Filter::Changed(TypeId::of::<T>()));
        self
    }

    /// Snapshot the matching entities and iterate their components.
    ///
    /// # Panics
    /// If `Q` names the same component type more than once.
    pub fn build(&mut self) -> QueryIter<'_, Q> {
        snapshot(&mut *self.world, &self.filters)
    }
}

impl<'w, Q: WorldQuery> IntoIterator for QueryBuilder<'w, Q> {
    type Item = (Entity, Q::Item<'w>);
    type IntoIter = QueryIter<'w, Q>;

    /// Single-use form of [`QueryBuilder::build`] whose items borrow the world directly.
    fn into_iter(self) -> Self::IntoIter {
        snapshot(self.world, &self.filters)
    }
}

fn snapshot<'a, Q: WorldQuery>(world: &'a mut World, filters: &[Filter]) -> QueryIter<'a, Q> {
    let mut access = Access::default();
    Q::access(&mut access);
    access.assert_disjoint();

    let candidates = world.matching_entities(&access.required, filters);
    let tick = world.current_tick();
    let fetch = Q::init_fetch(world.storages_mut());

    QueryIter {
        candidates: candidates.into_iter(),
        fetch,
        tick,
        _marker: PhantomData,
    }
}

/// Iterator returned by [`QueryBuilder::build`]. Yields `(Entity, Q::Item)` for each
/// matching entity.
pub struct QueryIter<'w, Q: WorldQuery> {
    candidates: std::vec::IntoIter<Entity>,
    fetch: Q::Fetch,
    tick: u32,
    _marker: PhantomData<&'w mut World>,
}

impl<'w, Q: WorldQuery> Iterator for QueryIter<'w, Q> {
    type Item = (Entity, Q::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        for entity in self.candidates.by_ref() {
            // SAFETY: the iterator holds the world's exclusive borrow, so storages
            // cannot change, and each candidate entity is yielded at most once.
            if let Some(item) = unsafe { Q::fetch(&self.fetch, entity.index, self.tick) } {
                return Some((entity, item));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.candidates.len()))
    }
}
