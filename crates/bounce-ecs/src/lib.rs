//! Bounce ECS - Entity Component System
//!
//! A small ECS runtime for single-threaded frame loops.
//! Uses generational indices for entities and sparse-set storage for components.
//! World-scoped singletons ("elements") carry shared per-frame state such as
//! timing or device handles.

mod component;
mod element;
mod entity;
mod error;
mod query;
mod system;
mod world;

pub use component::{Component, ComponentTicks};
pub use element::Elements;
pub use entity::{Entity, EntityRegistry};
pub use error::EcsError;
pub use query::{Access, QueryBuilder, QueryIter, WorldQuery};
pub use system::{FrameSchedule, System, SystemGroup};
pub use world::{EntityBuilder, World};
