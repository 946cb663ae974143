//! Bounce Core - Shared primitives for the Bounce demo
//!
//! This crate provides the foundational types used by the ECS consumers:
//! - 2D math primitives (re-exported from glam)
//! - Viewport and color types
//! - Time system publishing per-frame delta time

pub mod time;
pub mod types;

pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
pub use types::{Color, Viewport};
