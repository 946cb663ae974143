//! The demo's systems, in the order the schedule runs them

mod animation;
mod init;
mod movement;
mod render;
mod spawn;

pub use animation::AnimationSystem;
pub use init::InitSystem;
pub use movement::{bounce, MoveSystem};
pub use render::RenderSystem;
pub use spawn::InputSystem;

use bounce_core::{GameTime, Vec2};
use bounce_ecs::{EcsError, World};

/// Where new sprites appear
pub const SPAWN_POINT: Vec2 = Vec2::new(50.0, 50.0);

/// Seconds elapsed this frame, as published by the host.
fn frame_delta(world: &World) -> Result<f32, EcsError> {
    Ok(world.element::<GameTime>()?.delta_time)
}
