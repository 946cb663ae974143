use bounce_core::Viewport;
use bounce_ecs::{System, World};
use glam::Vec2;

use super::frame_delta;
use crate::components::{Position, Velocity};

/// Moves every sprite by its velocity and bounces it off the viewport edges.
pub struct MoveSystem;

impl System for MoveSystem {
    fn run(&mut self, world: &mut World) -> anyhow::Result<()> {
        let delta = frame_delta(world)?;
        let viewport = *world.element::<Viewport>()?;

        for (_, (pos, vel)) in world.query::<(&mut Position, &mut Velocity)>() {
            bounce(&mut pos.0, &mut vel.0, delta, viewport);
        }
        Ok(())
    }
}

/// Integrate one step. An axis that ends up outside `[0, extent]` has its
/// velocity reversed, and the position is clamped back inside.
pub fn bounce(pos: &mut Vec2, vel: &mut Vec2, delta: f32, viewport: Viewport) {
    *pos += *vel * delta;

    if pos.x < 0.0 || pos.x > viewport.width {
        vel.x = -vel.x;
    }
    if pos.y < 0.0 || pos.y > viewport.height {
        vel.y = -vel.y;
    }

    pos.x = pos.x.clamp(0.0, viewport.width);
    pos.y = pos.y.clamp(0.0, viewport.height);
}
