use bounce_ecs::{System, World};

use super::frame_delta;
use crate::components::{Animation, Sprite};

/// Advances every animation and swaps its sprite to the current frame.
pub struct AnimationSystem;

impl System for AnimationSystem {
    fn run(&mut self, world: &mut World) -> anyhow::Result<()> {
        let delta = frame_delta(world)?;

        for (_, (sprite, animation)) in world.query::<(&mut Sprite, &mut Animation)>() {
            if let Some(frame) = animation.advance(delta) {
                sprite.texture = frame;
            }
        }
        Ok(())
    }
}
