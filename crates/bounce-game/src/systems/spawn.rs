use bounce_ecs::{System, World};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::SPAWN_POINT;
use crate::components::{Animation, Position, Sprite, Velocity};
use crate::input::{InputAction, InputState};
use crate::texture::{load_texture, TextureHandle, ICON, ICON_ANIMATION};

/// Seconds each animation frame is shown
pub const FRAME_TIME: f32 = 0.15;

/// Spawns an animated, fast-moving sprite every frame the spawn action is held.
pub struct InputSystem {
    rng: StdRng,
}

impl InputSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl System for InputSystem {
    fn run(&mut self, world: &mut World) -> anyhow::Result<()> {
        if !world
            .element::<InputState>()?
            .is_held(InputAction::SpawnSprite)
        {
            return Ok(());
        }

        let texture = load_texture(world, ICON)?;
        let frames = ICON_ANIMATION
            .iter()
            .map(|path| load_texture(world, path))
            .collect::<anyhow::Result<Vec<TextureHandle>>>()?;
        let velocity = Vec2::new(
            self.rng.gen_range(-100..100) as f32,
            self.rng.gen_range(-100..100) as f32,
        );

        let entity = world
            .spawn()
            .add(Sprite::new(texture))?
            .add(Animation::new(frames, FRAME_TIME))?
            .add(Position(SPAWN_POINT))?
            .add(Velocity(velocity))?
            .id();
        debug!("Spawned animated sprite {} with velocity {}", entity, velocity);
        Ok(())
    }
}
