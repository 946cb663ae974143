use bounce_ecs::{System, World};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::SPAWN_POINT;
use crate::components::{Position, Sprite, Velocity};
use crate::texture::{load_texture, ICON};

/// Spawns the first, non-animated sprite with a slow random velocity.
pub struct InitSystem {
    rng: StdRng,
}

impl InitSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl System for InitSystem {
    fn run(&mut self, world: &mut World) -> anyhow::Result<()> {
        let texture = load_texture(world, ICON)?;
        let velocity = Vec2::new(
            self.rng.gen_range(-10..10) as f32,
            self.rng.gen_range(-10..10) as f32,
        );

        let entity = world
            .spawn()
            .add(Sprite::new(texture))?
            .add(Position(SPAWN_POINT))?
            .add(Velocity(velocity))?
            .id();
        info!("Spawned initial sprite {} with velocity {}", entity, velocity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Animation;
    use crate::systems::tests::test_world;

    #[test]
    fn test_spawns_one_static_sprite() {
        let mut world = test_world(0.0);
        InitSystem::new(7).run(&mut world).unwrap();

        let spawned: Vec<_> = world
            .query::<(&Sprite, &Position, &Velocity)>()
            .build()
            .map(|(e, (sprite, pos, vel))| (e, sprite.centered, *pos, *vel))
            .collect();
        assert_eq!(spawned.len(), 1);
        let (entity, centered, pos, vel) = spawned[0];
        assert!(centered);
        assert_eq!(pos, Position(SPAWN_POINT));
        assert!((-10.0..10.0).contains(&vel.0.x));
        assert!((-10.0..10.0).contains(&vel.0.y));
        assert!(!world.has::<Animation>(entity));
    }

    #[test]
    fn test_same_seed_same_velocity() {
        let velocity = |seed| {
            let mut world = test_world(0.0);
            InitSystem::new(seed).run(&mut world).unwrap();
            let v: Vec<_> = world.query::<&Velocity>().build().map(|(_, v)| *v).collect();
            v[0]
        };
        assert_eq!(velocity(42), velocity(42));
    }

    #[test]
    fn test_missing_textures_element_fails() {
        let mut world = World::new();
        assert!(InitSystem::new(0).run(&mut world).is_err());
        assert_eq!(world.entity_count(), 0);
    }
}
