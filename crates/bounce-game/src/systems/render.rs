use bounce_core::Color;
use bounce_ecs::{System, World};
use tracing::trace;

use crate::components::{Position, Sprite};
use crate::render::{DrawCall, Renderer};

/// Clears the frame and draws every positioned sprite through the host renderer.
pub struct RenderSystem {
    pub clear_color: Color,
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self {
            clear_color: Color::CORNFLOWER_BLUE,
        }
    }
}

impl System for RenderSystem {
    fn run(&mut self, world: &mut World) -> anyhow::Result<()> {
        let draws: Vec<DrawCall> = world
            .query::<(&Sprite, &Position)>()
            .into_iter()
            .map(|(_, (sprite, pos))| DrawCall {
                texture: sprite.texture,
                position: pos.0 - sprite.draw_offset(),
                tint: Color::WHITE,
            })
            .collect();

        let renderer = &mut world.element_mut::<Renderer>()?.0;
        renderer.clear(self.clear_color);
        renderer.begin();
        for call in &draws {
            renderer.draw(call);
        }
        renderer.end();

        trace!(draws = draws.len(), "rendered frame");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;
    use parking_lot::Mutex;

    use super::*;
    use crate::render::SpriteRenderer;
    use crate::systems::tests::test_world;
    use crate::texture::TextureHandle;

    #[derive(Debug, PartialEq)]
    enum Command {
        Clear(Color),
        Begin,
        Draw(DrawCall),
        End,
    }

    struct Recorder(Arc<Mutex<Vec<Command>>>);

    impl SpriteRenderer for Recorder {
        fn clear(&mut self, color: Color) {
            self.0.lock().push(Command::Clear(color));
        }

        fn begin(&mut self) {
            self.0.lock().push(Command::Begin);
        }

        fn draw(&mut self, call: &DrawCall) {
            self.0.lock().push(Command::Draw(*call));
        }

        fn end(&mut self) {
            self.0.lock().push(Command::End);
        }
    }

    const TEXTURE: TextureHandle = TextureHandle {
        id: 3,
        width: 64,
        height: 32,
    };

    #[test]
    fn test_draw_order_and_offsets() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut world = test_world(0.0);
        world.add_element(Renderer::new(Recorder(log.clone()))).unwrap();

        world
            .spawn()
            .add(Sprite::new(TEXTURE))
            .unwrap()
            .add(Position(Vec2::new(100.0, 100.0)))
            .unwrap();
        // No position: not drawn.
        world.spawn().add(Sprite::new(TEXTURE)).unwrap();

        RenderSystem::default().run(&mut world).unwrap();

        let expected = vec![
            Command::Clear(Color::CORNFLOWER_BLUE),
            Command::Begin,
            Command::Draw(DrawCall {
                texture: TEXTURE,
                position: Vec2::new(68.0, 68.0),
                tint: Color::WHITE,
            }),
            Command::End,
        ];
        assert_eq!(*log.lock(), expected);
    }

    #[test]
    fn test_uncentered_sprite_draws_at_position() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut world = test_world(0.0);
        world.add_element(Renderer::new(Recorder(log.clone()))).unwrap();
        world
            .spawn()
            .add(Sprite {
                centered: false,
                texture: TEXTURE,
            })
            .unwrap()
            .add(Position(Vec2::new(10.0, 20.0)))
            .unwrap();

        RenderSystem::default().run(&mut world).unwrap();

        let drawn: Vec<_> = log
            .lock()
            .iter()
            .filter_map(|c| match c {
                Command::Draw(call) => Some(call.position),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, vec![Vec2::new(10.0, 20.0)]);
    }

    #[test]
    fn test_missing_renderer_fails() {
        let mut world = test_world(0.0);
        assert!(RenderSystem::default().run(&mut world).is_err());
    }
}
