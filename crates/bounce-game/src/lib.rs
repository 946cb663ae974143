//! Bounce Game - Demo components and systems
//!
//! Sprites that drift around the viewport, bounce off its edges, spawn while a
//! key is held, and optionally cycle animation frames. Rendering, texture
//! decoding, and keyboard polling belong to the host, which plugs in through
//! [`SpriteRenderer`], [`TextureSource`], and the [`InputState`] element.

pub mod components;
pub mod input;
pub mod render;
pub mod systems;
pub mod texture;

use bounce_core::Color;
use bounce_ecs::FrameSchedule;

pub use components::{Animation, Position, Sprite, Velocity};
pub use input::{InputAction, InputBindings, InputHandler, InputState, Key};
pub use render::{DrawCall, Renderer, SpriteRenderer};
pub use systems::{AnimationSystem, InitSystem, InputSystem, MoveSystem, RenderSystem};
pub use texture::{load_texture, AssetError, TextureHandle, TextureSource, Textures};

/// Build the demo's schedule: one init system, then input, animation and
/// movement each update, and a single render pass.
pub fn demo_schedule(seed: u64, clear_color: Color) -> FrameSchedule {
    let mut schedule = FrameSchedule::new();

    schedule.init.add(InitSystem::new(seed));

    schedule
        .update
        .add(InputSystem::new(seed.wrapping_add(1)))
        .add(AnimationSystem)
        .add(MoveSystem);

    schedule.render.add(RenderSystem { clear_color });

    schedule
}
