//! The rendering collaborator boundary
//!
//! The render system turns `(Sprite, Position)` pairs into [`DrawCall`]s and
//! hands them to whatever [`SpriteRenderer`] the host placed in the world.

use bounce_core::Color;
use glam::Vec2;

use crate::texture::TextureHandle;

/// One sprite to draw, with its top-left corner in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub texture: TextureHandle,
    pub position: Vec2,
    pub tint: Color,
}

/// Host-side sprite drawing, called as clear, begin, draws, end once per frame.
pub trait SpriteRenderer: Send + Sync {
    fn clear(&mut self, color: Color);
    fn begin(&mut self);
    fn draw(&mut self, call: &DrawCall);
    fn end(&mut self);
}

/// Element holding the host's renderer.
pub struct Renderer(pub Box<dyn SpriteRenderer>);

impl Renderer {
    pub fn new(renderer: impl SpriteRenderer + 'static) -> Self {
        Self(Box::new(renderer))
    }
}
