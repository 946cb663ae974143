//! Components attached to the demo's sprite entities

use glam::Vec2;

use crate::texture::TextureHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Draw around the position instead of from the top-left corner
    pub centered: bool,
    pub texture: TextureHandle,
}

impl Sprite {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            centered: true,
            texture,
        }
    }

    /// Offset subtracted from the position when drawing.
    ///
    /// Centered sprites shift by half the texture width on both axes.
    pub fn draw_offset(&self) -> Vec2 {
        if self.centered {
            let half = self.texture.width as f32 / 2.0;
            Vec2::new(half, half)
        } else {
            Vec2::ZERO
        }
    }
}

/// Looping flipbook animation driving a [`Sprite`]'s texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frames: Vec<TextureHandle>,
    /// Seconds each frame is shown
    pub frame_time: f32,
    /// Seconds into the current cycle
    pub time: f32,
}

impl Animation {
    pub fn new(frames: Vec<TextureHandle>, frame_time: f32) -> Self {
        Self {
            frames,
            frame_time,
            time: 0.0,
        }
    }

    /// Length of one full cycle in seconds.
    pub fn cycle_time(&self) -> f32 {
        self.frame_time * self.frames.len() as f32
    }

    /// Advance by `delta` seconds, wrapping at the end of the cycle, and return
    /// the frame to show. `None` for an empty or zero-length animation.
    pub fn advance(&mut self, delta: f32) -> Option<TextureHandle> {
        let cycle = self.cycle_time();
        if self.frames.is_empty() || cycle <= 0.0 {
            return None;
        }

        self.time += delta;
        if self.time > cycle {
            self.time %= cycle;
        }

        let index = ((self.time / self.frame_time) as usize).min(self.frames.len() - 1);
        Some(self.frames[index])
    }
}
