//! Windowless stand-ins for the demo's render, texture and input collaborators

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use bounce_core::Color;
use bounce_game::{AssetError, DrawCall, InputHandler, Key, SpriteRenderer, TextureSource};
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Totals gathered by [`HeadlessRenderer`], shared with the host loop.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    pub frames: u64,
    pub draws: u64,
    pub last_frame_draws: usize,
}

/// Counts the draw calls it is given instead of rasterizing them.
pub struct HeadlessRenderer {
    stats: Arc<Mutex<RenderStats>>,
    batch: usize,
}

impl HeadlessRenderer {
    pub fn new(stats: Arc<Mutex<RenderStats>>) -> Self {
        Self { stats, batch: 0 }
    }
}

impl SpriteRenderer for HeadlessRenderer {
    fn clear(&mut self, color: Color) {
        trace!(?color, "clear");
    }

    fn begin(&mut self) {
        self.batch = 0;
    }

    fn draw(&mut self, call: &DrawCall) {
        trace!(texture = call.texture.id, x = call.position.x, y = call.position.y, "draw");
        self.batch += 1;
    }

    fn end(&mut self) {
        let mut stats = self.stats.lock();
        stats.frames += 1;
        stats.draws += self.batch as u64;
        stats.last_frame_draws = self.batch;
    }
}

/// Reports every texture as a square of fixed size without touching the disk.
pub struct PlaceholderTextures {
    size: u32,
}

impl PlaceholderTextures {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl TextureSource for PlaceholderTextures {
    fn load(&mut self, path: &Path) -> Result<(u32, u32), AssetError> {
        if path.as_os_str().is_empty() {
            return Err(AssetError::Load {
                path: path.to_path_buf(),
                reason: "empty path".into(),
            });
        }
        debug!("Using {}px placeholder for {:?}", self.size, path);
        Ok((self.size, self.size))
    }
}

/// Replays key presses by frame number.
pub struct ScriptedInput {
    spawn_frames: HashSet<u32>,
    quit_frame: Option<u32>,
}

impl ScriptedInput {
    pub fn new(spawn_frames: impl IntoIterator<Item = u32>, quit_frame: Option<u32>) -> Self {
        Self {
            spawn_frames: spawn_frames.into_iter().collect(),
            quit_frame,
        }
    }

    /// Feed this frame's key states into the handler.
    pub fn apply(&self, frame: u32, handler: &mut InputHandler) {
        handler.handle_key(Key::Space, self.spawn_frames.contains(&frame));
        handler.handle_key(Key::Escape, self.quit_frame == Some(frame));
    }
}
