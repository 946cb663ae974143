//! Opaque texture handles and the path-keyed texture cache
//!
//! Decoding pixels is the host's job; the demo only needs stable handles with
//! dimensions, so loads go through a [`TextureSource`] collaborator.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bounce_ecs::World;
use tracing::debug;

/// Texture used for static sprites and the first animation frame
pub const ICON: &str = "Content/icon.png";

/// Frames of the spawned sprites' ping-pong animation
pub const ICON_ANIMATION: [&str; 6] = [
    "Content/icon.png",
    "Content/icon1.png",
    "Content/icon2.png",
    "Content/icon3.png",
    "Content/icon2.png",
    "Content/icon1.png",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load texture {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
}

/// Host-side texture loading. Returns the texture's dimensions.
pub trait TextureSource: Send + Sync {
    fn load(&mut self, path: &Path) -> Result<(u32, u32), AssetError>;
}

/// Element caching one handle per path, so repeated loads share a texture.
pub struct Textures {
    source: Box<dyn TextureSource>,
    cache: HashMap<PathBuf, TextureHandle>,
    next_id: u32,
}

impl Textures {
    pub fn new(source: impl TextureSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: HashMap::new(),
            next_id: 0,
        }
    }

    /// Get the handle for `path`, loading it through the source on first use.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<TextureHandle, AssetError> {
        let path = path.as_ref();
        if let Some(handle) = self.cache.get(path) {
            return Ok(*handle);
        }

        let (width, height) = self.source.load(path)?;
        let handle = TextureHandle {
            id: self.next_id,
            width,
            height,
        };
        self.next_id += 1;
        self.cache.insert(path.to_path_buf(), handle);
        debug!("Loaded texture {:?} as #{} ({}x{})", path, handle.id, width, height);
        Ok(handle)
    }

    /// Number of distinct textures loaded.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Load a texture through the world's [`Textures`] element.
pub fn load_texture(world: &mut World, path: impl AsRef<Path>) -> anyhow::Result<TextureHandle> {
    Ok(world.element_mut::<Textures>()?.load(path)?)
}
