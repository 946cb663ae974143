//! Demo settings with persistence
//!
//! Settings are read from `~/.config/bounce/settings.toml` unless a path is
//! given with `--config`.

use std::fs;
use std::path::{Path, PathBuf};

use bounce_core::{Color, TimeConfig, Viewport};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub window: WindowSettings,
    pub simulation: SimulationSettings,
    pub input: InputSettings,
    pub logging: LoggingSettings,
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bounce"))
    }

    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path` (or the default location), falling back to
    /// defaults if the file is missing or malformed
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    /// Background color as 0xRRGGBB
    pub clear_color: u32,
    /// Reported size of every placeholder texture, in pixels
    pub sprite_size: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            clear_color: 0x6495ED,
            sprite_size: 64,
        }
    }
}

impl WindowSettings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    pub fn clear_color(&self) -> Color {
        Color::from_hex(self.clear_color)
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of frames to run
    pub frames: u32,
    /// Seconds per frame
    pub frame_delta: f32,
    /// Seed for sprite velocities
    pub seed: u64,
    pub time_scale: f32,
    pub max_delta_time: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_delta: 1.0 / 60.0,
            seed: 0,
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

impl SimulationSettings {
    pub fn time_config(&self) -> TimeConfig {
        TimeConfig {
            time_scale: self.time_scale,
            max_delta_time: self.max_delta_time,
        }
    }
}

/// Scripted key presses for the headless run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Frames during which the spawn key is held
    pub spawn_frames: Vec<u32>,
    /// Frame on which quit is pressed, if any
    pub quit_frame: Option<u32>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            spawn_frames: (60..70).collect(),
            quit_frame: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
