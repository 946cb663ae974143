//! Frame timing for the Bounce demo
//!
//! The host advances a [`GameTime`] once per frame and publishes it into the
//! world so systems can read the frame's delta.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Simulated seconds per host second
    pub time_scale: f32,
    /// Upper bound on a single frame's host delta, in seconds
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

/// Elapsed simulation time, published as a world element each frame.
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    pub config: TimeConfig,
    /// Seconds simulated since the first frame
    pub total_time: f64,
    /// Seconds simulated by the current frame
    pub delta_time: f32,
    pub frame_count: u64,
}

impl GameTime {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Start a new frame that took `host_delta` seconds on the host's clock.
    /// Negative deltas count as zero and long frames are capped.
    pub fn update(&mut self, host_delta: f32) {
        let clamped = host_delta.clamp(0.0, self.config.max_delta_time);
        self.delta_time = clamped * self.config.time_scale;
        self.total_time += f64::from(self.delta_time);
        self.frame_count += 1;
    }
}
