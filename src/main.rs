//! Bounce - sprites bouncing around a viewport, driven by a small ECS
//!
//! This is the headless host: it loads settings, publishes the per-frame
//! elements, and drives the demo's frame schedule.

mod headless;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use tracing::{debug, info};
use tracing_subscriber::fmt::Formatter;
use tracing_subscriber::{reload, EnvFilter, FmtSubscriber};

use bounce_core::GameTime;
use bounce_ecs::World;
use bounce_game::{demo_schedule, InputAction, InputHandler, InputState, Renderer, Textures};

use headless::{HeadlessRenderer, PlaceholderTextures, RenderStats, ScriptedInput};
use settings::DemoSettings;

/// Headless Bounce demo
#[derive(Parser, Debug)]
#[command(name = "bounce", version)]
struct Args {
    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the config file and exit
    #[arg(long)]
    write_config: bool,
}

/// Lets the configured log level take over once settings are loaded, unless
/// `RUST_LOG` already chose one.
struct LogLevel {
    handle: reload::Handle<EnvFilter, Formatter>,
    from_env: bool,
}

impl LogLevel {
    fn apply(&self, level: &str) -> Result<()> {
        if self.from_env {
            return Ok(());
        }
        let filter = EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level `{level}` in settings"))?;
        self.handle
            .reload(filter)
            .context("Failed to apply log level")
    }
}

/// Install the subscriber at `info` (or `RUST_LOG`) so settings loading is logged.
fn init_logging() -> Result<LogLevel> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new("info"), false),
    };
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_filter_reloading();
    let handle = builder.reload_handle();
    tracing::subscriber::set_global_default(builder.finish())
        .context("Failed to set subscriber")?;
    Ok(LogLevel { handle, from_env })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = init_logging()?;
    let settings = DemoSettings::load(args.config.as_deref());
    log_level.apply(&settings.logging.level)?;

    if args.write_config {
        let path = args
            .config
            .or_else(DemoSettings::default_path)
            .context("Could not determine config directory")?;
        return settings.save(&path);
    }

    info!("Starting Bounce demo...");
    info!(
        "Viewport {}x{}, {} frames at {:.4}s, seed {}",
        settings.window.width,
        settings.window.height,
        settings.simulation.frames,
        settings.simulation.frame_delta,
        settings.simulation.seed
    );

    // Long-lived elements
    let stats = Arc::new(Mutex::new(RenderStats::default()));
    let mut world = World::new();
    world.add_element(settings.window.viewport())?;
    world.add_element(Textures::new(PlaceholderTextures::new(
        settings.window.sprite_size,
    )))?;
    world.add_element(Renderer::new(HeadlessRenderer::new(stats.clone())))?;
    world.add_element(InputState::new())?;

    let mut schedule = demo_schedule(settings.simulation.seed, settings.window.clear_color());
    schedule
        .initialize(&mut world)
        .context("Init systems failed")?;

    let script = ScriptedInput::new(
        settings.input.spawn_frames.iter().copied(),
        settings.input.quit_frame,
    );
    let mut input = InputHandler::new();
    let mut game_time = GameTime::new(settings.simulation.time_config());

    for frame in 0..settings.simulation.frames {
        script.apply(frame, &mut input);
        if input.state.is_just_pressed(InputAction::Quit) {
            info!("Quit requested on frame {}", frame);
            break;
        }

        game_time.update(settings.simulation.frame_delta);
        world.add_or_replace_element(game_time.clone());
        world.add_or_replace_element(input.state.clone());

        schedule
            .frame(&mut world)
            .with_context(|| format!("Frame {frame} failed"))?;
        input.end_frame();

        if frame % 60 == 0 {
            debug!(
                frame,
                entities = world.entity_count(),
                draws = stats.lock().last_frame_draws,
                "frame summary"
            );
        }
    }

    let stats = stats.lock();
    info!(
        "Finished after {} frames ({:.2}s simulated): {} entities, {} draw calls",
        stats.frames,
        game_time.total_time,
        world.entity_count(),
        stats.draws
    );
    Ok(())
}
