use anyhow::Context;
use tracing::{error, info, trace, warn};

use crate::world::World;

/// A unit of behavior run against the world once per scheduling pass.
pub trait System: Send + Sync {
    fn run(&mut self, world: &mut World) -> anyhow::Result<()>;

    /// Name used in logs and error context.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Blanket implementation so closures can be used as systems.
impl<F: FnMut(&mut World) -> anyhow::Result<()> + Send + Sync> System for F {
    fn run(&mut self, world: &mut World) -> anyhow::Result<()> {
        (self)(world)
    }
}

/// An ordered list of systems, run front to back on every [`SystemGroup::run`].
pub struct SystemGroup {
    label: &'static str,
    systems: Vec<Box<dyn System>>,
}

impl SystemGroup {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            systems: Vec::new(),
        }
    }

    /// Add a system to the end of the group.
    pub fn add<S: System + 'static>(&mut self, system: S) -> &mut Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Run all systems in order on the given world.
    ///
    /// The first failing system stops the group; the systems after it do not run.
    pub fn run(&mut self, world: &mut World) -> anyhow::Result<()> {
        for system in &mut self.systems {
            trace!(group = self.label, system = system.name(), "running system");
            if let Err(err) = system.run(world) {
                error!(group = self.label, system = system.name(), "system failed: {err:#}");
                return Err(err).with_context(|| {
                    format!("system `{}` in group `{}` failed", system.name(), self.label)
                });
            }
        }
        Ok(())
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Names of the member systems, in run order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|s| s.name())
    }

    /// Number of systems in the group.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

/// The init/update/render groups and the order a host drives them in:
/// init once, then per frame update, render, and the world tick.
pub struct FrameSchedule {
    pub init: SystemGroup,
    pub update: SystemGroup,
    pub render: SystemGroup,
    initialized: bool,
}

impl FrameSchedule {
    pub fn new() -> Self {
        Self {
            init: SystemGroup::new("init"),
            update: SystemGroup::new("update"),
            render: SystemGroup::new("render"),
            initialized: false,
        }
    }

    /// Run the init group. Only the first call has any effect.
    pub fn initialize(&mut self, world: &mut World) -> anyhow::Result<()> {
        if self.initialized {
            warn!("frame schedule already initialized, skipping init group");
            return Ok(());
        }
        self.initialized = true;
        info!(
            init = self.init.len(),
            update = self.update.len(),
            render = self.render.len(),
            "initializing frame schedule"
        );
        self.init.run(world)
    }

    /// Run one frame. A failure in update skips render and the tick.
    pub fn frame(&mut self, world: &mut World) -> anyhow::Result<()> {
        self.update.run(world)?;
        self.render.run(world)?;
        world.tick();
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Default for FrameSchedule {
    fn default() -> Self {
        Self::new()
    }
}
