//! Minimal system-lifecycle contract: five ordered phases driven by a
//! [`Scheduler`]. No parallel dispatch or sharding — systems run on a single
//! thread, in registration order.

use crate::world::World;

pub trait PreInit {
    fn pre_init(&mut self, world: &mut World);
}

pub trait Init {
    fn init(&mut self, world: &mut World);
}

pub trait Run {
    fn run(&mut self, world: &mut World);
}

pub trait Destroy {
    fn destroy(&mut self, world: &mut World);
}

pub trait PostDestroy {
    fn post_destroy(&mut self, world: &mut World);
}

struct RunEntry {
    system: Box<dyn Run>,
    filter: Option<Box<dyn Fn(&World) -> bool>>,
}

/// Drives registered systems through their lifecycle phases. Init-family and
/// destroy-family phases run in (destroy: reversed) registration order;
/// run-family phases run in registration order, each optionally gated by a
/// predicate checked fresh on every tick.
#[derive(Default)]
pub struct Scheduler {
    pre_init: Vec<Box<dyn PreInit>>,
    init: Vec<Box<dyn Init>>,
    run: Vec<RunEntry>,
    destroy: Vec<Box<dyn Destroy>>,
    post_destroy: Vec<Box<dyn PostDestroy>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pre_init(&mut self, system: impl PreInit + 'static) -> &mut Self {
        self.pre_init.push(Box::new(system));
        self
    }

    pub fn add_init(&mut self, system: impl Init + 'static) -> &mut Self {
        self.init.push(Box::new(system));
        self
    }

    pub fn add_run(&mut self, system: impl Run + 'static) -> &mut Self {
        self.run.push(RunEntry { system: Box::new(system), filter: None });
        self
    }

    /// Like [`Scheduler::add_run`], but `system.run` is skipped on ticks where
    /// `filter(world)` returns `false`. Skipping a system does not shift the
    /// position of any other system in the run order.
    pub fn add_run_filtered(
        &mut self,
        system: impl Run + 'static,
        filter: impl Fn(&World) -> bool + 'static,
    ) -> &mut Self {
        self.run.push(RunEntry {
            system: Box::new(system),
            filter: Some(Box::new(filter)),
        });
        self
    }

    pub fn add_destroy(&mut self, system: impl Destroy + 'static) -> &mut Self {
        self.destroy.push(Box::new(system));
        self
    }

    pub fn add_post_destroy(&mut self, system: impl PostDestroy + 'static) -> &mut Self {
        self.post_destroy.push(Box::new(system));
        self
    }

    pub fn pre_init_all(&mut self, world: &mut World) {
        for system in &mut self.pre_init {
            system.pre_init(world);
        }
    }

    pub fn init_all(&mut self, world: &mut World) {
        for system in &mut self.init {
            system.init(world);
        }
    }

    pub fn run_all(&mut self, world: &mut World) {
        for entry in &mut self.run {
            let should_run = entry.filter.as_ref().map_or(true, |f| f(world));
            if should_run {
                entry.system.run(world);
            }
            if let Some(leaked) = world.check_no_leaked_entities() {
                log::error!("entity {leaked} is alive with zero components after a run system");
            }
        }
    }

    pub fn destroy_all(&mut self, world: &mut World) {
        for system in self.destroy.iter_mut().rev() {
            system.destroy(world);
        }
    }

    pub fn post_destroy_all(&mut self, world: &mut World) {
        for system in self.post_destroy.iter_mut().rev() {
            system.post_destroy(world);
        }
    }
}
