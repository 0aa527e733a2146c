//! Components of the simulated workbench host
//!
//! Four components in the shape a real host composes: two plain panels, a
//! queue that carries state across recreation, and one service-capable
//! telemetry collector its siblings locate through the registry.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, info};

use hostkit_core::{
    Component, HolderId, Lifecycle, Service, SharedRegistry, StateBag, StateHandle,
};

/// Capability the simulated host exposes through its context.
pub struct BuildInfo {
    pub version: &'static str,
}

/// Collects named marks from its siblings. The service-capable member of
/// the set: registered in the holder's partition so the others can find it
/// without holding a reference.
pub struct Telemetry {
    counters: BTreeMap<String, u32>,
}

impl Telemetry {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            counters: BTreeMap::new(),
        }))
    }

    pub fn mark(&mut self, what: &str) {
        *self.counters.entry(what.to_string()).or_insert(0) += 1;
    }

    pub fn report(&self) -> Vec<(String, u32)> {
        self.counters
            .iter()
            .map(|(what, count)| (what.clone(), *count))
            .collect()
    }
}

impl Lifecycle for Telemetry {
    fn on_create(&mut self) {
        self.mark("telemetry.create");
    }

    fn on_destroy(&mut self) {
        self.mark("telemetry.destroy");
    }
}

impl Component for Telemetry {
    fn name(&self) -> &str {
        "telemetry"
    }
}

impl Service for Telemetry {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Announces the session and marks telemetry when the host starts and
/// stops.
pub struct Banner {
    build: Rc<BuildInfo>,
    registry: SharedRegistry,
    holder_id: HolderId,
}

impl Banner {
    pub fn new(build: Rc<BuildInfo>, registry: SharedRegistry, holder_id: HolderId) -> Self {
        Self {
            build,
            registry,
            holder_id,
        }
    }

    fn telemetry(&self) -> Option<Rc<RefCell<Telemetry>>> {
        self.registry.borrow().lookup::<Telemetry>(&self.holder_id)
    }
}

impl Lifecycle for Banner {
    fn on_create(&mut self) {
        info!("workbench {} ready", self.build.version);
    }

    fn on_start(&mut self) {
        if let Some(telemetry) = self.telemetry() {
            telemetry.borrow_mut().mark("banner.start");
        }
    }

    fn on_stop(&mut self) {
        if let Some(telemetry) = self.telemetry() {
            telemetry.borrow_mut().mark("banner.stop");
        }
    }
}

impl Component for Banner {
    fn name(&self) -> &str {
        "banner"
    }

    fn reload(&mut self) {
        info!("workbench {} redrawn", self.build.version);
    }
}

/// Accepts one job per resume and carries its queue depth across
/// destroy/recreate cycles through the shared state bag.
pub struct WorkQueue {
    pending: u32,
    bag: Rc<RefCell<StateBag>>,
}

impl WorkQueue {
    pub const PENDING_KEY: &'static str = "work_queue.pending";

    pub fn new(bag: Rc<RefCell<StateBag>>) -> Self {
        Self { pending: 0, bag }
    }
}

impl StateHandle for WorkQueue {
    fn on_save_state(&mut self, out: &mut StateBag) {
        let _ = out.put(Self::PENDING_KEY, &self.pending);
    }

    fn on_restore_state(&mut self, saved: Option<&StateBag>) {
        if let Some(saved) = saved {
            self.pending = saved.get(Self::PENDING_KEY).unwrap_or(0);
        }
    }
}

impl Lifecycle for WorkQueue {
    fn on_create(&mut self) {
        let bag = self.bag.clone();
        let bag = bag.borrow();
        let saved = if bag.is_empty() { None } else { Some(&*bag) };
        self.on_restore_state(saved);
        debug!("work queue restored with {} pending job(s)", self.pending);
    }

    fn on_resume(&mut self) {
        self.pending += 1;
        debug!("job accepted, {} pending", self.pending);
    }

    fn on_stop(&mut self) {
        let bag = self.bag.clone();
        let mut bag = bag.borrow_mut();
        self.on_save_state(&mut bag);
    }
}

impl Component for WorkQueue {
    fn name(&self) -> &str {
        "work-queue"
    }
}

/// Marks telemetry on every foreground/background flip.
pub struct StatusLine {
    registry: SharedRegistry,
    holder_id: HolderId,
}

impl StatusLine {
    pub fn new(registry: SharedRegistry, holder_id: HolderId) -> Self {
        Self {
            registry,
            holder_id,
        }
    }

    fn mark(&self, what: &str) {
        if let Some(telemetry) = self.registry.borrow().lookup::<Telemetry>(&self.holder_id) {
            telemetry.borrow_mut().mark(what);
        }
    }
}

impl Lifecycle for StatusLine {
    fn on_resume(&mut self) {
        self.mark("status.resume");
    }

    fn on_pause(&mut self) {
        self.mark("status.pause");
    }
}

impl Component for StatusLine {
    fn name(&self) -> &str {
        "status-line"
    }
}
