//! Builds the workbench component set for one simulated host instance

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use hostkit_core::{
    ComponentFactory, HostContext, HostkitResult, SharedComponent, SharedRegistry, StateBag,
};

use crate::components::{Banner, BuildInfo, StatusLine, Telemetry, WorkQueue};

/// Factory for the workbench set: banner, work queue, status line, and the
/// service-capable telemetry collector. Build order here is the
/// container's fan-out order.
pub struct WorkbenchFactory {
    ctx: HostContext,
    build: Rc<BuildInfo>,
    registry: SharedRegistry,
    bag: Rc<RefCell<StateBag>>,
    components: Vec<SharedComponent>,
}

impl WorkbenchFactory {
    /// Resolve required host capabilities up front; a host that does not
    /// provide them cannot run this set at all.
    pub fn new(
        ctx: HostContext,
        registry: SharedRegistry,
        bag: Rc<RefCell<StateBag>>,
    ) -> HostkitResult<Self> {
        let build = ctx.capability::<BuildInfo>()?;
        Ok(Self {
            ctx,
            build,
            registry,
            bag,
            components: Vec::new(),
        })
    }
}

impl ComponentFactory for WorkbenchFactory {
    fn new_components(&mut self) {
        let holder_id = self.ctx.holder_id().clone();

        // Register the service before any sibling sees a lifecycle hook.
        let telemetry = Telemetry::shared();
        self.registry
            .borrow_mut()
            .register(&holder_id, telemetry.clone());

        self.components.push(Rc::new(RefCell::new(Banner::new(
            self.build.clone(),
            self.registry.clone(),
            holder_id.clone(),
        ))));
        self.components
            .push(Rc::new(RefCell::new(WorkQueue::new(self.bag.clone()))));
        self.components.push(Rc::new(RefCell::new(StatusLine::new(
            self.registry.clone(),
            holder_id,
        ))));
        self.components.push(telemetry);
    }

    fn components(&self) -> &[SharedComponent] {
        &self.components
    }

    fn release(&mut self) {
        let released = self
            .registry
            .borrow_mut()
            .release_holder(self.ctx.holder_id());
        debug!("released {} service(s) for {}", released, self.ctx.holder_id());
        self.components.clear();
    }
}
