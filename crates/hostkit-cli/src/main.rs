//! Hostkit host simulator
//!
//! Stands in for a real host application: it owns the lifecycle event
//! source and drives a full component set through it. Each cycle builds a
//! fresh context, factory, delegate, and bridge, runs the scripted event
//! sequence, then tears the host down and shows that late events go
//! nowhere. With `--cycles N` the work queue's depth survives recreation
//! through the shared state bag.

mod args;
mod components;
mod factory;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hostkit_core::{
    HolderId, HostContext, HostDelegate, HostEvent, LifecycleBridge, ServiceRegistry, StateBag,
};

use crate::args::Cli;
use crate::components::{BuildInfo, Telemetry, WorkQueue};
use crate::factory::WorkbenchFactory;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let registry = ServiceRegistry::new().into_shared();
    let bag = Rc::new(RefCell::new(StateBag::new()));
    let holder_id = HolderId::from(cli.holder.as_str());

    for cycle in 1..=cli.cycles {
        info!("cycle {}/{} for holder {}", cycle, cli.cycles, holder_id);

        let ctx = HostContext::new(holder_id.clone()).with(BuildInfo {
            version: env!("CARGO_PKG_VERSION"),
        });
        let factory = WorkbenchFactory::new(ctx, registry.clone(), bag.clone())?;
        let delegate = Rc::new(RefCell::new(HostDelegate::new(Box::new(factory))));
        let bridge = LifecycleBridge::new(delegate.clone());

        bridge.dispatch(&HostEvent::Created);
        bridge.dispatch(&HostEvent::Started);
        bridge.dispatch(&HostEvent::Resumed);

        // Hosts emit plenty of events this subsystem does not care about.
        bridge.dispatch(&HostEvent::Other("window-focus".to_string()));

        if cli.reload {
            delegate.borrow_mut().reload();
        }

        if cli.pause_resume {
            bridge.dispatch(&HostEvent::Paused);
            bridge.dispatch(&HostEvent::Resumed);
        }

        // Grab the service before teardown releases the holder partition.
        let telemetry = registry.borrow().lookup::<Telemetry>(&holder_id);

        bridge.dispatch(&HostEvent::Paused);
        bridge.dispatch(&HostEvent::Stopped);
        bridge.dispatch(&HostEvent::Destroyed);
        drop(delegate);

        // The event source outlives the host; late events are dropped.
        bridge.dispatch(&HostEvent::Resumed);
        if !bridge.is_attached() {
            info!("host gone, bridge went quiet");
        }

        if let Some(telemetry) = telemetry {
            println!("telemetry for cycle {cycle}:");
            for (what, count) in telemetry.borrow().report() {
                println!("  {what}: {count}");
            }
        }
    }

    let pending: u32 = bag.borrow().get(WorkQueue::PENDING_KEY).unwrap_or(0);
    println!("pending jobs carried across cycles: {pending}");
    Ok(())
}
