//! CLI argument definitions using clap

use clap::Parser;

#[derive(Parser)]
#[command(name = "hostkit")]
#[command(about = "Hostkit host simulator - runs a component set through a scripted lifecycle")]
#[command(
    long_about = r#"Hostkit host simulator

Builds a registry, factory, container, and bridge for a simulated host,
then feeds the bridge a scripted sequence of lifecycle events. Exercises
container fan-out, sibling service location through the registry,
holder-scoped release on teardown, and instance state carried across
destroy/recreate cycles.

USAGE:
  hostkit                        # One create..destroy cycle
  hostkit --cycles 3             # Recreate twice, state carried across
  hostkit --pause-resume         # Background/foreground round before stop
  RUST_LOG=debug hostkit         # Watch the fan-out"#
)]
#[command(version)]
pub struct Cli {
    /// Holder identity for the simulated host instance
    #[arg(long, default_value = "workbench-1")]
    pub holder: String,

    /// Number of destroy/recreate cycles to run
    #[arg(long, default_value_t = 1)]
    pub cycles: u32,

    /// Insert a pause/resume round before stopping
    #[arg(long)]
    pub pause_resume: bool,

    /// Trigger a soft reload while resumed
    #[arg(long)]
    pub reload: bool,
}
