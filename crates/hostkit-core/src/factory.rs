//! Factory contract for building one holder's component set

use crate::component::SharedComponent;

/// Builds the fixed set of components for one host instance and manages
/// their service registrations.
///
/// Implementations own the wiring knowledge: which components exist, in
/// what order (the order here becomes the container's fan-out order), and
/// which of them are service-capable. Service-capable components are
/// registered into the holder's registry partition as they are built, so
/// siblings can locate them from their first lifecycle hook onward.
pub trait ComponentFactory {
    /// Build the component set and register its service-capable members.
    fn new_components(&mut self);

    /// The built components, in the order they should join the container.
    fn components(&self) -> &[SharedComponent];

    /// Release this holder's registry partition.
    ///
    /// One of the two independent teardown paths; the other is the
    /// container's `on_destroy`. Both must run exactly once per holder,
    /// in either order.
    fn release(&mut self);
}
