//! Component marker trait and the optional auto-reset capability.

/// Any `'static` type can be stored in a [`crate::pool::Pool`]. This marker
/// exists for readability at call sites (`T: Component`) rather than to carry
/// behavior.
pub trait Component: 'static {}

impl<T: 'static> Component for T {}

/// Capability a component type can declare to customize how its slot is reset
/// when a pool detaches it, instead of falling back to `T::default()`.
///
/// Stable Rust has no way to ask "does `T` implement `AutoReset`" generically
/// at the point a pool is constructed, so this is resolved by which
/// constructor the caller chooses: [`crate::world::World::pool`] always resets
/// via `Default`, while [`crate::world::World::pool_with_reset`] wires up the
/// hook below. Both paths still require `T: Default`, since `add` needs a
/// placeholder value to reset before handing out the new slot.
pub trait AutoReset: Component {
    fn auto_reset(&mut self);
}
