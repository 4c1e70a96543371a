//! Packed entity handles: an `(id, generation)` pair that survives past the
//! id's current lifetime, for storage in places that outlive a single frame.

use super::{EntityId, Generation};
use crate::world::World;

/// A generation-checked reference to an entity. Safe to store across frames;
/// [`Packed::unpack`] reports whether the original entity is still the one
/// alive at that id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Packed {
    id: EntityId,
    generation: Generation,
}

impl Packed {
    pub(crate) fn new(id: EntityId, generation: Generation) -> Self {
        Self { id, generation }
    }

    /// The raw id this handle was packed from. Only meaningful together with
    /// [`Packed::unpack`]'s liveness check — using it directly risks aliasing
    /// a different entity that has since recycled the same slot.
    pub fn raw_id(&self) -> EntityId {
        self.id
    }

    /// Resolves the handle against `world`. Returns `None` if the slot has
    /// been recycled (the generation no longer matches) or was never alive.
    pub fn unpack(&self, world: &World) -> Option<EntityId> {
        if world.is_entity_alive(self.id) && world.entity_generation(self.id) == self.generation {
            Some(self.id)
        } else {
            None
        }
    }
}
