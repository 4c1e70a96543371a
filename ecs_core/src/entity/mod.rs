//! Entity table: generation-based liveness tracking and id recycling.
//!
//! An entity is a plain `u32` index into the table. The table does not store
//! component data itself (see [`crate::pool`]) — only a generation and a
//! component count per slot, used to decide when an id is alive and when it
//! can be recycled.

pub mod handle;

pub use handle::Packed;

/// A raw entity index. Valid only for the lifetime of the current generation —
/// see [`Packed`] for a handle that survives across recycling.
pub type EntityId = u32;

/// The generation of an entity slot.
///
/// Positive means alive (the value is the generation number, starting at 1).
/// Negative means dead; its magnitude is the generation the slot will receive
/// the next time it is revived. Zero is the "never allocated" sentinel.
pub type Generation = i16;

#[derive(Clone, Copy, Debug, Default)]
struct Record {
    generation: Generation,
    component_count: u32,
}

/// Computes the dead-generation encoding for a slot whose alive generation was
/// `generation`. Saturates at `i16::MAX` back to the encoding that revives as 1,
/// rather than overflowing.
fn kill_generation(generation: Generation) -> Generation {
    debug_assert!(generation > 0, "kill_generation called on a non-alive generation");
    if generation == Generation::MAX {
        return -1;
    }
    let dead = -(generation + 1);
    if dead == 0 {
        -1
    } else {
        dead
    }
}

/// Computes the revived (alive) generation from a slot's dead encoding.
fn revive_generation(dead: Generation) -> Generation {
    debug_assert!(dead < 0, "revive_generation called on a non-dead generation");
    -dead
}

/// Entity table: a growable array of per-slot records plus a recycle stack.
///
/// Stores a generation/component-count record per slot directly, rather than
/// a separate `Entity` value, since pools need to index storage by the same
/// slot number.
pub struct Table {
    records: Vec<Record>,
    next_id: EntityId,
    recycled: Vec<EntityId>,
}

impl Table {
    pub fn with_capacity(capacity: usize, recycle_capacity: usize) -> Self {
        Self {
            records: vec![Record::default(); capacity.max(1)],
            next_id: 0,
            recycled: Vec::with_capacity(recycle_capacity),
        }
    }

    /// Total capacity of entity-indexed storage (what pools must grow to match).
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// One past the highest id ever handed out; the exclusive upper bound for
    /// "every id ever allocated."
    pub fn next_id(&self) -> EntityId {
        self.next_id
    }

    /// Allocates a fresh or recycled id. Returns the new capacity if the
    /// backing array had to grow (the caller must then resize every pool).
    pub fn alloc(&mut self) -> (EntityId, Option<usize>) {
        if let Some(id) = self.recycled.pop() {
            let record = &mut self.records[id as usize];
            record.generation = revive_generation(record.generation);
            debug_assert_eq!(record.component_count, 0);
            return (id, None);
        }

        let id = self.next_id;
        self.next_id += 1;

        let grew = if id as usize >= self.records.len() {
            let new_capacity = (self.records.len() * 2).max(1);
            self.records.resize(new_capacity, Record::default());
            Some(new_capacity)
        } else {
            None
        };

        self.records[id as usize] = Record {
            generation: 1,
            component_count: 0,
        };
        (id, grew)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.records
            .get(id as usize)
            .map(|r| r.generation > 0)
            .unwrap_or(false)
    }

    pub fn generation(&self, id: EntityId) -> Generation {
        self.records[id as usize].generation
    }

    pub fn component_count(&self, id: EntityId) -> u32 {
        self.records[id as usize].component_count
    }

    pub fn increment(&mut self, id: EntityId) {
        self.records[id as usize].component_count += 1;
    }

    /// Decrements the component count and returns the new value.
    pub fn decrement(&mut self, id: EntityId) -> u32 {
        let record = &mut self.records[id as usize];
        debug_assert!(record.component_count > 0, "component count underflow on entity {id}");
        record.component_count -= 1;
        record.component_count
    }

    /// Marks `id` dead and pushes it onto the recycle stack. The caller is
    /// responsible for having already brought `component_count` to zero.
    pub fn kill(&mut self, id: EntityId) {
        let record = &mut self.records[id as usize];
        debug_assert_eq!(record.component_count, 0, "killing entity {id} with live components");
        record.generation = kill_generation(record.generation);
        self.recycled.push(id);
    }
}
