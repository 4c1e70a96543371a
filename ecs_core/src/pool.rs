//! Component pool: entity-indexed sparse storage for one component type.
//!
//! One slot per entity index, rather than a sparse/dense pair with a
//! separately compacted array. Presence is tracked separately from the value
//! so a detached slot can still hold (and reuse) its allocation on the next
//! attach.

use std::any::Any;

use crate::component::Component;

/// Identifies one registered pool (one Rust type) within a [`crate::world::World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(pub(crate) u32);

impl PoolId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a pool resets a slot it is about to reuse or vacate.
enum Reset<T> {
    Default,
    Hook(fn(&mut T)),
}

impl<T> Clone for Reset<T> {
    fn clone(&self) -> Self {
        match self {
            Reset::Default => Reset::Default,
            Reset::Hook(f) => Reset::Hook(*f),
        }
    }
}

/// The type-erased half of the pool interface `World` needs to treat every
/// pool uniformly: presence checks for the dispatcher and mask evaluation,
/// growth notification, and generic detach during `del_entity`.
pub(crate) trait ErasedPool {
    fn has(&self, entity: u32) -> bool;
    fn del_raw(&mut self, entity: u32);
    fn resize(&mut self, capacity: usize);
    fn get_raw(&self, entity: u32) -> Option<&dyn Any>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Sparse, entity-indexed storage for component type `T`.
pub struct Pool<T> {
    id: PoolId,
    present: Vec<bool>,
    data: Vec<Option<T>>,
    reset: Reset<T>,
}

impl<T: Component + Default> Pool<T> {
    pub(crate) fn new(id: PoolId, capacity: usize) -> Self {
        Self {
            id,
            present: vec![false; capacity],
            data: (0..capacity).map(|_| None).collect(),
            reset: Reset::Default,
        }
    }

    pub(crate) fn new_with_hook(id: PoolId, capacity: usize, hook: fn(&mut T)) -> Self {
        Self {
            id,
            present: vec![false; capacity],
            data: (0..capacity).map(|_| None).collect(),
            reset: Reset::Hook(hook),
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    fn ensure_capacity(&mut self, len: usize) {
        if len > self.present.len() {
            self.present.resize(len, false);
            self.data.resize_with(len, || None);
        }
    }

    fn apply_reset(&self, slot: &mut T) {
        match &self.reset {
            Reset::Default => *slot = T::default(),
            Reset::Hook(f) => f(slot),
        }
    }

    /// Marks `entity`'s slot present and resets it, returning the slot for
    /// the caller to populate. Panics if the slot is already present —
    /// callers (`World::add`) must check `has` first.
    pub(crate) fn add(&mut self, entity: u32) -> &mut T {
        let idx = entity as usize;
        self.ensure_capacity(idx + 1);
        debug_assert!(!self.present[idx], "duplicate component add on entity {entity}");
        self.present[idx] = true;
        let mut value = T::default();
        self.apply_reset(&mut value);
        self.data[idx] = Some(value);
        self.data[idx].as_mut().expect("just inserted")
    }

    pub fn has(&self, entity: u32) -> bool {
        self.present.get(entity as usize).copied().unwrap_or(false)
    }

    pub fn get(&self, entity: u32) -> Option<&T> {
        if self.has(entity) {
            self.data[entity as usize].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, entity: u32) -> Option<&mut T> {
        if self.has(entity) {
            self.data[entity as usize].as_mut()
        } else {
            None
        }
    }
}

impl<T: Component + Default> ErasedPool for Pool<T> {
    fn has(&self, entity: u32) -> bool {
        Pool::has(self, entity)
    }

    fn del_raw(&mut self, entity: u32) {
        let idx = entity as usize;
        if !self.present[idx] {
            return;
        }
        if let Some(slot) = self.data[idx].as_mut() {
            self.apply_reset(slot);
        }
        self.present[idx] = false;
    }

    fn resize(&mut self, capacity: usize) {
        self.ensure_capacity(capacity);
    }

    fn get_raw(&self, entity: u32) -> Option<&dyn Any> {
        if self.has(entity) {
            self.data[entity as usize].as_ref().map(|v| v as &dyn Any)
        } else {
            None
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A handle naming a registered pool for type `T`. Cheap to copy; all
/// operations take an explicit `World` reference rather than borrowing one
/// internally, since attaching/detaching a component must also reach the
/// entity table and the change dispatcher, which the handle does not own.
pub struct PoolHandle<T> {
    id: PoolId,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> PoolHandle<T> {
    pub(crate) fn new(id: PoolId) -> Self {
        Self {
            id,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }
}

impl<T> Clone for PoolHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PoolHandle<T> {}
