//! The world: owns entities, pools, and filters, and runs the change
//! dispatcher that keeps filters in sync as components attach and detach.

mod dispatcher;

use std::any::TypeId;
use std::collections::HashMap;

use crate::component::{AutoReset, Component};
use crate::entity::{self, EntityId, Generation, Packed};
use crate::filter::Filter;
use crate::mask::{Mask, MaskBuilder};
use crate::pool::{ErasedPool, Pool, PoolHandle, PoolId};

/// Capacity configuration for a new [`World`]. Every field defaults to 512,
/// a reasonable starting arena size for small-to-medium simulations.
#[derive(Clone, Copy, Debug)]
pub struct WorldConfig {
    pub entities: usize,
    pub recycled: usize,
    pub pools: usize,
    pub filters: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            entities: 512,
            recycled: 512,
            pools: 512,
            filters: 512,
        }
    }
}

/// A recoverable configuration error, distinct from the contract-violation
/// panics the rest of `World`'s API raises for programmer errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("world config field `{field}` must be greater than zero")]
    NonPositiveCapacity { field: &'static str },
}

impl WorldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.entities == 0 {
            return Err(ConfigError::NonPositiveCapacity { field: "entities" });
        }
        if self.recycled == 0 {
            return Err(ConfigError::NonPositiveCapacity { field: "recycled" });
        }
        if self.pools == 0 {
            return Err(ConfigError::NonPositiveCapacity { field: "pools" });
        }
        if self.filters == 0 {
            return Err(ConfigError::NonPositiveCapacity { field: "filters" });
        }
        Ok(())
    }
}

/// Owns every entity, component pool, and filter for one simulation.
pub struct World {
    entities: entity::Table,
    pools: Vec<Box<dyn ErasedPool>>,
    type_index: HashMap<TypeId, PoolId>,
    filters: Vec<Filter>,
    filters_by_hash: HashMap<u64, Filter>,
    filters_including: Vec<Vec<Filter>>,
    filters_excluding: Vec<Vec<Filter>>,
    destroyed: bool,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            entities: entity::Table::with_capacity(config.entities, config.recycled),
            pools: Vec::with_capacity(config.pools),
            type_index: HashMap::with_capacity(config.pools),
            filters: Vec::with_capacity(config.filters),
            filters_by_hash: HashMap::with_capacity(config.filters),
            filters_including: Vec::with_capacity(config.pools),
            filters_excluding: Vec::with_capacity(config.pools),
            destroyed: false,
        })
    }

    // -- entity lifecycle ---------------------------------------------------

    pub fn new_entity(&mut self) -> EntityId {
        let (id, grew) = self.entities.alloc();
        if let Some(capacity) = grew {
            for pool in self.pools.iter_mut() {
                pool.resize(capacity);
            }
        }
        id
    }

    pub fn is_entity_alive(&self, entity: EntityId) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_generation(&self, entity: EntityId) -> Generation {
        self.entities.generation(entity)
    }

    pub fn component_count(&self, entity: EntityId) -> u32 {
        self.entities.component_count(entity)
    }

    /// Detaches every component on `entity`, which kills it as its count
    /// reaches zero. A no-op on an already-dead id, and a direct kill on a
    /// live entity that already has zero components.
    pub fn del_entity(&mut self, entity: EntityId) {
        if !self.is_entity_alive(entity) {
            return;
        }
        for idx in 0..self.pools.len() {
            if self.pools[idx].has(entity) {
                self.del_pool_component(idx, entity);
                if !self.is_entity_alive(entity) {
                    return;
                }
            }
        }
        if self.is_entity_alive(entity) {
            self.kill(entity);
        }
    }

    fn kill(&mut self, entity: EntityId) {
        self.entities.kill(entity);
    }

    /// Fills `buf` with every currently-live entity that carries at least one
    /// component, clearing it first. Returns the count written.
    pub fn get_all_entities(&self, buf: &mut Vec<EntityId>) -> usize {
        buf.clear();
        for id in 0..self.entities.next_id() {
            if self.is_entity_alive(id) && self.component_count(id) > 0 {
                buf.push(id);
            }
        }
        buf.len()
    }

    pub fn pack(&self, entity: EntityId) -> Packed {
        Packed::new(entity, self.entity_generation(entity))
    }

    /// Debug-only contract check: finds an entity that is alive but carries
    /// zero components, which should only ever exist transiently inside a
    /// single structural operation. Compiled out in release builds.
    #[cfg(debug_assertions)]
    pub fn check_no_leaked_entities(&self) -> Option<EntityId> {
        (0..self.entities.next_id()).find(|&id| self.is_entity_alive(id) && self.component_count(id) == 0)
    }

    #[cfg(not(debug_assertions))]
    pub fn check_no_leaked_entities(&self) -> Option<EntityId> {
        None
    }

    // -- world lifecycle ------------------------------------------------

    /// Whether the world has not yet been [`World::destroy`]ed.
    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    /// Releases every pool, filter, and directory. Further use of the world
    /// is unspecified (every query will simply see an empty world).
    pub fn destroy(&mut self) {
        self.pools.clear();
        self.type_index.clear();
        self.filters.clear();
        self.filters_by_hash.clear();
        self.filters_including.clear();
        self.filters_excluding.clear();
        self.destroyed = true;
    }

    // -- pools ----------------------------------------------------------

    fn pool_id_for<T: Component + 'static>(&self) -> Option<PoolId> {
        self.type_index.get(&TypeId::of::<T>()).copied()
    }

    fn ensure_directories(&mut self, id: PoolId) {
        let len = id.index() + 1;
        if self.filters_including.len() < len {
            self.filters_including.resize_with(len, Vec::new);
            self.filters_excluding.resize_with(len, Vec::new);
        }
    }

    /// Registers (idempotently) a pool for `T` reset via `Default`.
    pub fn pool<T: Component + Default>(&mut self) -> PoolHandle<T> {
        let type_id = TypeId::of::<T>();
        if let Some(&id) = self.type_index.get(&type_id) {
            return PoolHandle::new(id);
        }
        let capacity = self.entities.capacity();
        let id = PoolId(self.pools.len() as u32);
        self.pools.push(Box::new(Pool::<T>::new(id, capacity)));
        self.type_index.insert(type_id, id);
        self.ensure_directories(id);
        PoolHandle::new(id)
    }

    /// Registers (idempotently) a pool for `T` reset via its [`AutoReset`] hook.
    pub fn pool_with_reset<T: AutoReset + Default>(&mut self) -> PoolHandle<T> {
        let type_id = TypeId::of::<T>();
        if let Some(&id) = self.type_index.get(&type_id) {
            return PoolHandle::new(id);
        }
        let capacity = self.entities.capacity();
        let id = PoolId(self.pools.len() as u32);
        self.pools
            .push(Box::new(Pool::<T>::new_with_hook(id, capacity, |slot: &mut T| slot.auto_reset())));
        self.type_index.insert(type_id, id);
        self.ensure_directories(id);
        PoolHandle::new(id)
    }

    fn typed_pool<T: Component + Default>(&self, id: PoolId) -> &Pool<T> {
        self.pools[id.index()]
            .as_any()
            .downcast_ref::<Pool<T>>()
            .expect("pool type mismatch")
    }

    fn typed_pool_mut<T: Component + Default>(&mut self, id: PoolId) -> &mut Pool<T> {
        self.pools[id.index()]
            .as_any_mut()
            .downcast_mut::<Pool<T>>()
            .expect("pool type mismatch")
    }

    /// Attaches `T` to `entity`, returning the new (reset) component for the
    /// caller to populate. Panics if `entity` is dead or already carries `T`.
    pub fn add<T: Component + Default>(&mut self, entity: EntityId) -> &mut T {
        assert!(self.is_entity_alive(entity), "cannot add a component to dead entity {entity}");
        let pool_id = self.pool::<T>().id();
        {
            let pool = self.typed_pool_mut::<T>(pool_id);
            assert!(!pool.has(entity), "entity {entity} already carries this component");
            pool.add(entity);
        }
        self.entities.increment(entity);
        self.dispatch(entity, pool_id, true);
        self.typed_pool_mut::<T>(pool_id).get_mut(entity).expect("just inserted")
    }

    /// Same as [`World::add`] but registers the pool with its [`AutoReset`] hook.
    pub fn add_with_reset<T: AutoReset + Default>(&mut self, entity: EntityId) -> &mut T {
        assert!(self.is_entity_alive(entity), "cannot add a component to dead entity {entity}");
        let pool_id = self.pool_with_reset::<T>().id();
        {
            let pool = self.typed_pool_mut::<T>(pool_id);
            assert!(!pool.has(entity), "entity {entity} already carries this component");
            pool.add(entity);
        }
        self.entities.increment(entity);
        self.dispatch(entity, pool_id, true);
        self.typed_pool_mut::<T>(pool_id).get_mut(entity).expect("just inserted")
    }

    pub fn has<T: Component + Default>(&self, entity: EntityId) -> bool {
        match self.pool_id_for::<T>() {
            Some(id) => self.typed_pool::<T>(id).has(entity),
            None => false,
        }
    }

    pub fn get<T: Component + Default>(&self, entity: EntityId) -> &T {
        let id = self
            .pool_id_for::<T>()
            .expect("no pool registered for this component type");
        self.typed_pool::<T>(id)
            .get(entity)
            .unwrap_or_else(|| panic!("entity {entity} does not carry this component"))
    }

    pub fn get_mut<T: Component + Default>(&mut self, entity: EntityId) -> &mut T {
        let id = self
            .pool_id_for::<T>()
            .expect("no pool registered for this component type");
        self.typed_pool_mut::<T>(id)
            .get_mut(entity)
            .unwrap_or_else(|| panic!("entity {entity} does not carry this component"))
    }

    /// Every currently-registered pool id, in registration order. Paired with
    /// [`World::get_raw`] for reflection-style enumeration of an entity's
    /// components without knowing their concrete types up front.
    pub fn pool_ids(&self) -> impl Iterator<Item = PoolId> + '_ {
        (0..self.pools.len() as u32).map(PoolId)
    }

    /// Type-erased component access. Unlike [`World::get`], the caller need
    /// not know `T` — only a [`PoolId`] obtained from [`World::pool_ids`] or
    /// [`PoolHandle::id`]. Intended for reflection-style enumeration; ordinary
    /// component access should use [`World::get`]/[`World::get_mut`].
    pub fn get_raw(&self, pool: PoolId, entity: EntityId) -> Option<&dyn std::any::Any> {
        self.pools.get(pool.index())?.get_raw(entity)
    }

    /// Detaches `T` from `entity`. A no-op if the pool does not exist or the
    /// entity does not carry it.
    pub fn del<T: Component + Default>(&mut self, entity: EntityId) {
        let Some(pool_id) = self.pool_id_for::<T>() else {
            return;
        };
        if !self.typed_pool::<T>(pool_id).has(entity) {
            return;
        }
        self.del_pool_component(pool_id.index(), entity);
    }

    /// Shared tail of `del::<T>` and `del_entity`'s per-pool sweep: dispatch,
    /// then clear the slot, then account for it on the entity table.
    fn del_pool_component(&mut self, pool_index: usize, entity: EntityId) {
        let pool_id = PoolId(pool_index as u32);
        self.dispatch(entity, pool_id, false);
        self.pools[pool_index].del_raw(entity);
        let remaining = self.entities.decrement(entity);
        if remaining == 0 {
            self.kill(entity);
        }
    }

    // -- masks & filters --------------------------------------------------

    /// Starts a [`MaskBuilder`] seeded with `T` in the include set.
    pub fn filter<T: Component + Default>(&mut self) -> MaskBuilder<'_> {
        let id = self.pool::<T>().id();
        MaskBuilder::new(self, id)
    }

    pub(crate) fn register_filter(&mut self, mask: Mask, capacity: usize) -> Filter {
        if let Some(existing) = self.filters_by_hash.get(&mask.hash()) {
            return existing.clone();
        }

        let filter = Filter::new(mask.clone(), capacity);
        for &id in &mask.include {
            self.ensure_directories(id);
            self.filters_including[id.index()].push(filter.clone());
        }
        for &id in &mask.exclude {
            self.ensure_directories(id);
            self.filters_excluding[id.index()].push(filter.clone());
        }
        self.filters_by_hash.insert(mask.hash(), filter.clone());
        self.filters.push(filter.clone());

        for id in 0..self.entities.next_id() {
            if self.is_entity_alive(id) && self.mask_compatible(&mask, id) {
                filter.add_entity(id);
            }
        }

        filter
    }
}
