//! The change dispatcher: routes every component attach/detach into the
//! filters that care about it, per the add/remove decision table below.
//!
//! |              | added = true                                   | added = false (detach)                          |
//! |--------------|-------------------------------------------------|--------------------------------------------------|
//! | including    | real state (bit already set) → `add_entity`      | real state (bit not yet cleared) → `remove_entity` |
//! | excluding    | pretend bit unset (pre-add state) → `remove_entity` | pretend bit unset (post-detach state) → `add_entity` |
//!
//! Ordering matters: `add` updates the presence bit and component count
//! *before* dispatching; `del` dispatches *before* clearing the slot. Both
//! choices are what let the table above read off the real presence bit
//! directly instead of needing an explicit "previous state" snapshot for the
//! including column.

use crate::entity::EntityId;
use crate::mask::Mask;
use crate::pool::PoolId;

use super::World;

impl World {
    pub(crate) fn mask_compatible(&self, mask: &Mask, entity: EntityId) -> bool {
        mask.include.iter().all(|id| self.pools[id.index()].has(entity))
            && mask.exclude.iter().all(|id| !self.pools[id.index()].has(entity))
    }

    fn mask_compatible_without(&self, mask: &Mask, entity: EntityId, without: PoolId) -> bool {
        mask.include
            .iter()
            .all(|id| *id == without || self.pools[id.index()].has(entity))
            && mask
                .exclude
                .iter()
                .all(|id| *id == without || !self.pools[id.index()].has(entity))
    }

    pub(crate) fn dispatch(&mut self, entity: EntityId, pool_id: PoolId, added: bool) {
        if pool_id.index() >= self.filters_including.len() {
            return;
        }

        if added {
            for f in &self.filters_including[pool_id.index()] {
                if self.mask_compatible(&f.mask(), entity) {
                    f.add_entity(entity);
                }
            }
            for f in &self.filters_excluding[pool_id.index()] {
                if self.mask_compatible_without(&f.mask(), entity, pool_id) {
                    f.remove_entity(entity);
                }
            }
        } else {
            for f in &self.filters_including[pool_id.index()] {
                if self.mask_compatible(&f.mask(), entity) {
                    f.remove_entity(entity);
                }
            }
            for f in &self.filters_excluding[pool_id.index()] {
                if self.mask_compatible_without(&f.mask(), entity, pool_id) {
                    f.add_entity(entity);
                }
            }
        }
    }
}
