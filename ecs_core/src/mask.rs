//! Masks: canonical include/exclude pool-id sets used to describe a filter.

use crate::component::Component;
use crate::filter::Filter;
use crate::pool::PoolId;
use crate::world::World;

/// A mixing prime for the mask hash below. The exact value is not
/// load-bearing — any constant that mixes include/exclude contributions
/// differently and spreads well works.
const MASK_PRIME: u64 = 314159;

/// A canonicalized (sorted, deduped) include/exclude pair, identifying one
/// logical filter. Two masks built from the same pool ids, in any order,
/// produce the same [`Mask`] and therefore the same [`Filter`].
#[derive(Clone, Debug)]
pub struct Mask {
    pub(crate) include: Vec<PoolId>,
    pub(crate) exclude: Vec<PoolId>,
    pub(crate) hash: u64,
}

impl Mask {
    pub(crate) fn new(mut include: Vec<PoolId>, mut exclude: Vec<PoolId>) -> Self {
        include.sort_unstable();
        include.dedup();
        exclude.sort_unstable();
        exclude.dedup();
        let hash = compute_hash(&include, &exclude);
        Self { include, exclude, hash }
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }
}

fn compute_hash(include: &[PoolId], exclude: &[PoolId]) -> u64 {
    let mut hash: u64 = 0;
    for id in include {
        hash = hash.wrapping_mul(MASK_PRIME).wrapping_add(id.0 as u64);
    }
    for id in exclude {
        hash = hash.wrapping_mul(MASK_PRIME).wrapping_sub(id.0 as u64);
    }
    hash
}

/// Accumulates include/exclude pool ids for one filter, then registers (or
/// finds an existing, identical) filter in the world via [`MaskBuilder::end`].
pub struct MaskBuilder<'w> {
    world: &'w mut World,
    include: Vec<PoolId>,
    exclude: Vec<PoolId>,
}

impl<'w> MaskBuilder<'w> {
    pub(crate) fn new(world: &'w mut World, seed_include: PoolId) -> Self {
        Self {
            world,
            include: vec![seed_include],
            exclude: Vec::new(),
        }
    }

    /// Adds `T` to the include set: matching entities must carry `T`.
    pub fn inc<T: Component + Default>(mut self) -> Self {
        let id = self.world.pool::<T>().id();
        assert!(
            !self.exclude.contains(&id),
            "pool already used as an exclude term in this mask"
        );
        assert!(!self.include.contains(&id), "pool already included in this mask");
        self.include.push(id);
        self
    }

    /// Adds `T` to the exclude set: matching entities must not carry `T`.
    pub fn exc<T: Component + Default>(mut self) -> Self {
        let id = self.world.pool::<T>().id();
        assert!(
            !self.include.contains(&id),
            "pool already used as an include term in this mask"
        );
        assert!(!self.exclude.contains(&id), "pool already excluded in this mask");
        self.exclude.push(id);
        self
    }

    /// Finalizes the mask and returns the (possibly pre-existing) [`Filter`]
    /// for it. `capacity` sizes the filter's initial dense-array allocation
    /// and is ignored if an identical filter already exists.
    pub fn end(self, capacity: usize) -> Filter {
        self.world.register_filter(Mask::new(self.include, self.exclude), capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_order_independent() {
        // Given
        let a = Mask::new(vec![PoolId(1), PoolId(2)], vec![PoolId(3)]);
        // When
        let b = Mask::new(vec![PoolId(2), PoolId(1)], vec![PoolId(3)]);
        // Then
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn include_and_exclude_of_same_pool_hash_differently() {
        // Given
        let a = Mask::new(vec![PoolId(1)], vec![]);
        // When
        let b = Mask::new(vec![], vec![PoolId(1)]);
        // Then
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn dedup_of_repeated_pool_id() {
        // Given / When
        let m = Mask::new(vec![PoolId(1), PoolId(1)], vec![]);
        // Then
        assert_eq!(m.include, vec![PoolId(1)]);
    }
}
