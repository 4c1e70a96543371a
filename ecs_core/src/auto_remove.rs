//! Auto-removal convenience system: detaches `T` from every entity that
//! still carries it, once per invocation. Built directly on top of a filter
//! rather than scanning pools, so it pays only for entities currently
//! matching `T`.

use std::marker::PhantomData;

use crate::component::Component;
use crate::filter::Filter;
use crate::schedule::Run;
use crate::world::World;

pub struct AutoRemove<T> {
    filter: Filter,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Component + Default> AutoRemove<T> {
    pub fn new(world: &mut World, capacity: usize) -> Self {
        let filter = world.filter::<T>().end(capacity);
        Self {
            filter,
            _marker: PhantomData,
        }
    }
}

impl<T: Component + Default> Run for AutoRemove<T> {
    fn run(&mut self, world: &mut World) {
        let entities: Vec<_> = self.filter.iterate().collect();
        for entity in entities {
            world.del::<T>(entity);
        }
    }
}
