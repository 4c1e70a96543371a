//! A lightweight, single-threaded Entity-Component-System core.
//!
//! The [`world::World`] owns every entity and every [`pool::Pool`] of component
//! storage. Queries are expressed as [`mask::Mask`]s (built with
//! [`mask::MaskBuilder`]) and maintained incrementally as live [`filter::Filter`]
//! sets rather than recomputed per frame.
//!
//! # Example
//!
//! ```
//! use ecs_core::world::{World, WorldConfig};
//!
//! #[derive(Default)]
//! struct Position { x: f32, y: f32 }
//!
//! #[derive(Default)]
//! struct Velocity { dx: f32, dy: f32 }
//!
//! let mut world = World::new(WorldConfig::default()).unwrap();
//! let e = world.new_entity();
//! world.add::<Position>(e);
//! world.add::<Velocity>(e).dx = 1.0;
//!
//! let moving = world.filter::<Position>().inc::<Velocity>().end(64);
//! for e in moving.iterate() {
//!     let dx = world.get::<Velocity>(e).dx;
//!     world.get_mut::<Position>(e).x += dx;
//! }
//! assert_eq!(moving.count(), 1);
//! ```

pub mod auto_remove;
pub mod component;
pub mod entity;
pub mod filter;
pub mod mask;
pub mod pool;
pub mod schedule;
pub mod unique;
pub mod world;

pub use entity::{EntityId, Generation};
pub use filter::Filter;
pub use mask::{Mask, MaskBuilder};
pub use pool::{Pool, PoolId};
pub use world::{World, WorldConfig};
