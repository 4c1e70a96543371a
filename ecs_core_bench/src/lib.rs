//! Benchmark support for `ecs_core`.
//!
//! Workload shapes cover the operations systems spend the most time on:
//! entity creation, component attach/detach, and filter iteration, at scales
//! up to 10,000 entities.

pub mod components;
