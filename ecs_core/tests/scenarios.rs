//! Integration tests covering the entity/pool/filter contract end to end,
//! exercising `World` as a whole rather than any single module.

use ecs_core::world::{World, WorldConfig};

#[derive(Default)]
struct A;
#[derive(Default)]
struct B;

fn world() -> World {
    World::new(WorldConfig::default()).unwrap()
}

// Empty world: new_entity returns 0 with generation 1; del_entity(0) kills
// it (silent — it had no components). new_entity then returns 0 again, at generation 2.
#[test]
fn fresh_entity_recycle_with_no_components() {
    let mut w = world();
    let e0 = w.new_entity();
    assert_eq!(e0, 0);
    assert_eq!(w.entity_generation(e0), 1);

    w.del_entity(e0);
    assert!(!w.is_entity_alive(e0));

    let e0_again = w.new_entity();
    assert_eq!(e0_again, 0);
    assert_eq!(w.entity_generation(e0_again), 2);
}

// Register pool A, then pool B. e0 = new; add A; component_count==1.
// Filter `inc A` contains {e0}. Add B: `inc A exc B` empty, `inc A` still
// {e0}, `inc B` contains {e0}. Del A: `inc A exc B` still empty (A absent),
// `inc B` still {e0}. Del B: e0 auto-killed.
#[test]
fn pool_registration_order_and_filter_transitions() {
    let mut w = world();
    w.pool::<A>();
    w.pool::<B>();

    let e0 = w.new_entity();
    w.add::<A>(e0);
    assert_eq!(w.component_count(e0), 1);

    let inc_a = w.filter::<A>().end(8);
    assert_eq!(inc_a.count(), 1);

    let inc_a_exc_b = w.filter::<A>().exc::<B>().end(8);
    let inc_b = w.filter::<B>().end(8);

    w.add::<B>(e0);
    assert_eq!(inc_a_exc_b.count(), 0);
    assert_eq!(inc_a.count(), 1);
    assert_eq!(inc_b.count(), 1);

    w.del::<A>(e0);
    assert_eq!(inc_a_exc_b.count(), 0, "A absent so the exclude-B term is moot");
    assert_eq!(inc_b.count(), 1);

    w.del::<B>(e0);
    assert!(!w.is_entity_alive(e0), "component count reached zero, entity auto-killed");
}

// e0, e1 both have A. Iterate `inc A`; on e0 add B, on e1 del A. Other
// filters see the eager change. The `inc A` iterator still sees {e0, e1}
// until disposal; after disposal, `inc A` == {e0}.
#[test]
fn iteration_sees_snapshot_other_filters_update_eagerly() {
    let mut w = world();
    let e0 = w.new_entity();
    let e1 = w.new_entity();
    w.add::<A>(e0);
    w.add::<A>(e1);

    let inc_a = w.filter::<A>().end(8);
    let inc_b = w.filter::<B>().end(8);
    assert_eq!(inc_a.count(), 2);

    let mut seen = Vec::new();
    for e in inc_a.iterate() {
        seen.push(e);
        if e == e0 {
            w.add::<B>(e0);
        } else if e == e1 {
            w.del::<A>(e1);
        }
    }
    assert_eq!(seen, vec![e0, e1], "iterator must still see the pre-mutation snapshot");
    assert_eq!(inc_b.count(), 1, "other filters update eagerly during the locked iteration");

    assert_eq!(inc_a.count(), 1, "deferred removal of e1 applies once the iterator drops");
}

// Pack e with generation 3; del e; recycle; unpack of the old handle
// returns None since the recycled id now carries a newer generation.
#[test]
fn packed_handle_invalidated_by_recycle() {
    let mut w = world();
    let e = w.new_entity();
    w.add::<A>(e); // keep it alive across two kill/revive cycles to reach generation 3
    w.del::<A>(e);
    let e = w.new_entity();
    w.add::<A>(e);
    w.del::<A>(e);
    let e = w.new_entity();
    assert_eq!(w.entity_generation(e), 3);

    let packed = w.pack(e);
    w.del_entity(e);
    let _reused = w.new_entity();
    assert_eq!(packed.unpack(&w), None);
}

// Mask `inc A, exc B` and `exc B, inc A` resolve to the same filter.
#[test]
fn mask_canonicalization_is_order_independent() {
    let mut w = world();
    let f1 = w.filter::<A>().exc::<B>().end(8);
    let f2 = w.filter::<A>().exc::<B>().end(8);

    let e = w.new_entity();
    w.add::<A>(e);
    assert_eq!(f1.count(), 1);
    assert_eq!(f2.count(), 1, "identical canonical mask must return the same filter");
}

// 10,000 entities each holding A; build filter `inc A`; count == 10000;
// iterate, deleting A from each entity inside the loop; after iteration,
// filter count == 0 and all entities are dead.
#[test]
fn bulk_delete_during_iteration() {
    let mut w = world();
    let entities: Vec<_> = (0..10_000)
        .map(|_| {
            let e = w.new_entity();
            w.add::<A>(e);
            e
        })
        .collect();

    let inc_a = w.filter::<A>().end(10_000);
    assert_eq!(inc_a.count(), 10_000);

    for e in inc_a.iterate() {
        w.del::<A>(e);
    }

    assert_eq!(inc_a.count(), 0);
    for e in entities {
        assert!(!w.is_entity_alive(e));
    }
}

// Universal invariant 1: component_count(e) == sum of pool.has(e) over pools.
#[test]
fn invariant_component_count_matches_pool_membership() {
    let mut w = world();
    let e = w.new_entity();
    w.add::<A>(e);
    w.add::<B>(e);
    let expected = w.has::<A>(e) as u32 + w.has::<B>(e) as u32;
    assert_eq!(w.component_count(e), expected);
}

// Universal invariant 4: pack/unpack round trip, preserved across non-killing
// structural changes, invalidated forever once the entity is killed.
#[test]
fn invariant_pack_unpack_survives_unrelated_mutation() {
    let mut w = world();
    let e = w.new_entity();
    w.add::<A>(e);
    let packed = w.pack(e);
    assert_eq!(packed.unpack(&w), Some(e));

    w.add::<B>(e);
    w.del::<B>(e);
    assert_eq!(packed.unpack(&w), Some(e), "unrelated component churn must not invalidate the handle");

    w.del_entity(e);
    assert_eq!(packed.unpack(&w), None, "killing the entity must permanently invalidate the handle");
}

// Universal invariant 7: get_all_entities returns exactly the live set.
#[test]
fn invariant_get_all_entities_matches_live_set() {
    let mut w = world();
    let e0 = w.new_entity();
    w.add::<A>(e0);
    let e1 = w.new_entity();
    w.add::<B>(e1);
    let e2 = w.new_entity();
    w.add::<A>(e2);
    w.del_entity(e2);

    let mut buf = Vec::new();
    let count = w.get_all_entities(&mut buf);
    assert_eq!(count, 2);
    assert!(buf.contains(&e0) && buf.contains(&e1));
    assert!(!buf.contains(&e2));
}

// Boundary: generation saturates at i16::MAX back to 1, never 0.
#[test]
fn boundary_generation_saturation() {
    let mut w = world();
    let e = w.new_entity();
    // Drive the entity's generation to i16::MAX by repeated kill/revive.
    while w.entity_generation(e) < i16::MAX {
        w.add::<A>(e);
        w.del::<A>(e);
        w.new_entity(); // recycled id comes back as `e` again (LIFO recycle stack, single live id)
    }
    assert_eq!(w.entity_generation(e), i16::MAX);

    w.add::<A>(e);
    w.del::<A>(e);
    let revived = w.new_entity();
    assert_eq!(revived, e);
    assert_eq!(w.entity_generation(e), 1, "must wrap to 1, never 0");
}

// Boundary: nested iteration of the same filter.
#[test]
fn boundary_nested_iteration_defers_until_outermost_drop() {
    let mut w = world();
    let e = w.new_entity();
    w.add::<A>(e);
    let inc_a = w.filter::<A>().end(8);

    let outer = inc_a.iterate();
    {
        let inner = inc_a.iterate();
        w.del::<A>(e);
        drop(inner);
        assert_eq!(inc_a.count(), 1, "still locked by the outer iterator");
    }
    drop(outer);
    assert_eq!(inc_a.count(), 0);
}
