use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use rand::SeedableRng;
use rand::prelude::SmallRng;

use furnish_rs::collision::SatCollision;
use furnish_rs::entities::{Item, MutationConfig, Room};
use furnish_rs::geometry::TrigRotation;
use furnish_rs::geometry::primitives::Point;
use furnish_rs::io::{CONTAINER_EXPORT_ID, compose_layout, write_layout};

fn item(id: usize, width: f64, height: f64) -> Item {
    Item::try_new(id, "test item", width, height, "livingRoom", 0.0, 0.0)
        .expect("valid test dimensions")
        .with_rotation_strategy(Arc::new(TrigRotation))
}

fn room(width: f64, height: f64, items: Vec<Item>) -> Result<Room> {
    Room::new(width, height, vec![], items, Arc::new(SatCollision))
}

/// 10x10 container, a 4x2 item at (2,1) and a 2x2 item at (8,8): a valid layout.
fn two_item_room() -> Result<Room> {
    let a = item(1, 4.0, 2.0); //centered at (2,1) by construction
    let mut b = item(2, 2.0, 2.0);
    b.translate(7.0, 7.0); //centered at (8,8)
    room(10.0, 10.0, vec![a, b])
}

#[test]
fn valid_layout_has_zero_penalty_and_clear_flags() -> Result<()> {
    let mut r = two_item_room()?;

    let a = &r.items()[0];
    assert_eq!(a.center(), Point(2.0, 1.0));
    assert_eq!(
        a.footprint.vertices,
        [Point(0.0, 2.0), Point(4.0, 2.0), Point(4.0, 0.0), Point(0.0, 0.0)]
    );

    assert_eq!(r.evaluate_penalty()?, 0.0);
    assert!(r.items().iter().all(|i| !i.collided && !i.out_of_bounds));
    Ok(())
}

#[test]
fn coinciding_items_are_both_flagged_collided() -> Result<()> {
    let mut r = two_item_room()?;

    //move the second item onto the first item's center
    let penalty = r.move_item(1, -6.0, -7.0)?;

    assert!(penalty > 0.0);
    assert!(r.items()[0].collided);
    assert!(r.items()[1].collided);
    Ok(())
}

#[test]
fn vertex_outside_container_sets_out_of_bounds() -> Result<()> {
    let mut r = two_item_room()?;

    let penalty = r.move_item(0, -3.0, 0.0)?;

    assert!(penalty > 0.0);
    assert!(r.items()[0].out_of_bounds);
    assert!(!r.items()[1].out_of_bounds);
    Ok(())
}

#[test]
fn boundary_contact_is_still_in_bounds() -> Result<()> {
    //item A touches both the x = 0 and y = 0 walls exactly
    let r = two_item_room()?;
    assert!(!r.items()[0].out_of_bounds);
    Ok(())
}

#[test]
fn penalty_evaluation_is_deterministic() -> Result<()> {
    let mut r = two_item_room()?;
    r.move_item(1, -6.0, -7.0)?;

    let first = r.evaluate_penalty()?;
    let flags: Vec<_> = r.items().iter().map(|i| (i.collided, i.out_of_bounds)).collect();
    let second = r.evaluate_penalty()?;

    assert_eq!(first, second);
    assert_eq!(
        flags,
        r.items().iter().map(|i| (i.collided, i.out_of_bounds)).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn collides_pair_matches_geometry() -> Result<()> {
    let mut r = two_item_room()?;
    assert!(!r.collides_pair(&r.items()[0], &r.items()[1])?);

    r.move_item(1, -6.0, -7.0)?;
    assert!(r.collides_pair(&r.items()[0], &r.items()[1])?);
    Ok(())
}

#[test]
fn items_against_doors_are_penalized() -> Result<()> {
    let mut door = item(9, 4.0, 2.0);
    door.translate(3.0, 0.0); //centered at (5,1), along the bottom wall
    let a = item(1, 4.0, 2.0); //centered at (2,1), overlaps the door

    let mut r = Room::new(20.0, 20.0, vec![door], vec![a], Arc::new(SatCollision))?;

    assert!(r.evaluate_penalty()? > 0.0);
    assert!(r.items()[0].collided);
    Ok(())
}

#[test]
fn clearance_enforcement_is_optional() -> Result<()> {
    let mut a = Item::try_new(1, "armchair", 2.0, 2.0, "livingRoom", 2.0, 2.0)?;
    a.translate(1.0, 1.0); //solid [1,3]x[1,3], envelope [0,4]x[0,4]
    let mut b = item(2, 2.0, 2.0);
    b.translate(3.5, 1.0); //solid [3.5,5.5]x[1,3], clear of a's solid

    let mut r = room(20.0, 20.0, vec![a, b])?;
    assert_eq!(r.penalty, 0.0);

    r.enforce_clearance = true;
    assert!(r.evaluate_penalty()? > 0.0);
    assert!(r.items()[0].collided && r.items()[1].collided);
    Ok(())
}

#[test]
fn move_with_out_of_range_index_is_an_error() -> Result<()> {
    let mut r = two_item_room()?;
    assert!(r.move_item(99, 1.0, 1.0).is_err());
    Ok(())
}

#[test]
fn mutation_touches_one_item_and_never_the_doors() -> Result<()> {
    let mut door = item(9, 4.0, 2.0);
    door.translate(10.0, 0.0);
    let items = vec![item(1, 4.0, 2.0), item(2, 2.0, 2.0), item(3, 3.0, 3.0)];
    let mut r = Room::new(40.0, 40.0, vec![door], items, Arc::new(SatCollision))?;

    let doors_before: Vec<_> = r.doors().iter().map(|d| d.footprint.clone()).collect();
    let items_before: Vec<_> = r.items().iter().map(|i| i.footprint.clone()).collect();

    let mut rng = SmallRng::seed_from_u64(0);
    let mutation = r.mutate(&mut rng, &MutationConfig::default())?;

    let changed = r
        .items()
        .iter()
        .zip(&items_before)
        .filter(|(item, before)| item.footprint != **before)
        .count();
    assert_eq!(changed, 1);
    assert_eq!(r.items()[mutation.item_index].width(), mutation.prev.width);
    assert!(
        r.doors()
            .iter()
            .zip(&doors_before)
            .all(|(door, before)| door.footprint == *before)
    );
    Ok(())
}

#[test]
fn revert_restores_the_mutated_item() -> Result<()> {
    let mut r = two_item_room()?;
    let before: Vec<_> = r.items().iter().map(|i| i.footprint.clone()).collect();

    let mut rng = SmallRng::seed_from_u64(42);
    let mutation = r.mutate(&mut rng, &MutationConfig::default())?;
    r.evaluate_penalty()?;
    r.revert(&mutation)?;

    let after: Vec<_> = r.items().iter().map(|i| i.footprint.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(r.penalty, 0.0);
    Ok(())
}

#[test]
fn snapshots_survive_further_mutation() -> Result<()> {
    let mut r = two_item_room()?;
    let mut rng = SmallRng::seed_from_u64(7);
    let config = MutationConfig::default();

    r.mutate(&mut rng, &config)?;
    r.evaluate_penalty()?;
    let snapshot = r.save();

    for _ in 0..10 {
        r.mutate(&mut rng, &config)?;
    }
    r.evaluate_penalty()?;
    r.restore(&snapshot)?;

    assert_eq!(r.penalty, snapshot.penalty);
    let restored: Vec<_> = r.items().iter().map(|i| i.footprint.clone()).collect();
    assert_eq!(restored, snapshot.footprints);
    Ok(())
}

#[test]
fn layout_export_lists_container_boundary_first() -> Result<()> {
    let mut door = item(9, 4.0, 2.0);
    door.translate(10.0, 0.0);
    let r = Room::new(
        10.0,
        10.0,
        vec![door],
        vec![item(1, 4.0, 2.0)],
        Arc::new(SatCollision),
    )?;

    let layout = compose_layout(&r);

    assert_eq!(layout.len(), 3); //boundary + door + item
    assert_eq!(layout[0].id, CONTAINER_EXPORT_ID);
    assert_eq!(
        layout[0].vertices,
        [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]
    );
    assert_eq!(layout[1].id, 9);
    assert_eq!(layout[2].id, 1);

    //records stay serializable
    serde_json::to_string(&layout)?;
    Ok(())
}

#[test]
fn failed_layout_write_is_swallowed() -> Result<()> {
    let r = two_item_room()?;
    //the parent directory does not exist; the write fails but must not panic or error
    write_layout(&r, Path::new("/nonexistent-furnish-dir/layout.json"));
    Ok(())
}

#[test]
fn rooms_with_non_positive_dimensions_are_rejected() {
    assert!(Room::new(0.0, 10.0, vec![], vec![], Arc::new(SatCollision)).is_err());
    assert!(Room::new(10.0, -1.0, vec![], vec![], Arc::new(SatCollision)).is_err());
}
