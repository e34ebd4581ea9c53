use anyhow::Result;
use test_case::test_case;

use furnish_rs::entities::Item;
use furnish_rs::geometry::primitives::Point;
use furnish_rs::geometry::{Footprint, TrigRotation};
use furnish_rs::util::FPA;

fn assert_vertices_eq(actual: &[Point; 4], expected: &[(f64, f64)]) {
    for (a, &(x, y)) in actual.iter().zip(expected) {
        assert!(
            FPA(a.x()) == FPA(x) && FPA(a.y()) == FPA(y),
            "expected ({x}, {y}), got ({}, {})",
            a.x(),
            a.y()
        );
    }
}

fn assert_footprints_eq(a: &Footprint, b: &Footprint) {
    for (va, vb) in a
        .vertices
        .iter()
        .chain(a.clearance.iter())
        .zip(b.vertices.iter().chain(b.clearance.iter()))
    {
        assert!(
            FPA(va.x()) == FPA(vb.x()) && FPA(va.y()) == FPA(vb.y()),
            "vertex mismatch: {va:?} vs {vb:?}"
        );
    }
    assert!(FPA(a.center.x()) == FPA(b.center.x()));
    assert!(FPA(a.center.y()) == FPA(b.center.y()));
}

#[test]
fn construction_derives_axis_aligned_vertices() -> Result<()> {
    let fp = Footprint::try_new(4.0, 2.0, 0.0, 0.0)?;

    assert_eq!(fp.center, Point(2.0, 1.0));
    assert_eq!(fp.rotation, 0);
    assert_vertices_eq(&fp.vertices, &[(0.0, 2.0), (4.0, 2.0), (4.0, 0.0), (0.0, 0.0)]);
    Ok(())
}

#[test]
fn clearance_envelope_expands_by_margins() -> Result<()> {
    let fp = Footprint::try_new(4.0, 2.0, 2.0, 2.0)?;

    // base 4x2 centered at (2,1), envelope 6x4 around the same center
    assert_vertices_eq(
        &fp.clearance,
        &[(-1.0, 3.0), (5.0, 3.0), (5.0, -1.0), (-1.0, -1.0)],
    );
    Ok(())
}

#[test]
fn rotate_zero_is_identity() -> Result<()> {
    let mut fp = Footprint::try_new(4.0, 2.0, 1.0, 1.0)?;
    let original = fp.clone();

    fp.rotate(0, &TrigRotation);

    assert_eq!(fp.rotation, 0);
    assert_footprints_eq(&fp, &original);
    Ok(())
}

#[test]
fn rotate_quarter_turn() -> Result<()> {
    let mut fp = Footprint::try_new(4.0, 2.0, 0.0, 0.0)?;

    fp.rotate(90, &TrigRotation);

    assert_eq!(fp.rotation, 90);
    // the 4x2 rectangle about (2,1) becomes 2 wide and 4 tall
    assert_vertices_eq(&fp.vertices, &[(1.0, -1.0), (1.0, 3.0), (3.0, 3.0), (3.0, -1.0)]);
    Ok(())
}

#[test_case(370, 10; "wraps past a full turn")]
#[test_case(-90, 270; "negative deltas normalize")]
#[test_case(720, 0; "two full turns")]
#[test_case(450, 90; "one and a quarter turns")]
fn rotation_is_modular(a: i32, b: i32) -> Result<()> {
    let mut fp_a = Footprint::try_new(4.0, 2.0, 1.0, 3.0)?;
    let mut fp_b = fp_a.clone();

    fp_a.rotate(a, &TrigRotation);
    fp_b.rotate(b, &TrigRotation);

    assert_eq!(fp_a.rotation, fp_b.rotation);
    assert_footprints_eq(&fp_a, &fp_b);
    Ok(())
}

#[test]
fn rotation_accumulates_relative_deltas() -> Result<()> {
    let mut stepped = Footprint::try_new(4.0, 2.0, 0.0, 0.0)?;
    let mut direct = stepped.clone();

    stepped.rotate(30, &TrigRotation);
    stepped.rotate(60, &TrigRotation);
    direct.rotate(90, &TrigRotation);

    assert_eq!(stepped.rotation, 90);
    assert_footprints_eq(&stepped, &direct);
    Ok(())
}

#[test]
fn repeated_single_degree_rotations_do_not_drift() -> Result<()> {
    let mut fp = Footprint::try_new(7.0, 3.0, 2.0, 2.0)?;
    let original = fp.clone();

    // each call recomputes from the unrotated base, so a full turn in 360 steps
    // must land exactly back on it
    for _ in 0..360 {
        fp.rotate(1, &TrigRotation);
    }

    assert_eq!(fp.rotation, 0);
    assert_footprints_eq(&fp, &original);
    Ok(())
}

#[test]
fn translate_roundtrip_restores_geometry() -> Result<()> {
    let mut fp = Footprint::try_new(4.0, 2.0, 1.0, 1.0)?;
    let original = fp.clone();

    fp.translate(3.25, -1.5);
    assert!(FPA(fp.center.x()) == FPA(5.25));
    fp.translate(-3.25, 1.5);

    assert_footprints_eq(&fp, &original);
    Ok(())
}

#[test]
fn translation_moves_clearance_envelope_too() -> Result<()> {
    let mut fp = Footprint::try_new(2.0, 2.0, 2.0, 2.0)?;

    fp.translate(10.0, 10.0);

    assert_vertices_eq(
        &fp.clearance,
        &[(9.0, 13.0), (13.0, 13.0), (13.0, 9.0), (9.0, 9.0)],
    );
    Ok(())
}

#[test]
fn rotation_without_strategy_is_a_noop() -> Result<()> {
    let mut item = Item::try_new(1, "table", 4.0, 2.0, "kitchen", 0.0, 0.0)?;
    let original = item.footprint.clone();

    item.rotate(45);

    assert_eq!(item.footprint, original);
    Ok(())
}

#[test_case(0.0, 2.0; "zero width")]
#[test_case(4.0, 0.0; "zero height")]
#[test_case(-4.0, 2.0; "negative width")]
fn non_positive_dimensions_are_rejected(width: f64, height: f64) {
    assert!(Footprint::try_new(width, height, 0.0, 0.0).is_err());
    assert!(Item::try_new(1, "bogus", width, height, "kitchen", 0.0, 0.0).is_err());
}

#[test]
fn negative_clearance_is_rejected() {
    assert!(Footprint::try_new(4.0, 2.0, -1.0, 0.0).is_err());
}
