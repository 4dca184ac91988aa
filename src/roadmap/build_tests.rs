use super::*;
use geo::{polygon, Intersects};

fn square() -> Polygon {
    polygon![
        (x: 0., y: 0.),
        (x: 0.00001, y: 0.),
        (x: 0.00001, y: 0.00001),
        (x: 0., y: 0.00001),
        (x: 0., y: 0.),
    ]
}

fn center_obstacle() -> Polygon {
    polygon![
        (x: 0.000004, y: 0.000004),
        (x: 0.000006, y: 0.000004),
        (x: 0.000006, y: 0.000006),
        (x: 0.000004, y: 0.000006),
        (x: 0.000004, y: 0.000004),
    ]
}

#[test]
fn square_produces_a_skeleton() {
    let roadmap = build(&square(), &[]);

    assert!(!roadmap.is_empty());
    assert!(roadmap.len() >= 4, "{}", roadmap.len());
}

#[test]
fn segments_stay_inside_the_boundary() {
    let boundary = square();
    let roadmap = build(&boundary, &[]);

    for segment in roadmap.segments() {
        for coord in &segment.0 {
            assert!(
                boundary.intersects(&Point::from(*coord)),
                "{coord:?} escaped the boundary"
            );
        }
    }
}

#[test]
fn segments_avoid_obstacles() {
    let obstacle = center_obstacle();
    let roadmap = build(&square(), std::slice::from_ref(&obstacle));

    assert!(!roadmap.is_empty());
    for segment in roadmap.segments() {
        assert!(
            !segment.intersects(&obstacle),
            "segment crosses the obstacle"
        );
    }
}

#[test]
fn degenerate_seeds_fall_back_to_the_outline() {
    let needle: Polygon = polygon![
        (x: 0., y: 0.),
        (x: 0.00001, y: 0.),
        (x: 0., y: 0.),
    ];

    let roadmap = build(&needle, &[]);

    assert_eq!(roadmap.len(), 1);
    assert_eq!(roadmap.segments()[0], *needle.exterior());
}

#[test]
fn collinear_seeds_fall_back_to_the_outline() {
    let flat: Polygon = polygon![
        (x: 0., y: 0.),
        (x: 0.000005, y: 0.),
        (x: 0.00001, y: 0.),
        (x: 0., y: 0.),
    ];

    let roadmap = build(&flat, &[]);

    assert_eq!(roadmap.len(), 1);
}
