use geo::{polygon, Area, Contains, Intersects, Point, Polygon};
use swath::{error::PlanError, PlanConfig, Planner};

fn square() -> Polygon {
    polygon![
        (x: 0., y: 0.),
        (x: 0.00001, y: 0.),
        (x: 0.00001, y: 0.00001),
        (x: 0., y: 0.00001),
        (x: 0., y: 0.),
    ]
}

fn planner(lane_width: f64) -> Planner {
    Planner::new(PlanConfig::new(lane_width).expect("config"))
}

#[test]
fn identical_inputs_identical_outputs() {
    let first = planner(0.25).plan(square(), []).expect("plan");
    let second = planner(0.25).plan(square(), []).expect("plan");

    assert_eq!(first.mow_path(), second.mow_path());
    assert_eq!(first.mbb(), second.mbb());
    assert_eq!(first.travel_heading(), second.travel_heading());
    assert_eq!(first.coverage_fraction(), second.coverage_fraction());
    assert_eq!(first.roadmap().segments(), second.roadmap().segments());
}

#[test]
fn straddling_obstacle_notches_the_working_boundary() {
    // Half inside across the eastern edge.
    let obstacle: Polygon = polygon![
        (x: 0.000008, y: 0.000004),
        (x: 0.000015, y: 0.000004),
        (x: 0.000015, y: 0.000006),
        (x: 0.000008, y: 0.000006),
        (x: 0.000008, y: 0.000004),
    ];

    let result = planner(0.2)
        .plan(square(), [obstacle])
        .expect("plan");

    assert!(result.working_obstacles().is_empty());
    assert!(
        result.working_boundary().unsigned_area()
            < square().unsigned_area()
    );

    // Nothing is planned inside the notch.
    let notch_probe: Polygon = polygon![
        (x: 0.0000085, y: 0.0000045),
        (x: 0.0000095, y: 0.0000045),
        (x: 0.0000095, y: 0.0000055),
        (x: 0.0000085, y: 0.0000055),
        (x: 0.0000085, y: 0.0000045),
    ];
    assert!(!result.mow_path().intersects(&notch_probe));
}

#[test]
fn obstacle_margin_is_a_no_op() {
    let plain = planner(0.25).plan(square(), []).expect("plan");

    let with_margin = Planner::new(
        PlanConfig::new(0.25)
            .expect("config")
            .with_obstacle_margin(1.)
            .expect("margin"),
    )
    .plan(square(), [])
    .expect("plan");

    assert_eq!(plain.mow_path(), with_margin.mow_path());
    assert_eq!(
        plain.coverage_fraction(),
        with_margin.coverage_fraction()
    );
}

#[test]
fn path_endpoints_stay_inside_the_boundary() {
    let result = planner(0.25).plan(square(), []).expect("plan");
    let path = result.mow_path();

    let first = Point::from(path.0[0]);
    let last = Point::from(*path.0.last().expect("path"));
    assert!(result.working_boundary().contains(&first));
    assert!(result.working_boundary().contains(&last));
}

#[test]
fn single_vertex_boundary_is_degenerate() {
    let needle: Polygon = polygon![
        (x: 0.000001, y: 0.000001),
        (x: 0.000001, y: 0.000001),
    ];

    assert_eq!(
        planner(0.25).plan(needle, []).unwrap_err(),
        PlanError::DegenerateHull
    );
}

#[test]
fn boundary_inside_an_obstacle_is_empty() {
    let everything: Polygon = polygon![
        (x: -0.0001, y: -0.0001),
        (x: 0.0001, y: -0.0001),
        (x: 0.0001, y: 0.0001),
        (x: -0.0001, y: 0.0001),
        (x: -0.0001, y: -0.0001),
    ];

    assert_eq!(
        planner(0.25).plan(square(), [everything]).unwrap_err(),
        PlanError::EmptyBoundary
    );
}

#[test]
fn interior_obstacles_survive_conditioning() {
    let obstacle: Polygon = polygon![
        (x: 0.000004, y: 0.000004),
        (x: 0.000006, y: 0.000004),
        (x: 0.000006, y: 0.000006),
        (x: 0.000004, y: 0.000006),
        (x: 0.000004, y: 0.000004),
    ];

    let result = planner(0.2)
        .plan(square(), [obstacle.clone()])
        .expect("plan");

    assert_eq!(result.working_obstacles(), &[obstacle]);
}
