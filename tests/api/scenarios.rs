use geo::{polygon, Contains, Intersects, Point, Polygon};
use swath::{MarkerKind, PlanConfig, Planner, VisitState};

// ~1.11 m on a side at the equator.
fn unit_square() -> Polygon {
    polygon![
        (x: 0., y: 0.),
        (x: 0.00001, y: 0.),
        (x: 0.00001, y: 0.00001),
        (x: 0., y: 0.00001),
        (x: 0., y: 0.),
    ]
}

// A 0.25 m square centered on the field.
fn central_obstacle() -> Polygon {
    polygon![
        (x: 0.0000039, y: 0.0000039),
        (x: 0.0000061, y: 0.0000039),
        (x: 0.0000061, y: 0.0000061),
        (x: 0.0000039, y: 0.0000061),
        (x: 0.0000039, y: 0.0000039),
    ]
}

#[test]
fn unit_square_quarter_lanes() {
    let planner = Planner::new(PlanConfig::new(0.25).expect("config"));

    let result = planner.plan(unit_square(), []).expect("plan");

    assert!(
        result.coverage_fraction() >= 0.9,
        "coverage: {}",
        result.coverage_fraction()
    );
    assert!(
        result.mow_path().0.len() >= 8,
        "vertices: {}",
        result.mow_path().0.len()
    );

    let boundary = result.working_boundary().clone();
    let first = Point::from(result.mow_path().0[0]);
    let last = Point::from(*result.mow_path().0.last().expect("path"));
    assert!(boundary.contains(&first));
    assert!(boundary.contains(&last));
}

#[test]
fn central_obstacle_is_avoided() {
    let planner = Planner::new(PlanConfig::new(0.11).expect("config"));
    let obstacle = central_obstacle();

    let result = planner
        .plan(unit_square(), [obstacle.clone()])
        .expect("plan");

    assert!(
        !result.mow_path().intersects(&obstacle),
        "mow path crosses the obstacle"
    );
    assert!(
        result.coverage_fraction() > 0.75,
        "coverage: {}",
        result.coverage_fraction()
    );

    // Lane-length hops exceed four lane widths, so arrows must show up.
    let arrows = result
        .markers()
        .iter()
        .filter(|marker| marker.kind() == MarkerKind::Direction)
        .count();
    assert!(arrows >= 1);
}

#[test]
fn visited_cells_respect_their_labels() {
    let planner = Planner::new(PlanConfig::new(0.11).expect("config"));
    let obstacle = central_obstacle();

    let result = planner
        .plan(unit_square(), [obstacle.clone()])
        .expect("plan");

    for cell in result.coverage_grid().cells() {
        if cell.state() == VisitState::Visited {
            assert!(
                result.working_boundary().contains(&cell.centroid()),
                "visited cell outside the boundary"
            );
            assert!(
                !obstacle.contains(&cell.centroid()),
                "visited cell inside the obstacle"
            );
        }
    }
}

#[test]
fn roadmap_stays_in_free_space() {
    let planner = Planner::new(PlanConfig::new(0.11).expect("config"));
    let obstacle = central_obstacle();

    let result = planner
        .plan(unit_square(), [obstacle.clone()])
        .expect("plan");

    assert!(!result.roadmap().is_empty());
    for segment in result.roadmap().segments() {
        assert!(!segment.intersects(&obstacle));
        for coord in &segment.0 {
            assert!(result
                .working_boundary()
                .intersects(&Point::from(*coord)));
        }
    }
}

// A user orientation offset pivots the sweep; consecutive 45° offsets must
// move the travel heading by 45°.
#[test]
fn orientation_offsets_turn_the_lanes() {
    let heading = |offset: f64| {
        let config = PlanConfig::new(0.25)
            .expect("config")
            .with_mbb_orientation_offset(offset)
            .expect("offset");
        Planner::new(config)
            .plan(unit_square(), [])
            .expect("plan")
            .travel_heading()
    };

    let at_45 = heading(45.);
    let at_90 = heading(90.);
    let at_135 = heading(135.);

    for (from, to) in [(at_45, at_90), (at_90, at_135)] {
        let delta = (to - from).rem_euclid(360.);
        assert!(
            (delta - 45.).abs() < 2. || (delta - 315.).abs() < 2.,
            "expected a 45-degree swing, got {delta}"
        );
    }
}

// Two square lobes joined by a corridor two lanes wide; the sweep has to
// funnel through the corridor to reach the far lobe.
#[test]
fn dumbbell_corridor_reaches_both_lobes() {
    let dumbbell: Polygon = polygon![
        (x: 0., y: 0.),
        (x: 0.00001, y: 0.),
        (x: 0.00001, y: 0.00000375),
        (x: 0.00002, y: 0.00000375),
        (x: 0.00002, y: 0.),
        (x: 0.00003, y: 0.),
        (x: 0.00003, y: 0.00001),
        (x: 0.00002, y: 0.00001),
        (x: 0.00002, y: 0.00000625),
        (x: 0.00001, y: 0.00000625),
        (x: 0.00001, y: 0.00001),
        (x: 0., y: 0.00001),
        (x: 0., y: 0.),
    ];
    let planner = Planner::new(PlanConfig::new(0.25).expect("config"));

    let result = planner.plan(dumbbell, []).expect("plan");

    assert!(
        result.coverage_fraction() >= 0.75,
        "coverage: {}",
        result.coverage_fraction()
    );

    // The path never shortcuts through the concave notches.
    let notches: [Polygon; 2] = [
        polygon![
            (x: 0.0000105, y: 0.0000005),
            (x: 0.0000195, y: 0.0000005),
            (x: 0.0000195, y: 0.0000030),
            (x: 0.0000105, y: 0.0000030),
            (x: 0.0000105, y: 0.0000005),
        ],
        polygon![
            (x: 0.0000105, y: 0.0000070),
            (x: 0.0000195, y: 0.0000070),
            (x: 0.0000195, y: 0.0000095),
            (x: 0.0000105, y: 0.0000095),
            (x: 0.0000105, y: 0.0000070),
        ],
    ];
    for notch in &notches {
        assert!(
            !result.mow_path().intersects(notch),
            "mow path cut through a notch"
        );
    }
}

#[test]
fn empty_obstacles_allow_an_empty_roadmap() {
    let planner = Planner::new(PlanConfig::new(0.25).expect("config"));

    let result = planner.plan(unit_square(), []).expect("plan");

    // The sweep must produce a path whether or not the Voronoi skeleton
    // found junctions.
    assert!(!result.mow_path().0.is_empty());
}
