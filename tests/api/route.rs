use geo::{polygon, BooleanOps, BoundingRect, Intersects, MultiPolygon, Point, Polygon, Rect};
use swath::{error::RouteError, PlanConfig, Planner, Roadmap};

fn square() -> Polygon {
    polygon![
        (x: 0., y: 0.),
        (x: 0.00001, y: 0.),
        (x: 0.00001, y: 0.00001),
        (x: 0., y: 0.00001),
        (x: 0., y: 0.),
    ]
}

fn central_obstacle() -> Polygon {
    polygon![
        (x: 0.000004, y: 0.000004),
        (x: 0.000006, y: 0.000004),
        (x: 0.000006, y: 0.000006),
        (x: 0.000004, y: 0.000006),
        (x: 0.000004, y: 0.000004),
    ]
}

// Outside world plus obstacles, as one forbidden multipolygon.
fn forbidden(boundary: &Polygon, obstacles: &[Polygon]) -> MultiPolygon {
    let rect = boundary.bounding_rect().expect("bounding rect");
    let padding = rect.width().max(rect.height());
    let outside = Rect::new(
        (rect.min().x - padding, rect.min().y - padding),
        (rect.max().x + padding, rect.max().y + padding),
    );

    let mut region = outside.to_polygon().difference(boundary);
    region.0.extend(obstacles.iter().cloned());
    region
}

#[test]
fn direct_route_when_nothing_blocks() {
    let roadmap = Roadmap::default();
    let region = forbidden(&square(), &[]);

    let start = Point::new(0.000002, 0.000002);
    let end = Point::new(0.000008, 0.000008);
    let path = roadmap.clear_path(start, end, &region).expect("path");

    assert_eq!(path.0.len(), 2);
}

#[test]
fn empty_roadmap_cannot_bypass() {
    let obstacle = central_obstacle();
    let region = forbidden(&square(), std::slice::from_ref(&obstacle));

    let start = Point::new(0.000002, 0.000005);
    let end = Point::new(0.000008, 0.000005);
    let result = Roadmap::default().clear_path(start, end, &region);

    assert_eq!(result.unwrap_err(), RouteError::EmptyRoadmap);
}

#[test]
fn planned_roadmap_routes_around_the_obstacle() {
    let obstacle = central_obstacle();
    let planner = Planner::new(PlanConfig::new(0.11).expect("config"));
    let result = planner
        .plan(square(), [obstacle.clone()])
        .expect("plan");

    let region = forbidden(
        result.working_boundary(),
        result.working_obstacles(),
    );

    let start = Point::new(0.000002, 0.000005);
    let end = Point::new(0.000008, 0.000005);
    let path = result
        .roadmap()
        .clear_path(start, end, &region)
        .expect("path");

    assert_eq!(path.0[0], start.0);
    assert_eq!(*path.0.last().expect("path"), end.0);
    for segment in path.lines() {
        assert!(
            !segment.intersects(&region),
            "{segment:?} crosses the forbidden region"
        );
    }
}
