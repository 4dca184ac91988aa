use super::*;
use geo::Contains;

#[test]
fn one_cell_per_site() {
    let seeds = vec![
        Point::new(0., 0.),
        Point::new(0.00001, 0.),
        Point::new(0.000005, 0.00001),
        Point::new(0.000005, 0.000005),
    ];

    let cells = cells_for(&seeds).expect("cells");

    assert_eq!(cells.len(), seeds.len());
}

#[test]
fn cells_contain_their_site() {
    let seeds = vec![
        Point::new(0., 0.),
        Point::new(0.00001, 0.),
        Point::new(0.00001, 0.00001),
        Point::new(0., 0.00001),
        Point::new(0.000005, 0.000005),
    ];

    let cells = cells_for(&seeds).expect("cells");

    // Cells and faces come back in site insertion order.
    let mut contained = 0;
    for cell in &cells {
        if seeds.iter().any(|seed| cell.contains(seed)) {
            contained += 1;
        }
    }
    assert_eq!(contained, cells.len());
}

#[test]
fn collinear_sites_are_rejected() {
    let seeds = vec![
        Point::new(0., 0.),
        Point::new(0.000005, 0.),
        Point::new(0.00001, 0.),
    ];

    assert_eq!(cells_for(&seeds), Err(VoronoiFailure::CollinearSites));
}

#[test]
fn too_few_sites_are_rejected() {
    let seeds = vec![Point::new(0., 0.), Point::new(0.00001, 0.)];

    assert_eq!(cells_for(&seeds), Err(VoronoiFailure::TooFewSites));
}
