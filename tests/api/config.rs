use swath::{PlanConfig, StartCorner};

#[test]
fn lane_width_bounds() {
    assert!(PlanConfig::new(0.2).is_ok());
    assert!(PlanConfig::new(0.1).is_err(), "0.1 m is the exclusive floor");
    assert!(PlanConfig::new(f64::INFINITY).is_err());
}

#[test]
fn builder_chain() {
    let config = PlanConfig::new(0.25)
        .expect("lane width")
        .with_obstacle_margin(0.5)
        .expect("margin")
        .with_mbb_orientation_offset(90.)
        .expect("offset")
        .with_start_corner(StartCorner::Three);

    assert_eq!(config.lane_width(), 0.25);
    assert_eq!(config.obstacle_margin(), 0.5);
    assert_eq!(config.mbb_orientation_offset(), 90.);
    assert_eq!(config.start_corner(), StartCorner::Three);
}

#[test]
fn start_corner_parsing() {
    assert_eq!(StartCorner::try_from(0).expect("corner"), StartCorner::Zero);
    assert_eq!(
        StartCorner::try_from(3).expect("corner"),
        StartCorner::Three
    );
    assert!(StartCorner::try_from(4).is_err());
    assert_eq!(StartCorner::Two.to_string(), "2");
}

#[test]
fn default_start_corner_is_zero() {
    let config = PlanConfig::new(0.25).expect("config");

    assert_eq!(config.start_corner(), StartCorner::default());
    assert_eq!(config.start_corner(), StartCorner::Zero);
}
