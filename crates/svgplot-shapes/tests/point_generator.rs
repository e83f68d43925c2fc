use svgplot_shapes::{collect_points, generate_points, Point, Transform, MIN_SMOOTHNESS};

#[test]
fn test_square_scenario() {
    let points: Vec<_> = generate_points("M0,0 L10,0 L10,10 Z", None, 0.2)
        .unwrap()
        .collect();
    assert_eq!(
        points,
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 0.0),
        ]
    );
}

#[test]
fn test_identity_matches_untransformed() {
    let d = "M0,0 C0,30 40,30 40,0 Q60,-20 80,0";
    let plain = collect_points(d, None, 0.2);
    let identity = collect_points(d, Some(Transform::IDENTITY), 0.2);
    assert_eq!(plain, identity);
}

#[test]
fn test_smaller_smoothness_gives_more_points() {
    let d = "M10,50 A40,40 0 1,0 90,50 A40,40 0 1,0 10,50 Z";
    let coarse = collect_points(d, None, 2.0).len();
    let medium = collect_points(d, None, 0.5).len();
    let fine = collect_points(d, None, MIN_SMOOTHNESS).len();
    assert!(coarse <= medium && medium <= fine);
    assert!(fine > coarse);
}

#[test]
fn test_generator_is_lazy_and_resumable() {
    let mut generator = generate_points("M0,0 L1,0 L2,0 L3,0", None, 0.2).unwrap();
    assert_eq!(generator.next(), Some(Point::new(0.0, 0.0)));
    let rest: Vec<_> = generator.collect();
    assert_eq!(rest.len(), 3);
}
