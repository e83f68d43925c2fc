use proptest::prelude::*;
use svgplot_shapes::geometry::{ArcConversion, CubicBezier, SvgArc, Transform};
use svgplot_shapes::Point;

fn coord() -> impl Strategy<Value = f64> {
    -500.0f64..500.0
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn cubic() -> impl Strategy<Value = CubicBezier> {
    (point(), point(), point(), point()).prop_map(|(a, b, c, d)| CubicBezier::new(a, b, c, d))
}

proptest! {
    #[test]
    fn flattening_density_is_monotonic(curve in cubic(), s1 in 0.1f64..5.0, extra in 0.0f64..5.0) {
        let s2 = s1 + extra;
        let fine = curve.flattened(s1).count();
        let coarse = curve.flattened(s2).count();
        prop_assert!(fine >= coarse, "s1={} gave {}, s2={} gave {}", s1, fine, s2, coarse);
    }

    #[test]
    fn flattening_hits_endpoints_exactly(curve in cubic(), s in 0.1f64..5.0) {
        let points: Vec<Point> = curve.flattened_inclusive(s).collect();
        prop_assert_eq!(points.first().copied(), Some(curve.from));
        prop_assert_eq!(points.last().copied(), Some(curve.to));
    }

    #[test]
    fn identity_transform_is_a_no_op(p in point()) {
        prop_assert_eq!(Transform::IDENTITY.apply(&p), p);
    }
}

#[test]
fn test_half_circle_samples_stay_on_radius() {
    let arc = SvgArc {
        from: Point::new(0.0, 0.0),
        to: Point::new(100.0, 0.0),
        rx: 50.0,
        ry: 50.0,
        x_rotation: 0.0,
        large_arc: false,
        sweep: true,
    };
    let ArcConversion::Cubics(cubics) = arc.to_cubics() else {
        panic!("expected cubics");
    };
    let center = Point::new(50.0, 0.0);
    for cubic in &cubics {
        for p in cubic.flattened_inclusive(0.2) {
            assert!((p.distance_to(&center) - 50.0).abs() < 0.1, "{} off radius", p);
        }
    }
}

#[test]
fn test_rotated_ellipse_arc_endpoints() {
    let arc = SvgArc {
        from: Point::new(0.0, 0.0),
        to: Point::new(30.0, 30.0),
        rx: 40.0,
        ry: 20.0,
        x_rotation: 30.0,
        large_arc: true,
        sweep: false,
    };
    let ArcConversion::Cubics(cubics) = arc.to_cubics() else {
        panic!("expected cubics");
    };
    assert!(cubics.len() <= 4);
    assert_eq!(cubics.first().map(|c| c.from), Some(arc.from));
    assert_eq!(cubics.last().map(|c| c.to), Some(arc.to));
    for pair in cubics.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
}

#[test]
fn test_geometry_serializes_as_plain_fields() {
    let transform = Transform::translate(10.0, -2.5);
    let json = serde_json::to_value(transform).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"a": 1.0, "b": 0.0, "c": 0.0, "d": 1.0, "e": 10.0, "f": -2.5})
    );
    let back: Transform = serde_json::from_value(json).unwrap();
    assert_eq!(back, transform);

    let curve = CubicBezier::from_quadratic(
        Point::new(0.0, 0.0),
        Point::new(3.0, 6.0),
        Point::new(6.0, 0.0),
    );
    let text = serde_json::to_string(&curve).unwrap();
    assert!(text.starts_with(r#"{"from":{"x":0.0,"y":0.0},"ctrl1":"#));
    let back: CubicBezier = serde_json::from_str(&text).unwrap();
    assert_eq!(back, curve);
}
