use proptest::prelude::*;
use vecshape_designer::operations::{self, AxisMap};
use vecshape_designer::path_codec::{parse, serialize, PathSegment};
use vecshape_designer::{
    BoundingBox, CircleShape, EllipseShape, LineShape, Local, PathShape, Point, PolyShape,
    Primitive, RectShape, Shape,
};

fn coord() -> impl Strategy<Value = f64> {
    (-1_000_000i32..1_000_000).prop_map(|k| k as f64 / 1000.0)
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        point().prop_map(|to| PathSegment::LineTo { to }),
        (point(), point(), point()).prop_map(|(ctrl1, ctrl2, to)| PathSegment::CubicTo { ctrl1, ctrl2, to }),
        (point(), point()).prop_map(|(ctrl, to)| PathSegment::QuadTo { ctrl, to }),
        (1u32..500, 1u32..500, 0u32..360, any::<bool>(), any::<bool>(), point()).prop_map(
            |(rx, ry, rotation, large_arc, sweep, to)| PathSegment::ArcTo {
                rx: rx as f64,
                ry: ry as f64,
                rotation: rotation as f64,
                large_arc,
                sweep,
                to,
            }
        ),
        Just(PathSegment::ClosePath),
    ]
}

fn path_data() -> impl Strategy<Value = Vec<PathSegment>> {
    (point(), prop::collection::vec(segment(), 0..12)).prop_map(|(start, rest)| {
        let mut segments = vec![PathSegment::MoveTo { to: start }];
        segments.extend(rest);
        segments
    })
}

fn polygon() -> impl Strategy<Value = Shape> {
    prop::collection::vec(point(), 3..10).prop_map(|pts| Shape::Polygon(PolyShape::new(pts)))
}

fn small_point() -> impl Strategy<Value = Point> {
    (-200_000i32..200_000, -200_000i32..200_000)
        .prop_map(|(x, y)| Point::new(x as f64 / 1000.0, y as f64 / 1000.0))
}

/// Paths whose arcs are axis aligned, so an axis scale keeps them arcs.
fn scalable_path() -> impl Strategy<Value = Shape> {
    let segment = prop_oneof![
        small_point().prop_map(|to| PathSegment::LineTo { to }),
        (small_point(), small_point(), small_point())
            .prop_map(|(ctrl1, ctrl2, to)| PathSegment::CubicTo { ctrl1, ctrl2, to }),
        (small_point(), small_point()).prop_map(|(ctrl, to)| PathSegment::QuadTo { ctrl, to }),
        (1u32..300, 1u32..300, any::<bool>(), any::<bool>(), small_point()).prop_map(
            |(rx, ry, large_arc, sweep, to)| PathSegment::ArcTo {
                rx: rx as f64,
                ry: ry as f64,
                rotation: 0.0,
                large_arc,
                sweep,
                to,
            }
        ),
    ];
    (small_point(), prop::collection::vec(segment, 1..8)).prop_map(|(start, rest)| {
        let mut segments = vec![PathSegment::MoveTo { to: start }];
        segments.extend(rest);
        Shape::Path(PathShape::new(segments))
    })
}

fn line() -> impl Strategy<Value = Shape> {
    (point(), point()).prop_map(|(a, b)| Shape::Line(LineShape::new(a, b)))
}

fn polyline() -> impl Strategy<Value = Shape> {
    prop::collection::vec(point(), 2..10).prop_map(|pts| Shape::Polyline(PolyShape::new(pts)))
}

fn any_shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        (coord(), coord(), 0.0f64..500.0, 0.0f64..500.0)
            .prop_map(|(x, y, w, h)| Shape::Rect(RectShape::new(x, y, w, h))),
        (point(), 0.0f64..500.0).prop_map(|(c, r)| Shape::Circle(CircleShape::new(c, r))),
        (point(), 0.0f64..500.0, 0.0f64..500.0)
            .prop_map(|(c, rx, ry)| Shape::Ellipse(EllipseShape::new(c, rx, ry))),
        line(),
        polyline(),
        polygon(),
        path_data().prop_map(|segments| Shape::Path(PathShape::new(segments))),
    ]
}

fn target_box() -> impl Strategy<Value = BoundingBox<Local>> {
    (coord(), coord(), 1.0f64..500.0, 1.0f64..500.0)
        .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
}

fn scales_onto(shape: &Shape, target: &BoundingBox<Local>, eps: f64) -> Result<(), TestCaseError> {
    let bb = shape.bounds().unwrap();
    prop_assume!(bb.width > 1.0 && bb.height > 1.0);
    let scaled = operations::scale_to(shape, target, 1e-6).unwrap();
    prop_assert_eq!(scaled.kind(), shape.kind());
    let got = scaled.bounds().unwrap();
    prop_assert!(got.approx_eq(target, eps), "{:?} != {:?}", got, target);
    Ok(())
}

fn segments_close(a: &[PathSegment], b: &[PathSegment], eps: f64) -> bool {
    let close = |x: f64, y: f64| (x - y).abs() <= eps;
    a.len() == b.len()
        && a.iter().zip(b).all(|(s, t)| match (s, t) {
            (
                PathSegment::ArcTo { rx, ry, rotation, large_arc, sweep, to },
                PathSegment::ArcTo {
                    rx: rx2,
                    ry: ry2,
                    rotation: rotation2,
                    large_arc: large_arc2,
                    sweep: sweep2,
                    to: to2,
                },
            ) => {
                let turn = (rotation - rotation2).rem_euclid(360.0);
                close(*rx, *rx2)
                    && close(*ry, *ry2)
                    && (turn <= eps || 360.0 - turn <= eps)
                    && large_arc == large_arc2
                    && sweep == sweep2
                    && to.approx_eq(to2, eps)
            }
            _ => s.command() == t.command() && points_close(&s.points(), &t.points(), eps),
        })
}

fn points_close(a: &[Point], b: &[Point], eps: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.approx_eq(q, eps))
}

proptest! {
    #[test]
    fn prop_serialize_parse_is_stable(segments in path_data()) {
        let text = serialize(&segments);
        prop_assert_eq!(serialize(&parse(&text)), text.clone());
        prop_assert!(segments_close(&parse(&text), &segments, 1e-3));
    }

    #[test]
    fn prop_zero_translation_is_identity(shape in any_shape()) {
        prop_assert_eq!(operations::translate(&shape, 0.0, 0.0).unwrap(), shape);
    }

    #[test]
    fn prop_line_scale_hits_target(shape in line(), target in target_box()) {
        scales_onto(&shape, &target, 1e-6)?;
    }

    #[test]
    fn prop_polyline_scale_hits_target(shape in polyline(), target in target_box()) {
        scales_onto(&shape, &target, 1e-6)?;
    }

    #[test]
    fn prop_polygon_scale_hits_target(shape in polygon(), target in target_box()) {
        scales_onto(&shape, &target, 1e-6)?;
    }

    #[test]
    fn prop_curved_path_scale_hits_target(shape in scalable_path(), target in target_box()) {
        scales_onto(&shape, &target, 1e-4)?;
    }

    #[test]
    fn prop_line_rotation_inverse(shape in line(), degrees in -180.0f64..180.0) {
        let center = Point::new(-7.0, 40.0);
        let there = operations::rotate(&shape, center, degrees).unwrap();
        prop_assert!(matches!(there, Shape::Line(_)));
        let back = operations::rotate(&there, center, -degrees).unwrap();
        prop_assert!(points_close(&back.control_points(), &shape.control_points(), 1e-6));
    }

    #[test]
    fn prop_path_rotation_inverse(segments in path_data(), degrees in -180.0f64..180.0) {
        let shape = Shape::Path(PathShape::new(segments));
        let center = Point::new(3.0, -9.5);
        let there = operations::rotate(&shape, center, degrees).unwrap();
        let back = operations::rotate(&there, center, -degrees).unwrap();
        let (Shape::Path(back), Shape::Path(original)) = (&back, &shape) else {
            return Err(TestCaseError::fail("path changed kind"));
        };
        prop_assert!(segments_close(&back.segments, &original.segments, 1e-6));
    }

    #[test]
    fn prop_identity_scale_is_noop(shape in polygon()) {
        let bb = shape.bounds().unwrap();
        let scaled = operations::scale_to(&shape, &bb, 1e-6).unwrap();
        prop_assert!(points_close(&scaled.control_points(), &shape.control_points(), 1e-9));
    }

    #[test]
    fn prop_rotation_inverse(shape in polygon(), degrees in -180.0f64..180.0) {
        let center = Point::new(12.5, -3.0);
        let there = operations::rotate(&shape, center, degrees).unwrap();
        let back = operations::rotate(&there, center, -degrees).unwrap();
        prop_assert!(points_close(&back.control_points(), &shape.control_points(), 1e-6));
    }

    #[test]
    fn prop_rect_scale_hits_target(
        x in coord(), y in coord(), w in 1.0f64..500.0, h in 1.0f64..500.0,
        tx in coord(), ty in coord(), tw in 1.0f64..500.0, th in 1.0f64..500.0,
    ) {
        let rect = Shape::Rect(RectShape::new(x, y, w, h));
        let target: BoundingBox<Local> = BoundingBox::new(tx, ty, tw, th);
        let scaled = operations::scale_to(&rect, &target, 1e-6).unwrap();
        prop_assert!(scaled.bounds().unwrap().approx_eq(&target, 1e-6));
    }

    #[test]
    fn prop_anisotropic_scale_maps_bbox(shape in polygon(), sx in 0.1f64..10.0, sy in 0.1f64..10.0) {
        let bb = shape.bounds().unwrap();
        prop_assume!(bb.width > 1e-3 && bb.height > 1e-3);
        let pivot = Point::new(bb.x, bb.y);
        let scaled = operations::scale(&shape, &AxisMap::about(pivot, sx, sy), 1e-6).unwrap();
        let expected: BoundingBox<Local> = BoundingBox::new(bb.x, bb.y, bb.width * sx, bb.height * sy);
        prop_assert!(scaled.bounds().unwrap().approx_eq(&expected, 1e-6));
    }

    #[test]
    fn prop_arc_rotation_increments(rotation in 0u32..360, degrees in -720.0f64..720.0) {
        let d = format!("M0 0 A10 5 {} 0 1 20 0", rotation);
        let path = Shape::Path(PathShape::from_data(&d));
        let rotated = operations::rotate(&path, Point::new(0.0, 0.0), degrees).unwrap();
        let Shape::Path(rotated) = rotated else {
            return Err(TestCaseError::fail("path changed kind"));
        };
        let PathSegment::ArcTo { rotation: after, .. } = rotated.segments[1] else {
            return Err(TestCaseError::fail("arc segment missing"));
        };
        let expected = (rotation as f64 + degrees).rem_euclid(360.0);
        let diff = (after - expected).abs();
        prop_assert!(diff < 1e-9 || (360.0 - diff) < 1e-9);
    }
}
