use vecshape_designer::operations::{self, AxisMap};
use vecshape_designer::{
    BoundingBox, CoordinateMapper, EllipseShape, HandleId, LineShape, Local, PathShape, Point,
    PolyShape, Primitive, RectShape, Screen, Shape, TransformError,
};

#[test]
fn test_move_translates_every_point() {
    let poly = Shape::Polygon(PolyShape::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(5.0, 8.0),
    ]));
    let moved = operations::translate(&poly, 3.0, -2.0).unwrap();
    assert_eq!(
        moved.control_points(),
        vec![Point::new(3.0, -2.0), Point::new(13.0, -2.0), Point::new(8.0, 6.0)]
    );
}

#[test]
fn test_scale_path_scales_arc_radii() {
    let path = Shape::Path(PathShape::from_data("M0 0 A5 5 0 0 1 10 0"));
    let scaled = operations::scale(&path, &AxisMap::about(Point::new(0.0, 0.0), 2.0, 3.0), 1e-6).unwrap();
    let Shape::Path(path) = scaled else {
        panic!("expected path");
    };
    assert_eq!(path.to_data(3), "M0 0 A10 15 0 0 1 20 0");
}

#[test]
fn test_rotate_ellipse_becomes_arc_path() {
    let ellipse = Shape::Ellipse(EllipseShape::new(Point::new(0.0, 0.0), 4.0, 2.0));
    let rotated = operations::rotate(&ellipse, Point::new(0.0, 0.0), 90.0).unwrap();
    let Shape::Path(path) = rotated else {
        panic!("expected path");
    };
    assert_eq!(path.to_data(3), "M0 -4 A4 2 90 1 0 0 4 A4 2 90 1 0 0 -4 Z");
    let bb = path.bounds().unwrap();
    assert!(bb.approx_eq(&BoundingBox::new(-2.0, -4.0, 4.0, 8.0), 1e-6));
}

#[test]
fn test_line_scale_along_one_axis() {
    let line = Shape::Line(LineShape::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0)));
    let target: BoundingBox<Local> = BoundingBox::new(0.0, 5.0, 30.0, 0.0);
    let scaled = operations::scale_to(&line, &target, 1e-6).unwrap();
    assert_eq!(
        scaled,
        Shape::Line(LineShape::new(Point::new(0.0, 5.0), Point::new(30.0, 5.0)))
    );

    let tall: BoundingBox<Local> = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(matches!(
        operations::scale_to(&line, &tall, 1e-6),
        Err(TransformError::DegenerateExtent { .. })
    ));
}

#[test]
fn test_rect_radii_follow_scale() {
    let rect = Shape::Rect(RectShape::new(0.0, 0.0, 10.0, 10.0).with_radii(Some(1.0), Some(2.0)));
    let scaled = operations::scale(&rect, &AxisMap::about(Point::new(0.0, 0.0), 3.0, 2.0), 1e-6).unwrap();
    let Shape::Rect(r) = scaled else {
        panic!("expected rect");
    };
    assert_eq!((r.rx, r.ry), (Some(3.0), Some(4.0)));
    assert_eq!((r.width, r.height), (30.0, 20.0));
}

#[test]
fn test_compute_bbox_through_zoom() {
    let mapper = CoordinateMapper::zoom_pan(2.0, 10.0, 10.0).unwrap();
    let rect = Shape::Rect(RectShape::new(0.0, 0.0, 10.0, 5.0));
    let bb = operations::compute_bbox(&rect, &mapper).unwrap();
    assert_eq!(bb, BoundingBox::<Screen>::new(10.0, 10.0, 20.0, 10.0));
}

#[test]
fn test_target_bbox_move_handle_translates() {
    let start: BoundingBox<Screen> = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
    let bb = operations::target_bbox(&start, HandleId::Move, 5.0, 7.0, 10.0, false);
    assert_eq!(bb, BoundingBox::new(5.0, 7.0, 20.0, 20.0));
}

#[test]
fn test_target_bbox_cannot_flip() {
    let start: BoundingBox<Screen> = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
    let bb = operations::target_bbox(&start, HandleId::N, 0.0, 200.0, 10.0, false);
    assert_eq!(bb, BoundingBox::new(0.0, 40.0, 50.0, 10.0));
}

#[test]
fn test_move_path_control_point() {
    let path = Shape::Path(PathShape::from_data("M0 0 Q5 5 10 0"));
    let edited = operations::move_control_point(&path, 1, Point::new(5.0, -5.0)).unwrap();
    let Shape::Path(path) = edited else {
        panic!("expected path");
    };
    assert_eq!(path.to_data(3), "M0 0 Q5 -5 10 0");
}
