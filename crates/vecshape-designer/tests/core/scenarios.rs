//! End-to-end behaviour of the documented drag scenarios.

use vecshape_designer::{
    operations, AttributeBag, BoundingBox, CircleShape, Commit, CoordinateMapper, Element,
    EngineConfig, Handle, HandleId, Modifiers, PathShape, Point, Primitive, SessionOutcome, Shape,
    TransformSession,
};
use vecshape_designer::{AbortReason, Local};

fn element(tag: &str, attrs: &[(&str, &str)]) -> Element {
    Element::new(tag, attrs.iter().copied().collect::<AttributeBag>())
}

#[test]
fn test_rect_scaled_to_target_bbox() {
    let original = element("rect", &[("x", "10"), ("y", "10"), ("width", "20"), ("height", "10")]);
    let shape = Shape::from_element(&original);
    let target: BoundingBox<Local> = BoundingBox::new(0.0, 0.0, 40.0, 20.0);

    let scaled = operations::scale_to(&shape, &target, 1e-6).unwrap();
    let Commit::Attributes { attributes } = scaled.commit_against(&original, 3) else {
        panic!("rect should stay a rect");
    };
    assert_eq!(attributes.get("x"), Some("0"));
    assert_eq!(attributes.get("y"), Some("0"));
    assert_eq!(attributes.get("width"), Some("40"));
    assert_eq!(attributes.get("height"), Some("20"));
}

#[test]
fn test_circle_anisotropic_scale_becomes_ellipse() {
    let original = element("circle", &[("cx", "50"), ("cy", "50"), ("r", "10")]);
    let shape = Shape::from_element(&original);
    let map = operations::AxisMap::about(Point::new(50.0, 50.0), 2.0, 1.0);

    let scaled = operations::scale(&shape, &map, 1e-6).unwrap();
    let Commit::Replace { element } = scaled.commit_against(&original, 3) else {
        panic!("circle should morph");
    };
    assert_eq!(element.tag, "ellipse");
    assert_eq!(element.attributes.get("cx"), Some("50"));
    assert_eq!(element.attributes.get("cy"), Some("50"));
    assert_eq!(element.attributes.get("rx"), Some("20"));
    assert_eq!(element.attributes.get("ry"), Some("10"));
    assert!(!element.attributes.contains("r"));
}

#[test]
fn test_path_quarter_turn_about_center() {
    let shape = Shape::Path(PathShape::from_data("M0 0 L10 0 L10 10 Z"));
    let rotated = operations::rotate(&shape, Point::new(5.0, 5.0), 90.0).unwrap();
    let Shape::Path(path) = rotated else {
        panic!("path should stay a path");
    };
    assert_eq!(path.to_data(3), "M10 0 L10 10 L0 10 Z");
}

#[test]
fn test_negligible_rotation_leaves_element_untouched() {
    let original = element(
        "rect",
        &[("id", "box"), ("x", "0.10000"), ("y", "0"), ("width", "100"), ("height", "100")],
    );
    let config = EngineConfig::default();
    let mapper = CoordinateMapper::identity();
    let corner = Handle::new(HandleId::SE, Point::new(100.1, 100.0));
    let alt = Modifiers {
        alt: true,
        ..Modifiers::none()
    };

    let mut session = TransformSession::begin(original.clone(), corner, corner.position, alt, &mapper, &config);
    // Pointer goes around and comes back within a hair of the start angle.
    session.update(Point::new(0.0, 100.0), &mapper).unwrap();
    let outcome = session.finish(Point::new(100.1, 100.000_000_1), &mapper);

    assert_eq!(
        outcome,
        SessionOutcome::Abort {
            snapshot: original.clone(),
            reason: AbortReason::NegligibleRotation
        }
    );
}

#[test]
fn test_unknown_element_is_inert() {
    let original = element("text", &[("x", "5"), ("y", "5")]);
    let shape = Shape::from_element(&original);
    assert!(shape.is_inert());
    assert!(shape.bounds().is_none());
    let moved = operations::translate(&shape, 10.0, 10.0).unwrap();
    assert_eq!(moved.commit_against(&original, 3).apply_to(&original), original);
}

#[test]
fn test_uniform_circle_scale_keeps_circle() {
    let shape = Shape::Circle(CircleShape::new(Point::new(0.0, 0.0), 5.0));
    let target: BoundingBox<Local> = BoundingBox::new(-10.0, -10.0, 20.0, 20.0);
    let scaled = operations::scale_to(&shape, &target, 1e-6).unwrap();
    assert_eq!(scaled, Shape::Circle(CircleShape::new(Point::new(0.0, 0.0), 10.0)));
}
