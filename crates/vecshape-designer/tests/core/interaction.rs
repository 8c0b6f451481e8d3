//! Full pointer lifecycles against an in-memory host with a zoomed viewport.

use nalgebra::Matrix3;
use std::cell::Cell;
use std::rc::Rc;
use vecshape_designer::{
    Commit, Element, EngineConfig, Gesture, HandleId, Host, Interaction, Modifiers, Point, PointerCapture,
    Preview, SessionOutcome,
};

struct Document {
    element: Option<Element>,
    transform: Matrix3<f64>,
    captures: Rc<Cell<u32>>,
    last_preview: Option<Preview>,
    refreshes: u32,
}

impl Document {
    fn with(element: Element) -> Self {
        Self {
            element: Some(element),
            // zoom 2, pan (100, 50)
            transform: Matrix3::new(2.0, 0.0, 100.0, 0.0, 2.0, 50.0, 0.0, 0.0, 1.0),
            captures: Rc::new(Cell::new(0)),
            last_preview: None,
            refreshes: 0,
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.element
            .as_ref()
            .and_then(|e| e.attributes.get(name).map(str::to_string))
    }
}

impl Host for Document {
    fn selected_element(&self) -> Option<Element> {
        self.element.clone()
    }

    fn local_to_screen(&self) -> Matrix3<f64> {
        self.transform
    }

    fn capture_pointer(&mut self) -> PointerCapture {
        let captures = self.captures.clone();
        captures.set(captures.get() + 1);
        PointerCapture::new(move || captures.set(captures.get() - 1))
    }

    fn show_preview(&mut self, preview: &Preview) {
        self.last_preview = Some(preview.clone());
    }

    fn commit(&mut self, commit: Commit) {
        if let Some(element) = self.element.take() {
            self.element = Some(commit.apply_to(&element));
        }
    }

    fn restore(&mut self, snapshot: &Element) {
        self.element = Some(snapshot.clone());
    }

    fn refresh_selection(&mut self) {
        self.refreshes += 1;
    }
}

fn circle() -> Element {
    Element::new(
        "circle",
        [("id", "dot"), ("cx", "50"), ("cy", "50"), ("r", "10"), ("fill", "none")]
            .into_iter()
            .collect(),
    )
}

#[test]
fn test_edge_drag_turns_circle_into_ellipse() {
    let mut doc = Document::with(circle());
    let mut interaction = Interaction::new(EngineConfig::default());

    // Screen bbox of the circle is (180, 130) .. (220, 170); east edge at x=220.
    let handles = interaction.handles(&doc);
    let east = handles.iter().find(|h| h.id == HandleId::E).unwrap();
    assert_eq!(east.position, Point::new(220.0, 150.0));

    assert!(interaction.pointer_down(&mut doc, Point::new(220.0, 150.0), Modifiers::none()));
    interaction.pointer_move(&mut doc, Point::new(260.0, 150.0));
    assert!(matches!(doc.last_preview, Some(Preview::Overlay { .. })));

    let outcome = interaction.pointer_up(&mut doc, Point::new(260.0, 150.0)).unwrap();
    assert!(matches!(outcome, SessionOutcome::Commit(Commit::Replace { .. })));
    assert_eq!(doc.element.as_ref().unwrap().tag, "ellipse");
    assert_eq!(doc.attr("id").as_deref(), Some("dot"));
    assert_eq!(doc.attr("cx").as_deref(), Some("60"));
    assert_eq!(doc.attr("rx").as_deref(), Some("20"));
    assert_eq!(doc.attr("ry").as_deref(), Some("10"));
    assert_eq!(doc.captures.get(), 0);
    assert_eq!(doc.refreshes, 1);
}

#[test]
fn test_move_drag_converts_screen_delta_to_local() {
    let mut doc = Document::with(circle());
    let mut interaction = Interaction::new(EngineConfig::default());

    assert!(interaction.pointer_down(&mut doc, Point::new(195.0, 150.0), Modifiers::none()));
    interaction.pointer_up(&mut doc, Point::new(215.0, 140.0));

    assert_eq!(doc.element.as_ref().unwrap().tag, "circle");
    assert_eq!(doc.attr("cx").as_deref(), Some("60"));
    assert_eq!(doc.attr("cy").as_deref(), Some("45"));
    assert_eq!(doc.attr("r").as_deref(), Some("10"));
}

#[test]
fn test_rotate_drag_with_modifier() {
    let rect = Element::new(
        "rect",
        [("x", "0"), ("y", "0"), ("width", "10"), ("height", "10")]
            .into_iter()
            .collect(),
    );
    let mut doc = Document::with(rect);
    doc.transform = Matrix3::identity();
    let mut interaction = Interaction::new(EngineConfig::default());
    let alt = Modifiers {
        alt: true,
        ..Modifiers::none()
    };

    // From the se corner a quarter turn clockwise around (5, 5) lands on sw.
    assert!(interaction.pointer_down(&mut doc, Point::new(10.0, 10.0), alt));
    interaction.pointer_move(&mut doc, Point::new(5.0, 12.0));
    assert!(matches!(doc.last_preview, Some(Preview::Shape { .. })));
    interaction.pointer_up(&mut doc, Point::new(0.0, 10.0));

    let element = doc.element.as_ref().unwrap();
    assert_eq!(element.tag, "polygon");
    assert_eq!(element.attributes.get("points"), Some("10,0 10,10 0,10 0,0"));
    assert!(!element.attributes.contains("width"));
}

#[test]
fn test_no_selection_no_session() {
    let mut doc = Document::with(circle());
    doc.element = None;
    let mut interaction = Interaction::default();
    assert!(!interaction.pointer_down(&mut doc, Point::new(200.0, 150.0), Modifiers::none()));
    assert!(interaction.pointer_up(&mut doc, Point::new(200.0, 150.0)).is_none());
    assert_eq!(doc.captures.get(), 0);
}

fn alt() -> Modifiers {
    Modifiers {
        alt: true,
        ..Modifiers::none()
    }
}

#[test]
fn test_rotate_square_polygon_from_vertex_corner() {
    let polygon = Element::new(
        "polygon",
        [("points", "0,0 10,0 10,10 0,10")].into_iter().collect(),
    );
    let mut doc = Document::with(polygon);
    doc.transform = Matrix3::identity();
    let mut interaction = Interaction::new(EngineConfig::default());

    // The se corner sits on vertex 2; the corner wins while alt is held.
    assert!(interaction.pointer_down(&mut doc, Point::new(10.0, 10.0), alt()));
    assert!(matches!(
        interaction.session().map(|s| s.gesture()),
        Some(Gesture::Rotate)
    ));
    let outcome = interaction.pointer_up(&mut doc, Point::new(0.0, 10.0)).unwrap();
    assert!(outcome.is_commit());
    assert_eq!(doc.attr("points").as_deref(), Some("10,0 10,10 0,10 0,0"));
}

#[test]
fn test_rotate_path_from_vertex_corner() {
    let path = Element::new("path", [("d", "M0 0 L10 0 L10 10 Z")].into_iter().collect());
    let mut doc = Document::with(path);
    doc.transform = Matrix3::identity();
    let mut interaction = Interaction::new(EngineConfig::default());

    assert!(interaction.pointer_down(&mut doc, Point::new(10.0, 10.0), alt()));
    let outcome = interaction.pointer_up(&mut doc, Point::new(0.0, 10.0)).unwrap();
    assert!(outcome.is_commit());
    assert_eq!(doc.attr("d").as_deref(), Some("M10 0 L10 10 L0 10 Z"));
}

#[test]
fn test_line_corner_scales_without_modifier() {
    let line = Element::new(
        "line",
        [("x1", "0"), ("y1", "0"), ("x2", "100"), ("y2", "50")]
            .into_iter()
            .collect(),
    );
    let mut doc = Document::with(line);
    doc.transform = Matrix3::identity();
    let mut interaction = Interaction::new(EngineConfig::default());

    assert!(interaction.pointer_down(&mut doc, Point::new(100.0, 50.0), Modifiers::none()));
    assert!(matches!(
        interaction.session().map(|s| s.gesture()),
        Some(Gesture::Scale { handle: HandleId::SE, .. })
    ));
    interaction.pointer_up(&mut doc, Point::new(200.0, 100.0));
    assert_eq!(doc.attr("x2").as_deref(), Some("200"));
    assert_eq!(doc.attr("y2").as_deref(), Some("100"));
}
