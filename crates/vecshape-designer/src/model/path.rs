use lyon::geom::{
    point as lpoint, vector as lvector, Angle, ArcFlags, CubicBezierSegment,
    QuadraticBezierSegment, SvgArc,
};
use serde::{Deserialize, Serialize};

use super::{BoundingBox, Local, Point, Primitive};
use crate::element::AttributeBag;
use crate::path_codec::{self, PathSegment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub segments: Vec<PathSegment>,
}

impl PathShape {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn from_data(d: &str) -> Self {
        Self::new(path_codec::parse(d))
    }

    pub fn to_data(&self, decimals: u32) -> String {
        path_codec::serialize_with(&self.segments, decimals)
    }

    /// Closed outline of an axis-aligned ellipse made of two half arcs,
    /// starting at the leftmost point.
    pub fn ellipse_outline(center: Point, rx: f64, ry: f64) -> Self {
        let left = Point::new(center.x - rx, center.y);
        let right = Point::new(center.x + rx, center.y);
        let arc = |to| PathSegment::ArcTo {
            rx,
            ry,
            rotation: 0.0,
            large_arc: true,
            sweep: false,
            to,
        };
        Self::new(vec![
            PathSegment::MoveTo { to: left },
            arc(right),
            arc(left),
            PathSegment::ClosePath,
        ])
    }

    pub(crate) fn arcs_finite(&self) -> bool {
        self.segments.iter().all(|s| match s {
            PathSegment::ArcTo {
                rx, ry, rotation, ..
            } => rx.is_finite() && ry.is_finite() && rotation.is_finite(),
            _ => true,
        })
    }
}

impl Primitive for PathShape {
    fn tag(&self) -> &str {
        "path"
    }

    fn control_points(&self) -> Vec<Point> {
        self.segments.iter().flat_map(|s| s.points()).collect()
    }

    fn set_control_points(&mut self, points: &[Point]) {
        let mut source = points.iter();
        for segment in &mut self.segments {
            for target in segment.points_mut() {
                match source.next() {
                    Some(p) => *target = *p,
                    None => return,
                }
            }
        }
    }

    fn scale_extents(&mut self, sx: f64, sy: f64) {
        for segment in &mut self.segments {
            if let PathSegment::ArcTo { rx, ry, .. } = segment {
                *rx = (*rx * sx).abs();
                *ry = (*ry * sy).abs();
            }
        }
    }

    fn rotate_extents(&mut self, degrees: f64) {
        for segment in &mut self.segments {
            if let PathSegment::ArcTo { rotation, .. } = segment {
                *rotation = (*rotation + degrees).rem_euclid(360.0);
            }
        }
    }

    /// Tight bounds including curve and arc extrema.
    fn bounds(&self) -> Option<BoundingBox<Local>> {
        let mut current = Point::default();
        let mut subpath_start = Point::default();
        let mut extents: Option<BoundingBox<Local>> = None;

        let mut include = |bb: BoundingBox<Local>| {
            extents = Some(match extents {
                Some(acc) => acc.union(&bb),
                None => bb,
            });
        };
        let lp = |p: Point| lpoint(p.x, p.y);

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo { to } => {
                    include(BoundingBox::new(to.x, to.y, 0.0, 0.0));
                    subpath_start = to;
                }
                PathSegment::LineTo { to } => {
                    include(BoundingBox::new(to.x, to.y, 0.0, 0.0));
                }
                PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                    let bb = CubicBezierSegment {
                        from: lp(current),
                        ctrl1: lp(ctrl1),
                        ctrl2: lp(ctrl2),
                        to: lp(to),
                    }
                    .bounding_box();
                    include(BoundingBox::from_extents(bb.min.x, bb.min.y, bb.max.x, bb.max.y));
                }
                PathSegment::QuadTo { ctrl, to } => {
                    let bb = QuadraticBezierSegment {
                        from: lp(current),
                        ctrl: lp(ctrl),
                        to: lp(to),
                    }
                    .bounding_box();
                    include(BoundingBox::from_extents(bb.min.x, bb.min.y, bb.max.x, bb.max.y));
                }
                PathSegment::ArcTo {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let arc = SvgArc {
                        from: lp(current),
                        to: lp(to),
                        radii: lvector(rx, ry),
                        x_rotation: Angle::degrees(rotation),
                        flags: ArcFlags { large_arc, sweep },
                    };
                    if arc.is_straight_line() {
                        include(BoundingBox::from_points([current, to]).unwrap_or_else(|| {
                            BoundingBox::new(to.x, to.y, 0.0, 0.0)
                        }));
                    } else {
                        let bb = arc.to_arc().bounding_box();
                        include(BoundingBox::from_extents(bb.min.x, bb.min.y, bb.max.x, bb.max.y));
                    }
                }
                PathSegment::ClosePath => {
                    current = subpath_start;
                    continue;
                }
            }
            if let Some(end) = segment.end_point() {
                current = end;
            }
        }

        extents
    }

    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32) {
        attrs.set("d", self.to_data(decimals));
    }
}
