//! Path data codec.
//!
//! Parses the `d` attribute mini-language into absolute [`PathSegment`]s and
//! writes segments back out. Relative commands, implicit command repetition,
//! `H`/`V` shorthands and the smooth `S`/`T` curves are normalized away while
//! parsing, so the in-memory model only ever holds `M`, `L`, `C`, `Q`, `A` and
//! `Z` with absolute coordinates.
//!
//! Parsing never fails. Tokens that cannot be read are skipped and an
//! incomplete argument group is dropped, leaving the best-effort prefix.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use vecshape_core::constants::DEFAULT_DECIMALS;

use crate::model::Point;

/// One absolute step of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum PathSegment {
    #[serde(rename = "M")]
    MoveTo { to: Point },
    #[serde(rename = "L")]
    LineTo { to: Point },
    #[serde(rename = "C")]
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    #[serde(rename = "Q")]
    QuadTo { ctrl: Point, to: Point },
    #[serde(rename = "A")]
    ArcTo {
        rx: f64,
        ry: f64,
        /// x-axis rotation in degrees
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    #[serde(rename = "Z")]
    ClosePath,
}

impl PathSegment {
    /// Command letter used when serializing.
    pub fn command(&self) -> char {
        match self {
            Self::MoveTo { .. } => 'M',
            Self::LineTo { .. } => 'L',
            Self::CubicTo { .. } => 'C',
            Self::QuadTo { .. } => 'Q',
            Self::ArcTo { .. } => 'A',
            Self::ClosePath => 'Z',
        }
    }

    /// The point the pen ends on, `None` for close-path.
    pub fn end_point(&self) -> Option<Point> {
        match self {
            Self::MoveTo { to }
            | Self::LineTo { to }
            | Self::CubicTo { to, .. }
            | Self::QuadTo { to, .. }
            | Self::ArcTo { to, .. } => Some(*to),
            Self::ClosePath => None,
        }
    }

    /// Every positional coordinate of the segment, control points first.
    pub fn points(&self) -> SmallVec<[Point; 3]> {
        match self {
            Self::MoveTo { to } | Self::LineTo { to } | Self::ArcTo { to, .. } => smallvec![*to],
            Self::CubicTo { ctrl1, ctrl2, to } => smallvec![*ctrl1, *ctrl2, *to],
            Self::QuadTo { ctrl, to } => smallvec![*ctrl, *to],
            Self::ClosePath => SmallVec::new(),
        }
    }

    /// Mutable access to the same coordinates, in the same order as [`points`](Self::points).
    pub fn points_mut(&mut self) -> SmallVec<[&mut Point; 3]> {
        match self {
            Self::MoveTo { to } | Self::LineTo { to } | Self::ArcTo { to, .. } => smallvec![to],
            Self::CubicTo { ctrl1, ctrl2, to } => smallvec![ctrl1, ctrl2, to],
            Self::QuadTo { ctrl, to } => smallvec![ctrl, to],
            Self::ClosePath => SmallVec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn is_command(ch: char) -> bool {
    matches!(
        ch,
        'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q' | 'T'
            | 't' | 'A' | 'a' | 'Z' | 'z'
    )
}

/// Number of arguments one repetition of a command consumes.
fn arity(command: char) -> usize {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        _ => 0,
    }
}

/// Split raw path data into command letters and numeric strings.
///
/// Commas and whitespace separate tokens. A sign starts a new number unless it
/// follows an exponent marker, and a second decimal point starts a new number
/// (`0.5.5` -> `0.5`, `.5`).
pub(crate) fn tokenize_numbers(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut seen_dot = false;

    for ch in data.chars() {
        match ch {
            c if is_command(c) => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                seen_dot = false;
                tokens.push(c.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                seen_dot = false;
            }
            '-' | '+' => {
                if !current.is_empty() && !matches!(current.chars().last(), Some('e' | 'E')) {
                    tokens.push(std::mem::take(&mut current));
                    seen_dot = false;
                }
                current.push(ch);
            }
            '.' => {
                if seen_dot {
                    tokens.push(std::mem::take(&mut current));
                }
                seen_dot = true;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn tokenize(data: &str) -> Vec<Token> {
    tokenize_numbers(data)
        .into_iter()
        .filter_map(|raw| {
            let mut chars = raw.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if is_command(c) {
                    return Some(Token::Command(c));
                }
            }
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Some(Token::Number(value)),
                _ => {
                    tracing::debug!(token = %raw, "skipping malformed path token");
                    None
                }
            }
        })
        .collect()
}

/// Running pen state while turning commands into absolute segments.
#[derive(Debug, Default)]
struct PenState {
    current: Point,
    subpath_start: Point,
}

impl PenState {
    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    /// Reflection of the previous curve's trailing control point, or the
    /// current point when the previous segment is not a compatible curve.
    fn reflected_control(&self, previous: Option<&PathSegment>, cubic: bool) -> Point {
        let ctrl = match (previous, cubic) {
            (Some(PathSegment::CubicTo { ctrl2, .. }), true) => Some(*ctrl2),
            (Some(PathSegment::QuadTo { ctrl, .. }), false) => Some(*ctrl),
            _ => None,
        };
        match ctrl {
            Some(c) => Point::new(2.0 * self.current.x - c.x, 2.0 * self.current.y - c.y),
            None => self.current,
        }
    }

    fn apply(&mut self, command: char, args: &[f64], segments: &mut Vec<PathSegment>) {
        let relative = command.is_ascii_lowercase();
        let segment = match command.to_ascii_uppercase() {
            'M' => {
                let to = self.resolve(relative, args[0], args[1]);
                self.subpath_start = to;
                PathSegment::MoveTo { to }
            }
            'L' => PathSegment::LineTo {
                to: self.resolve(relative, args[0], args[1]),
            },
            'H' => {
                let x = if relative { self.current.x + args[0] } else { args[0] };
                PathSegment::LineTo {
                    to: Point::new(x, self.current.y),
                }
            }
            'V' => {
                let y = if relative { self.current.y + args[0] } else { args[0] };
                PathSegment::LineTo {
                    to: Point::new(self.current.x, y),
                }
            }
            'C' => PathSegment::CubicTo {
                ctrl1: self.resolve(relative, args[0], args[1]),
                ctrl2: self.resolve(relative, args[2], args[3]),
                to: self.resolve(relative, args[4], args[5]),
            },
            'S' => PathSegment::CubicTo {
                ctrl1: self.reflected_control(segments.last(), true),
                ctrl2: self.resolve(relative, args[0], args[1]),
                to: self.resolve(relative, args[2], args[3]),
            },
            'Q' => PathSegment::QuadTo {
                ctrl: self.resolve(relative, args[0], args[1]),
                to: self.resolve(relative, args[2], args[3]),
            },
            'T' => PathSegment::QuadTo {
                ctrl: self.reflected_control(segments.last(), false),
                to: self.resolve(relative, args[0], args[1]),
            },
            'A' => PathSegment::ArcTo {
                rx: args[0].abs(),
                ry: args[1].abs(),
                rotation: args[2],
                large_arc: flag(args[3]),
                sweep: flag(args[4]),
                to: self.resolve(relative, args[5], args[6]),
            },
            _ => return,
        };

        if let Some(end) = segment.end_point() {
            self.current = end;
        }
        segments.push(segment);
    }

    fn close(&mut self, segments: &mut Vec<PathSegment>) {
        segments.push(PathSegment::ClosePath);
        self.current = self.subpath_start;
    }
}

fn flag(value: f64) -> bool {
    value.round().clamp(0.0, 1.0) != 0.0
}

/// Parse path data into absolute segments.
pub fn parse(data: &str) -> Vec<PathSegment> {
    let mut pen = PenState::default();
    let mut segments = Vec::new();
    let mut command: Option<char> = None;
    let mut args: SmallVec<[f64; 7]> = SmallVec::new();

    for token in tokenize(data) {
        match token {
            Token::Command(c) => {
                if !args.is_empty() {
                    tracing::debug!(command = ?command, dropped = args.len(), "incomplete path argument group");
                    args.clear();
                }
                if c.eq_ignore_ascii_case(&'z') {
                    pen.close(&mut segments);
                    command = None;
                } else {
                    command = Some(c);
                }
            }
            Token::Number(value) => {
                let Some(c) = command else {
                    tracing::debug!(value, "skipping number without a command");
                    continue;
                };
                args.push(value);
                if args.len() == arity(c) {
                    pen.apply(c, &args, &mut segments);
                    args.clear();
                    // Extra pairs after a moveto are implicit linetos.
                    command = match c {
                        'M' => Some('L'),
                        'm' => Some('l'),
                        other => Some(other),
                    };
                }
            }
        }
    }

    if !args.is_empty() {
        tracing::debug!(command = ?command, dropped = args.len(), "incomplete trailing path argument group");
    }

    segments
}

/// Format a number rounded to `decimals` places, normalizing `-0` to `0`.
pub fn format_number(value: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 || !rounded.is_finite() {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn push_numbers(out: &mut String, values: &[f64], decimals: u32) {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format_number(*v, decimals));
    }
}

/// Serialize segments with the default precision.
pub fn serialize(segments: &[PathSegment]) -> String {
    serialize_with(segments, DEFAULT_DECIMALS)
}

/// Serialize segments, one command letter per segment.
pub fn serialize_with(segments: &[PathSegment], decimals: u32) -> String {
    let mut out = String::new();

    for segment in segments {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push(segment.command());
        match segment {
            PathSegment::MoveTo { to } | PathSegment::LineTo { to } => {
                push_numbers(&mut out, &[to.x, to.y], decimals);
            }
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                push_numbers(
                    &mut out,
                    &[ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y],
                    decimals,
                );
            }
            PathSegment::QuadTo { ctrl, to } => {
                push_numbers(&mut out, &[ctrl.x, ctrl.y, to.x, to.y], decimals);
            }
            PathSegment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
            } => {
                let flags = |b: &bool| if *b { 1.0 } else { 0.0 };
                push_numbers(
                    &mut out,
                    &[
                        *rx,
                        *ry,
                        *rotation,
                        flags(large_arc),
                        flags(sweep),
                        to.x,
                        to.y,
                    ],
                    decimals,
                );
            }
            PathSegment::ClosePath => {}
        }
    }

    out
}
