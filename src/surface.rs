//! Concrete [`DrawingSurface`] implementations.
//!
//! [`SvgCanvas`] collects line segments and renders them as an SVG document.
//! [`RecordingSurface`] logs every call it receives, which makes the interpreter's
//! output easy to inspect.

use crate::color::Rgb;
use crate::error::Result;
use crate::turtle::{DrawingSurface, TurtleState};
use glam::Vec2;
use log::info;
use std::fmt::Write as _;
use std::path::Path;

/// A drawn line with the pen color it was drawn in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Rgb,
}

/// Vector canvas that renders to SVG.
///
/// Headings are in degrees, 0° points along `+X`, and turning right decreases
/// the heading. The y axis is flipped on output so that "up" is up.
#[derive(Clone, Debug)]
pub struct SvgCanvas {
    state: TurtleState,
    pen_down: bool,
    /// Channel range of the pen colors it receives (`1.0` or `255.0`).
    pub color_mode: f32,
    pub stroke_width: f32,
    /// Blank border around the drawing, in surface units.
    pub margin: f32,
    segments: Vec<Segment>,
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self {
            state: TurtleState::default(),
            pen_down: true,
            color_mode: 255.0,
            stroke_width: 1.0,
            margin: 10.0,
            segments: Vec::new(),
        }
    }
}

impl SvgCanvas {
    /// Empty canvas at the origin, heading along `+X`, black pen down.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything drawn so far, in drawing order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether moves currently draw.
    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    fn line_to(&mut self, to: Vec2) {
        let from = self.state.position;
        if self.pen_down && from != to {
            self.segments.push(Segment {
                from,
                to,
                color: self.state.pen_color,
            });
        }
        self.state.position = to;
    }

    /// Axis-aligned bounds of everything drawn, as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        self.segments.iter().fold(None, |acc, s| {
            let lo = s.from.min(s.to);
            let hi = s.from.max(s.to);
            Some(match acc {
                Some((min, max)) => (min.min(lo), max.max(hi)),
                None => (lo, hi),
            })
        })
    }

    /// Renders the drawing. Connected runs of same-colored segments become one
    /// `<polyline>`.
    pub fn to_svg(&self) -> String {
        let (min, max) = self.bounds().unwrap_or((Vec2::ZERO, Vec2::ZERO));
        let m = self.margin;
        let (x, y) = (min.x - m, -max.y - m);
        let (w, h) = (max.x - min.x + 2.0 * m, max.y - min.y + 2.0 * m);

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" width="{w}" height="{h}">"#
        );
        let _ = writeln!(out, r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="white"/>"#);

        let mut run: Vec<Vec2> = Vec::new();
        let mut run_color = Rgb::BLACK;
        for seg in &self.segments {
            let continues = run.last() == Some(&seg.from) && run_color == seg.color;
            if !continues {
                self.write_polyline(&mut out, &run, run_color);
                run.clear();
                run.push(seg.from);
                run_color = seg.color;
            }
            run.push(seg.to);
        }
        self.write_polyline(&mut out, &run, run_color);

        out.push_str("</svg>\n");
        out
    }

    fn write_polyline(&self, out: &mut String, points: &[Vec2], color: Rgb) {
        if points.len() < 2 {
            return;
        }
        let coords = points
            .iter()
            .map(|p| format!("{},{}", p.x, -p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            out,
            r#"<polyline points="{coords}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
            color.to_hex(self.color_mode),
            self.stroke_width
        );
    }

    /// Writes the rendered SVG to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg())?;
        info!(
            "wrote {} segments to {}",
            self.segments.len(),
            path.display()
        );
        Ok(())
    }
}

impl DrawingSurface for SvgCanvas {
    fn move_forward(&mut self, length: f32) {
        let to = self.state.position + self.state.direction() * length;
        self.line_to(to);
    }

    fn turn_right(&mut self, angle: f32) {
        self.state.heading = (self.state.heading - angle).rem_euclid(360.0);
    }

    fn turn_left(&mut self, angle: f32) {
        self.state.heading = (self.state.heading + angle).rem_euclid(360.0);
    }

    fn pen_up(&mut self) {
        self.pen_down = false;
    }

    fn pen_down(&mut self) {
        self.pen_down = true;
    }

    fn position(&self) -> Vec2 {
        self.state.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.line_to(position);
    }

    fn heading(&self) -> f32 {
        self.state.heading
    }

    fn set_heading(&mut self, heading: f32) {
        self.state.heading = heading.rem_euclid(360.0);
    }

    fn pen_color(&self) -> Rgb {
        self.state.pen_color
    }

    fn set_pen_color(&mut self, color: Rgb) {
        self.state.pen_color = color;
    }
}

/// One call received by a [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceCall {
    Forward(f32),
    Right(f32),
    Left(f32),
    PenUp,
    PenDown,
    SetPosition(Vec2),
    SetHeading(f32),
    SetPenColor(Rgb),
}

/// Surface that tracks turtle state and logs every mutating call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    state: TurtleState,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    /// Empty log at the origin, heading along `+X`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Consumes the surface, returning its log.
    pub fn into_calls(self) -> Vec<SurfaceCall> {
        self.calls
    }
}

impl DrawingSurface for RecordingSurface {
    fn move_forward(&mut self, length: f32) {
        self.state.position += self.state.direction() * length;
        self.calls.push(SurfaceCall::Forward(length));
    }

    fn turn_right(&mut self, angle: f32) {
        self.state.heading -= angle;
        self.calls.push(SurfaceCall::Right(angle));
    }

    fn turn_left(&mut self, angle: f32) {
        self.state.heading += angle;
        self.calls.push(SurfaceCall::Left(angle));
    }

    fn pen_up(&mut self) {
        self.calls.push(SurfaceCall::PenUp);
    }

    fn pen_down(&mut self) {
        self.calls.push(SurfaceCall::PenDown);
    }

    fn position(&self) -> Vec2 {
        self.state.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.state.position = position;
        self.calls.push(SurfaceCall::SetPosition(position));
    }

    fn heading(&self) -> f32 {
        self.state.heading
    }

    fn set_heading(&mut self, heading: f32) {
        self.state.heading = heading;
        self.calls.push(SurfaceCall::SetHeading(heading));
    }

    fn pen_color(&self) -> Rgb {
        self.state.pen_color
    }

    fn set_pen_color(&mut self, color: Rgb) {
        self.state.pen_color = color;
        self.calls.push(SurfaceCall::SetPenColor(color));
    }
}
