//! Turtle state, operations, and the drawing-surface capability.

use crate::color::Rgb;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Anything a fractal can be drawn onto.
///
/// Angles are in degrees and lengths in surface units. Implementors decide the
/// orientation convention; the interpreter only ever asks to turn "right" or
/// "left" and restores headings it previously read back.
pub trait DrawingSurface {
    /// Moves along the current heading, drawing a line if the pen is down.
    fn move_forward(&mut self, length: f32);
    fn turn_right(&mut self, angle: f32);
    fn turn_left(&mut self, angle: f32);
    fn pen_up(&mut self);
    fn pen_down(&mut self);
    fn position(&self) -> Vec2;
    /// Teleports the turtle. Draws if the pen is down, like a forward move would.
    fn set_position(&mut self, position: Vec2);
    fn heading(&self) -> f32;
    fn set_heading(&mut self, heading: f32);
    fn pen_color(&self) -> Rgb;
    fn set_pen_color(&mut self, color: Rgb);
}

/// Snapshot saved by `[` and restored by `]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Surface position when the state was saved.
    pub position: Vec2,

    /// Heading in degrees.
    pub heading: f32,

    pub pen_color: Rgb,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            heading: 0.0,
            pen_color: Rgb::BLACK,
        }
    }
}

impl TurtleState {
    /// Reads the current state off a surface.
    pub fn capture<S: DrawingSurface + ?Sized>(surface: &S) -> Self {
        Self {
            position: surface.position(),
            heading: surface.heading(),
            pen_color: surface.pen_color(),
        }
    }

    /// Puts the surface back into this state without drawing the jump.
    pub fn restore<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.pen_up();
        surface.set_position(self.position);
        surface.set_heading(self.heading);
        surface.set_pen_color(self.pen_color);
        surface.pen_down();
    }

    /// Unit vector along `heading`, with 0° pointing at `+X` and angles growing
    /// counter-clockwise.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading.to_radians())
    }
}

/// Operations a symbol can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Draw one unit along the heading (`F`).
    Forward,
    /// Move one unit without drawing (`G`).
    Go,
    /// Turn right by the configured angle (`+`).
    Right,
    /// Turn left by the configured angle (`-`).
    Left,
    /// Save position, heading and pen color (`[`).
    Push,
    /// Restore the most recently saved state (`]`).
    Pop,
    /// No-op: the symbol only drives expansion.
    Ignore,
}

impl TurtleOp {
    /// The conventional meaning of `symbol`.
    pub fn standard(symbol: char) -> Self {
        match symbol {
            'F' => TurtleOp::Forward,
            'G' => TurtleOp::Go,
            '+' => TurtleOp::Right,
            '-' => TurtleOp::Left,
            '[' => TurtleOp::Push,
            ']' => TurtleOp::Pop,
            _ => TurtleOp::Ignore,
        }
    }

    pub const STANDARD_SYMBOLS: [char; 6] = ['F', 'G', '+', '-', '[', ']'];
}
