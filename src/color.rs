//! Hexagonal RGB color wheel used to animate the pen.
//!
//! The wheel walks the edges of the RGB cube that connect the six pure hues:
//! red, yellow, green, teal, blue, purple and back to red. On every edge exactly
//! one channel ramps while the other two sit at `0` and `max`.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB triple in whatever channel range its producer uses (`0..=1` or `0..=255`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    /// Pen color of a fresh surface.
    pub const BLACK: Rgb = Rgb([0.0, 0.0, 0.0]);

    /// Builds a triple from its red, green and blue channels.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// Red channel.
    pub fn r(self) -> f32 {
        self.0[0]
    }

    /// Green channel.
    pub fn g(self) -> f32 {
        self.0[1]
    }

    /// Blue channel.
    pub fn b(self) -> f32 {
        self.0[2]
    }

    /// Multiplies every channel by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self(self.0.map(|c| c * factor))
    }

    /// Renders `#rrggbb`, interpreting the channels as lying in `0..=channel_max`.
    pub fn to_hex(self, channel_max: f32) -> String {
        let [r, g, b] = self.0.map(|c| {
            let unit = if channel_max > 0.0 { c / channel_max } else { 0.0 };
            (unit.clamp(0.0, 1.0) * 255.0).round() as u8
        });
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// One of the six vertices of the color hexagon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hue {
    #[default]
    Red,
    Yellow,
    Green,
    Teal,
    Blue,
    Purple,
}

impl Hue {
    /// Every vertex, in rotation order starting from red.
    pub const ALL: [Hue; 6] = [
        Hue::Red,
        Hue::Yellow,
        Hue::Green,
        Hue::Teal,
        Hue::Blue,
        Hue::Purple,
    ];

    /// Parses a hue name, falling back to [`Hue::Red`] when it is not recognized.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!("unknown hue {name:?}, falling back to red");
            Hue::default()
        })
    }

    /// Starting rotation state for this vertex: `(unit color, active channel, direction)`.
    ///
    /// The active channel is the one that ramps towards the next hue in the
    /// cycle; e.g. leaving red for yellow, green rises.
    fn mode(self) -> ([f32; 3], usize, i8) {
        match self {
            Hue::Red => ([1.0, 0.0, 0.0], 1, 1),
            Hue::Yellow => ([1.0, 1.0, 0.0], 0, -1),
            Hue::Green => ([0.0, 1.0, 0.0], 2, 1),
            Hue::Teal => ([0.0, 1.0, 1.0], 1, -1),
            Hue::Blue => ([0.0, 0.0, 1.0], 0, 1),
            Hue::Purple => ([1.0, 0.0, 1.0], 2, -1),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Hue::Red => "red",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
            Hue::Teal => "teal",
            Hue::Blue => "blue",
            Hue::Purple => "purple",
        }
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Hue::from_str`] for names outside the hexagon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hue: {0}")]
pub struct UnknownHue(pub String);

impl FromStr for Hue {
    type Err = UnknownHue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hue::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHue(s.to_owned()))
    }
}

/// Cyclic color generator walking the hue hexagon.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorWheel {
    color: [f32; 3],
    channel: usize,
    direction: i8,
    max: f32,
    brightness: f32,
}

impl ColorWheel {
    /// Creates a wheel parked on `hue`.
    ///
    /// `channel_max` selects the channel range; only `1.0` and `255.0` are
    /// supported and anything else is treated as `255.0`.
    pub fn new(hue: Hue, channel_max: f32) -> Self {
        let max = if channel_max == 1.0 || channel_max == 255.0 {
            channel_max
        } else {
            warn!("unsupported channel max {channel_max}, using 255");
            255.0
        };
        let mut wheel = Self {
            color: [0.0; 3],
            channel: 0,
            direction: 1,
            max,
            brightness: 1.0,
        };
        wheel.goto_hue(hue);
        wheel
    }

    /// Same as [`new`](Self::new) but takes a hue name; unknown names start at red.
    pub fn from_name(name: &str, channel_max: f32) -> Self {
        Self::new(Hue::from_name_or_default(name), channel_max)
    }

    /// Jumps to `hue`, resetting the rotation state to that vertex.
    pub fn goto_hue(&mut self, hue: Hue) -> Rgb {
        let (unit, channel, direction) = hue.mode();
        self.color = unit.map(|c| c * self.max);
        self.channel = channel;
        self.direction = direction;
        self.color()
    }

    /// Overrides the stored triple, clamping each channel. The rotation state is kept.
    pub fn goto_rgb(&mut self, rgb: Rgb) -> Rgb {
        self.color = rgb.0.map(|c| self.clamp(c));
        self.color()
    }

    /// Sets the output multiplier, clamped to `[0, 1]`.
    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, 1.0);
    }

    /// Output multiplier in `[0, 1]`.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Upper bound of every channel, `1.0` or `255.0`.
    pub fn channel_max(&self) -> f32 {
        self.max
    }

    /// Index of the channel currently ramping (0 = R, 1 = G, 2 = B).
    pub fn channel(&self) -> usize {
        self.channel
    }

    /// `+1` while the active channel rises, `-1` while it falls.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Current color with brightness applied.
    pub fn color(&self) -> Rgb {
        Rgb(self.color).scaled(self.brightness)
    }

    /// Current color without brightness applied.
    pub fn raw(&self) -> Rgb {
        Rgb(self.color)
    }

    /// Advances around the hexagon by `amount` and returns the new color.
    ///
    /// A step never carries over a corner; any excess is absorbed by the clamp.
    /// When the active channel reaches the boundary it is heading for, the wheel
    /// turns the corner right away: the direction flips and the neighbouring
    /// channel becomes active, so a wheel resting on a vertex is in the same
    /// state as one freshly parked there with [`goto_hue`](Self::goto_hue).
    pub fn rotate(&mut self, amount: f32) -> Rgb {
        // Only reachable after `goto_rgb` left the active channel on its boundary.
        self.turn_corner();
        let next = self.color[self.channel] + f32::from(self.direction) * amount;
        self.color[self.channel] = self.clamp(next);
        self.turn_corner();
        self.color()
    }

    fn turn_corner(&mut self) {
        let current = self.color[self.channel];
        if (current == self.max && self.direction > 0) || (current == 0.0 && self.direction < 0) {
            self.direction = -self.direction;
            self.channel = (self.channel + 2) % 3;
        }
    }

    fn clamp(&self, n: f32) -> f32 {
        n.clamp(0.0, self.max)
    }
}

impl Default for ColorWheel {
    fn default() -> Self {
        Self::new(Hue::Red, 255.0)
    }
}
