//! Interpreter that draws L-System generations onto a [`DrawingSurface`].
//!
//! The entry point is [`FractalInterpreter`]. Build it from an axiom and a
//! [`RuleSet`], optionally attach a [`ColorStrategy`] with
//! [`FractalInterpreter::with_colors`], then call [`FractalInterpreter::draw`]
//! with the generation depth to render.

use crate::cache::IndexedCache;
use crate::color::{ColorWheel, Rgb};
use crate::error::{FractalError, Result};
use crate::lsystem::{Lindenmayer, RuleSet};
use crate::turtle::{DrawingSurface, TurtleOp, TurtleState};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for fractal interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Turn angle for `+` and `-`, in degrees.
    pub angle: f32,
    /// Distance covered by `F` and `G`.
    pub unit_length: f32,
    /// Heading the surface is reset to at the start of every draw, in degrees.
    pub heading: f32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            angle: 90.0,
            unit_length: 1.0,
            heading: 0.0,
        }
    }
}

/// Hook that may recolor the pen while a generation is being drawn.
pub trait ColorStrategy {
    /// Called once before the scan starts. A returned color becomes the initial pen color.
    fn begin(&mut self) -> Option<Rgb> {
        None
    }

    /// Called before each drawing action with the number of actions visited so
    /// far in this draw. A returned color is applied to the pen before dispatch.
    fn on_character_visited(&mut self, counter: u64) -> Option<Rgb>;
}

/// The colorless default.
impl ColorStrategy for () {
    fn on_character_visited(&mut self, _counter: u64) -> Option<Rgb> {
        None
    }
}

impl<T: ColorStrategy> ColorStrategy for Option<T> {
    fn begin(&mut self) -> Option<Rgb> {
        self.as_mut().and_then(T::begin)
    }

    fn on_character_visited(&mut self, counter: u64) -> Option<Rgb> {
        self.as_mut()
            .and_then(|inner| inner.on_character_visited(counter))
    }
}

/// Rotates a [`ColorWheel`] at geometrically spaced visits.
///
/// The wheel turns on visit 1, then on visit `growth`, `growth²`, and so on, so
/// color changes become rarer as the drawing gets denser.
#[derive(Clone, Debug)]
pub struct WheelCycler {
    wheel: ColorWheel,
    step: f32,
    growth: u64,
    cap: u64,
}

impl WheelCycler {
    /// `growth` below 2 is raised to 2.
    pub fn new(wheel: ColorWheel, step: f32, growth: u64) -> Self {
        Self {
            wheel,
            step,
            growth: growth.max(2),
            cap: 1,
        }
    }

    /// The wheel being rotated.
    pub fn wheel(&self) -> &ColorWheel {
        &self.wheel
    }

    /// Factor the rotation interval grows by.
    pub fn growth(&self) -> u64 {
        self.growth
    }
}

impl ColorStrategy for WheelCycler {
    fn begin(&mut self) -> Option<Rgb> {
        self.cap = 1;
        Some(self.wheel.color())
    }

    fn on_character_visited(&mut self, counter: u64) -> Option<Rgb> {
        if counter != self.cap {
            return None;
        }
        self.cap = self.cap.saturating_mul(self.growth);
        Some(self.wheel.rotate(self.step))
    }
}

/// Summary of one draw call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Characters scanned, including ignored ones.
    pub symbols: usize,
    /// Characters that triggered an operation.
    pub actions: usize,
    /// Lines drawn by `F`.
    pub segments: usize,
    /// Deepest nesting of `[` reached.
    pub max_stack_depth: usize,
}

/// Expands an L-System lazily and draws chosen generations.
///
/// Generations are cached, so drawing several depths of the same system only
/// expands each generation once.
pub struct FractalInterpreter<C = ()> {
    generations: IndexedCache<Lindenmayer>,
    op_map: HashMap<char, TurtleOp>,
    config: InterpreterConfig,
    colors: C,
}

impl FractalInterpreter<()> {
    /// Creates a colorless interpreter with the standard symbol map.
    pub fn new(axiom: impl Into<String>, rules: RuleSet, config: InterpreterConfig) -> Self {
        let mut interpreter = Self {
            generations: IndexedCache::new(Lindenmayer::new(axiom, rules)),
            op_map: HashMap::new(),
            config,
            colors: (),
        };
        interpreter.populate_standard_symbols();
        interpreter
    }
}

impl<C: ColorStrategy> FractalInterpreter<C> {
    /// Swaps in a color strategy (builder pattern).
    pub fn with_colors<D: ColorStrategy>(self, colors: D) -> FractalInterpreter<D> {
        FractalInterpreter {
            generations: self.generations,
            op_map: self.op_map,
            config: self.config,
            colors,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    ///
    /// Symbols missing from `map` are treated as [`TurtleOp::Ignore`].
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers `F`, `G`, `+`, `-`, `[` and `]` with their conventional operations.
    pub fn populate_standard_symbols(&mut self) {
        for symbol in TurtleOp::STANDARD_SYMBOLS {
            self.set_op(symbol, TurtleOp::standard(symbol));
        }
    }

    /// The operation `symbol` triggers; unmapped symbols are [`TurtleOp::Ignore`].
    pub fn op(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    /// The active configuration.
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InterpreterConfig {
        &mut self.config
    }

    /// The attached color strategy.
    pub fn colors(&self) -> &C {
        &self.colors
    }

    /// The symbol string of generation `depth`, expanding it if needed.
    pub fn generation(&mut self, depth: usize) -> Result<&str> {
        self.generations.get(depth).map(String::as_str)
    }

    /// Number of generations expanded so far.
    pub fn realized_generations(&self) -> usize {
        self.generations.len()
    }

    /// Draws generation `depth` onto `surface`.
    ///
    /// # Push / Pop
    ///
    /// `[` saves position, heading and pen color. `]` restores them with the pen
    /// lifted. A `]` with nothing saved aborts the draw with
    /// [`FractalError::UnbalancedState`]; whatever was drawn before it stays on
    /// the surface.
    pub fn draw<S>(&mut self, surface: &mut S, depth: usize) -> Result<DrawStats>
    where
        S: DrawingSurface + ?Sized,
    {
        let Self {
            generations,
            op_map,
            config,
            colors,
        } = self;
        let symbols = generations.get(depth)?;
        let stats = scan(symbols, op_map, config, colors, surface)?;
        debug!("drew generation {depth}: {stats:?}");
        Ok(stats)
    }

    /// Draws an arbitrary symbol string with this interpreter's map, config and colors.
    pub fn interpret<S>(&mut self, surface: &mut S, symbols: &str) -> Result<DrawStats>
    where
        S: DrawingSurface + ?Sized,
    {
        scan(
            symbols,
            &self.op_map,
            &self.config,
            &mut self.colors,
            surface,
        )
    }
}

fn scan<C, S>(
    symbols: &str,
    op_map: &HashMap<char, TurtleOp>,
    config: &InterpreterConfig,
    colors: &mut C,
    surface: &mut S,
) -> Result<DrawStats>
where
    C: ColorStrategy,
    S: DrawingSurface + ?Sized,
{
    surface.set_heading(config.heading);
    if let Some(color) = colors.begin() {
        surface.set_pen_color(color);
    }

    let mut stats = DrawStats::default();
    let mut stack: Vec<TurtleState> = Vec::new();
    let mut visited: u64 = 0;

    for (offset, symbol) in symbols.chars().enumerate() {
        stats.symbols += 1;
        let op = op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore);
        if op == TurtleOp::Ignore {
            continue;
        }

        if let Some(color) = colors.on_character_visited(visited) {
            surface.set_pen_color(color);
        }
        visited += 1;
        stats.actions += 1;

        match op {
            TurtleOp::Forward => {
                surface.move_forward(config.unit_length);
                stats.segments += 1;
            }
            TurtleOp::Go => {
                surface.pen_up();
                surface.move_forward(config.unit_length);
                surface.pen_down();
            }
            TurtleOp::Right => surface.turn_right(config.angle),
            TurtleOp::Left => surface.turn_left(config.angle),
            TurtleOp::Push => {
                stack.push(TurtleState::capture(&*surface));
                stats.max_stack_depth = stats.max_stack_depth.max(stack.len());
            }
            TurtleOp::Pop => {
                let saved = stack
                    .pop()
                    .ok_or(FractalError::UnbalancedState { offset })?;
                saved.restore(surface);
            }
            TurtleOp::Ignore => {}
        }
    }

    Ok(stats)
}
