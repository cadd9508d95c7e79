//! # lindenmayer-turtle
//!
//! Expands L-System grammars lazily and interprets the resulting symbol strings as
//! 2D turtle-graphics commands.
//!
//! Generations are produced by an infinite [`Lindenmayer`] sequence and cached by
//! an [`IndexedCache`], so any depth can be requested at random. A
//! [`FractalInterpreter`] draws a generation onto anything implementing
//! [`DrawingSurface`], optionally cycling the pen through a hexagonal
//! [`ColorWheel`].

pub mod cache;
pub mod color;
pub mod error;
pub mod interpreter;
pub mod lsystem;
pub mod preset;
pub mod surface;
pub mod turtle;

pub use cache::*;
pub use color::*;
pub use error::*;
pub use interpreter::*;
pub use lsystem::*;
pub use preset::*;
pub use surface::*;
pub use turtle::*;
