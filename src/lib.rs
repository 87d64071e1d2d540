//! Board-state engines for serpentine-wired LED matrix panels.
//!
//! The crate models a fixed-size grid of cells, the boustrophedon transform
//! that maps grid coordinates onto the physical strip, and two animated
//! engines built on top: Conway's Game of Life and maze carving with an
//! animated depth-first search. Hardware sits behind the narrow
//! [`display::DisplaySink`] trait, so the engines run and test entirely on
//! the host; runnable terminal renditions live in `demos/`.
//!
//! # Glossary
//!
//! - **Board:** fixed-size 2D array of cells addressed by `(x, y)`.
//! - **Serpentine mapping:** alternating-direction coordinate-to-index
//!   transform matching the physical LED wiring.
//! - **Moore neighborhood:** the 8 cells adjacent to a cell, including
//!   diagonals.
//! - **Recursive backtracker:** maze carving via randomized depth-first
//!   recursion.
//! - **Stagnation:** a Life board state repeating often enough to be
//!   considered non-evolving, triggering a reseed.

pub mod board;
pub mod display;
mod error;
pub mod layout;
pub mod life;
pub mod maze;

pub use crate::board::Board;
pub use crate::error::{Error, Result};
pub use crate::layout::Serpentine;

/// RGB color type used throughout, re-exported from `smart_leds`.
pub use smart_leds::RGB8;
