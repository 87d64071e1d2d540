//! Serpentine mapping between `(x, y)` board coordinates and linear strip indices.
//!
//! NeoPixel-style panels are wired as one long strip that snakes through the
//! panel column by column: even columns run top-to-bottom, odd columns
//! bottom-to-top. [`Serpentine`] encodes that wiring once so every engine
//! renders with the same orientation.

use crate::{Board, Error, Result};
use smart_leds::RGB8;

/// The boustrophedon coordinate transform for a `W`×`H` panel.
///
/// The forward transform is `index = x*H + (y if x is even else H-1-y)`;
/// [`Serpentine::index_to_xy`] is its exact inverse. The pair is bijective
/// over the full coordinate and index ranges, which the mapping tests verify
/// exhaustively.
///
/// ```text
/// 3×2 panel, strip snaking down the columns:
///   LED0  LED3  LED4
///   LED1  LED2  LED5
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Serpentine<const W: usize, const H: usize>;

impl<const W: usize, const H: usize> Serpentine<W, H> {
    /// Total number of pixels on the strip.
    pub const PIXEL_COUNT: usize = W * H;

    /// Forward transform without the bounds check. Callers guarantee
    /// `x < W && y < H`.
    const fn raw_index(x: usize, y: usize) -> usize {
        if x % 2 == 0 {
            x * H + y
        } else {
            x * H + (H - 1 - y)
        }
    }

    /// Map `(x, y)` board coordinates to the linear strip index.
    ///
    /// # Errors
    ///
    /// [`Error::CoordOutOfBounds`] if either coordinate is out of range.
    pub fn xy_to_index(x: usize, y: usize) -> Result<usize> {
        if x >= W || y >= H {
            return Err(Error::CoordOutOfBounds {
                x,
                y,
                width: W,
                height: H,
            });
        }
        Ok(Self::raw_index(x, y))
    }

    /// Recover `(x, y)` board coordinates from a linear strip index.
    ///
    /// # Errors
    ///
    /// [`Error::PixelOutOfRange`] if `index >= W*H`.
    pub fn index_to_xy(index: usize) -> Result<(usize, usize)> {
        if index >= Self::PIXEL_COUNT {
            return Err(Error::PixelOutOfRange {
                index,
                pixel_count: Self::PIXEL_COUNT,
            });
        }
        let x = index / H;
        let offset = index % H;
        let y = if x % 2 == 0 { offset } else { H - 1 - offset };
        Ok((x, y))
    }

    /// Apply the transform to every cell of `board` exactly once, painting
    /// each cell with `paint`.
    ///
    /// Returns one `(index, color)` pair per pixel; each strip index appears
    /// exactly once. The order is unspecified (a full-frame write is
    /// order-insensitive).
    pub fn flatten<C: Copy + Default>(
        board: &Board<C, W, H>,
        paint: impl Fn(&C) -> RGB8,
    ) -> Vec<(usize, RGB8)> {
        board
            .iter()
            .map(|(x, y, cell)| (Self::raw_index(x, y), paint(cell)))
            .collect()
    }
}
