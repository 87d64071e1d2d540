//! Display sinks: the narrow boundary between board engines and whatever
//! shows the pixels.
//!
//! The engines never talk to LED hardware directly. They write
//! `(index, color)` pairs into a [`DisplaySink`] and call [`DisplaySink::show`]
//! to flush a frame, so the same code drives a physical strip driver, the
//! in-memory [`FrameSink`] used by tests, or the terminal [`AnsiSink`] used
//! by the demos.

use crate::layout::Serpentine;
use crate::{Board, Error, Result};
use smart_leds::RGB8;
use std::io::Write as _;

/// Color of an unlit pixel.
pub const BLACK: RGB8 = RGB8::new(0, 0, 0);

/// Receives pixel writes addressed by physical strip index.
///
/// `show` flushes buffered writes and is assumed to always succeed; there is
/// no partial-failure signaling at this boundary.
pub trait DisplaySink {
    /// Number of pixels on the strip.
    fn pixel_count(&self) -> usize;

    /// Buffer a single pixel write.
    ///
    /// # Errors
    ///
    /// [`Error::PixelOutOfRange`] if `index` is outside `[0, pixel_count)`.
    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<()>;

    /// Flush all buffered writes to the display.
    fn show(&mut self);
}

/// Write every cell of `board` through the serpentine transform into `sink`,
/// then flush. Each strip index is written exactly once per call.
///
/// # Errors
///
/// [`Error::PixelOutOfRange`] if the sink is smaller than the board.
pub fn blit<C, S, const W: usize, const H: usize>(
    board: &Board<C, W, H>,
    paint: impl Fn(&C) -> RGB8,
    sink: &mut S,
) -> Result<()>
where
    C: Copy + Default,
    S: DisplaySink,
{
    for (index, color) in Serpentine::<W, H>::flatten(board, paint) {
        sink.set_pixel(index, color)?;
    }
    sink.show();
    Ok(())
}

/// In-memory sink for tests: records pixel writes and `show` calls without
/// touching any hardware.
#[derive(Clone, Debug)]
pub struct FrameSink {
    pixels: Vec<RGB8>,
    shown: Vec<RGB8>,
    write_count: usize,
    show_count: usize,
}

impl FrameSink {
    /// Create a sink for a strip of `pixel_count` pixels, all black.
    #[must_use]
    pub fn new(pixel_count: usize) -> Self {
        Self {
            pixels: vec![BLACK; pixel_count],
            shown: vec![BLACK; pixel_count],
            write_count: 0,
            show_count: 0,
        }
    }

    /// The frame as of the most recent [`DisplaySink::show`].
    #[must_use]
    pub fn shown(&self) -> &[RGB8] {
        &self.shown
    }

    /// Total number of `set_pixel` calls accepted.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Number of `show` calls.
    #[must_use]
    pub fn show_count(&self) -> usize {
        self.show_count
    }
}

impl DisplaySink for FrameSink {
    fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<()> {
        let pixel_count = self.pixels.len();
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(Error::PixelOutOfRange { index, pixel_count })?;
        *pixel = color;
        self.write_count += 1;
        Ok(())
    }

    fn show(&mut self) {
        self.shown.copy_from_slice(&self.pixels);
        self.show_count += 1;
    }
}

/// Terminal sink for the demos: renders the strip as a `W`×`H` block of
/// 24-bit ANSI background cells.
///
/// `show` redraws the panel in grid orientation by running every strip index
/// back through [`Serpentine::index_to_xy`], the same inverse transform the
/// engines use, so the terminal shows exactly what the physical panel would.
#[derive(Debug)]
pub struct AnsiSink<const W: usize, const H: usize> {
    pixels: Vec<RGB8>,
}

impl<const W: usize, const H: usize> AnsiSink<W, H> {
    /// Create the sink and clear the terminal.
    #[must_use]
    pub fn new() -> Self {
        // Clear screen, home cursor, hide cursor.
        print!("\x1b[2J\x1b[H\x1b[?25l");
        Self {
            pixels: vec![BLACK; W * H],
        }
    }
}

impl<const W: usize, const H: usize> Default for AnsiSink<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Drop for AnsiSink<W, H> {
    fn drop(&mut self) {
        // Restore the cursor on the way out.
        print!("\x1b[?25h");
        let _ = std::io::stdout().flush();
    }
}

impl<const W: usize, const H: usize> DisplaySink for AnsiSink<W, H> {
    fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<()> {
        let pixel_count = self.pixels.len();
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(Error::PixelOutOfRange { index, pixel_count })?;
        *pixel = color;
        Ok(())
    }

    fn show(&mut self) {
        let mut grid = [[BLACK; W]; H];
        for (index, color) in self.pixels.iter().enumerate() {
            let Ok((x, y)) = Serpentine::<W, H>::index_to_xy(index) else {
                continue;
            };
            grid[y][x] = *color;
        }

        let mut out = String::with_capacity(W * H * 20);
        out.push_str("\x1b[H");
        for row in &grid {
            for color in row {
                out.push_str(&format!(
                    "\x1b[48;2;{};{};{}m  ",
                    color.r, color.g, color.b
                ));
            }
            out.push_str("\x1b[0m\n");
        }
        print!("{out}");
        let _ = std::io::stdout().flush();
    }
}
