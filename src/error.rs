//! Crate-wide error type shared by the board, layout, and engine modules.

use derive_more::{Display, Error};

/// Result type used throughout the crate, defaulting to [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by board access, index mapping, and search.
///
/// `CoordOutOfBounds` and `PixelOutOfRange` are programmer errors: the crate
/// never catches them and never clamps a coordinate, since clamping would
/// silently corrupt the serpentine mapping's bijection.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A coordinate fell outside the board dimensions.
    #[display("coordinate ({x}, {y}) outside {width}x{height} board")]
    CoordOutOfBounds {
        /// Column that was requested.
        x: usize,
        /// Row that was requested.
        y: usize,
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },

    /// A linear pixel index fell outside the physical strip.
    #[display("pixel index {index} outside strip of {pixel_count} pixels")]
    PixelOutOfRange {
        /// Index that was requested.
        index: usize,
        /// Number of pixels on the strip.
        pixel_count: usize,
    },

    /// Depth-first search exhausted its stack without reaching the goal.
    /// Possible because maze generation deliberately randomizes the outer
    /// edges and may disconnect regions.
    #[display("goal is not reachable from the start cell")]
    GoalUnreachable,
}
