//! Conway's Game of Life over a [`Board`], with population-driven color and
//! automatic restart of stagnant runs.
//!
//! The engine runs indefinitely: [`LifeBoard::advance`] steps one generation,
//! recolors, and watches a bounded history of canonical board states. When a
//! single state repeats often enough the board is reseeded in place.

use crate::display::BLACK;
use crate::{Board, Result};
use itertools::iproduct;
use log::debug;
use num_bigint::BigUint;
use rand::Rng;
use smart_leds::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};
use std::collections::{HashMap, VecDeque};

/// A state repeating this many times within the history window counts as
/// stagnation.
pub const STAGNATION_REPEATS: usize = 20;
/// History capacity for a fresh run.
pub const HISTORY_CAPACITY: usize = 500;
/// Smaller history capacity used after a stagnation restart.
pub const RESTART_HISTORY_CAPACITY: usize = 100;

/// One cell of the Life board.
///
/// `steps_alive` counts consecutive generations alive: it increments the
/// generation a cell is born or survives and resets to zero the generation it
/// dies. `living_neighbors` is recomputed from the pre-transition state each
/// generation. `color` is derived from the grid-wide population, not from the
/// cell's own history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeCell {
    /// Whether the cell is alive this generation.
    pub alive: bool,
    /// Consecutive generations alive, including the birth generation.
    pub steps_alive: u32,
    /// Live Moore neighbors counted before the last transition.
    pub living_neighbors: u8,
    /// Display color; dead cells render black regardless.
    pub color: RGB8,
}

/// Initial board configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedPattern {
    /// Every cell independently alive with probability 0.5.
    Random,
    /// Three collinear cells; period-2 oscillator.
    Blinker,
    /// Six cells in a two-row shape; period-2 oscillator.
    Toad,
    /// An 8×3 block that settles into the penta-decathlon oscillator.
    PentaDecathlon,
}

impl SeedPattern {
    /// Look up a pattern by its command-line name.
    ///
    /// Unknown names return `None`; seeding with `None` leaves every cell
    /// dead rather than erroring, so a typo on the command line shows an
    /// empty board instead of aborting.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "random" => Some(Self::Random),
            "blinker" => Some(Self::Blinker),
            "toad" => Some(Self::Toad),
            "penta-decathlon" => Some(Self::PentaDecathlon),
            _ => None,
        }
    }
}

/// Bounded history of canonical board-state keys used for stagnation
/// detection.
#[derive(Clone, Debug, Default)]
pub struct StateHistory {
    states: VecDeque<BigUint>,
    capacity: usize,
}

impl StateHistory {
    /// Create an empty history holding at most `capacity` states.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            states: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a state key, evicting the oldest once at capacity.
    pub fn record(&mut self, key: BigUint) {
        if self.states.len() == self.capacity {
            self.states.pop_front();
        }
        self.states.push_back(key);
    }

    /// Whether any single state occurs [`STAGNATION_REPEATS`] or more times
    /// in the window.
    #[must_use]
    pub fn is_stagnant(&self) -> bool {
        let mut counts: HashMap<&BigUint, usize> = HashMap::new();
        for key in &self.states {
            *counts.entry(key).or_insert(0) += 1;
        }
        counts.values().any(|&repeats| repeats >= STAGNATION_REPEATS)
    }

    /// Number of recorded states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Maximum number of states retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The Life engine: a board of [`LifeCell`]s plus the grid-wide population
/// and the stagnation history.
#[derive(Clone, Debug)]
pub struct LifeBoard<const W: usize, const H: usize> {
    board: Board<LifeCell, W, H>,
    population: usize,
    history: StateHistory,
    pattern: Option<SeedPattern>,
}

impl<const W: usize, const H: usize> LifeBoard<W, H> {
    /// Create an engine with every cell dead and an empty full-capacity
    /// history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            population: 0,
            history: StateHistory::new(HISTORY_CAPACITY),
            pattern: None,
        }
    }

    /// The underlying board.
    #[must_use]
    pub fn board(&self) -> &Board<LifeCell, W, H> {
        &self.board
    }

    /// Mutable access to the underlying board, for constructing test
    /// configurations.
    pub fn board_mut(&mut self) -> &mut Board<LifeCell, W, H> {
        &mut self.board
    }

    /// Live-cell count as of the last [`Self::recolor`].
    #[must_use]
    pub fn population(&self) -> usize {
        self.population
    }

    /// The stagnation history.
    #[must_use]
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Clear the board and apply `pattern`. `None` (an unknown pattern name)
    /// seeds nothing: the board stays dead.
    ///
    /// The named patterns use fixed literal coordinates anchored near the
    /// center of a 32×8 panel. The seeded state is recorded as a history
    /// entry immediately, so stagnation counting includes generation zero.
    ///
    /// # Errors
    ///
    /// [`crate::Error::CoordOutOfBounds`] if a named pattern does not fit the
    /// board.
    pub fn seed(&mut self, pattern: Option<SeedPattern>, rng: &mut impl Rng) -> Result<()> {
        self.pattern = pattern;
        self.board.clear();
        if let Some(pattern) = pattern {
            match pattern {
                SeedPattern::Random => {
                    for (_, _, cell) in self.board.iter_mut() {
                        cell.alive = rng.gen_bool(0.5);
                    }
                }
                SeedPattern::Blinker => self.set_alive(&[(14, 3), (15, 3), (16, 3)])?,
                SeedPattern::Toad => {
                    self.set_alive(&[(14, 3), (15, 3), (16, 3), (13, 4), (14, 4), (15, 4)])?;
                }
                SeedPattern::PentaDecathlon => {
                    for (x, y) in iproduct!(13..21, 2..5) {
                        self.board.cell_mut(x, y)?.alive = true;
                    }
                }
            }
        }
        self.history.record(self.state_key());
        Ok(())
    }

    fn set_alive(&mut self, coords: &[(usize, usize)]) -> Result<()> {
        for &(x, y) in coords {
            self.board.cell_mut(x, y)?.alive = true;
        }
        Ok(())
    }

    /// Advance one generation.
    ///
    /// Strictly two-pass: every cell's neighbor count is taken from the
    /// pre-transition state before any cell is mutated. Mixing the passes
    /// would let early transitions corrupt later counts.
    pub fn step(&mut self) {
        let counts: Vec<u8> = iproduct!(0..W, 0..H)
            .map(|(x, y)| self.living_neighbors_of(x, y))
            .collect();

        // iproduct!(0..W, 0..H) and iter_mut agree on x-major order.
        for ((_, _, cell), neighbors) in self.board.iter_mut().zip(counts) {
            cell.living_neighbors = neighbors;
            match (cell.alive, neighbors) {
                (true, 2 | 3) => cell.steps_alive += 1,
                (false, 3) => {
                    cell.alive = true;
                    cell.steps_alive += 1;
                }
                (true, _) => {
                    cell.alive = false;
                    cell.steps_alive = 0;
                }
                (false, _) => {}
            }
        }
    }

    /// Count live cells in the eight Moore-neighborhood positions, clipped at
    /// the board edges (no wrapping).
    fn living_neighbors_of(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for (dx, dy) in iproduct!(-1_isize..=1, -1_isize..=1) {
            if dx == 0 && dy == 0 {
                continue;
            }
            let Some(nx) = x.checked_add_signed(dx) else {
                continue;
            };
            let Some(ny) = y.checked_add_signed(dy) else {
                continue;
            };
            if let Ok(cell) = self.board.cell(nx, ny) {
                if cell.alive {
                    count += 1;
                }
            }
        }
        count
    }

    /// Recompute the population and give every cell the population-driven
    /// color.
    pub fn recolor(&mut self) {
        self.population = self.board.iter().filter(|(_, _, cell)| cell.alive).count();
        let color = population_color(self.population);
        for (_, _, cell) in self.board.iter_mut() {
            cell.color = color;
        }
    }

    /// Canonical integer encoding of the board's alive/dead bits, x-major,
    /// interpreted as a big binary integer.
    #[must_use]
    pub fn state_key(&self) -> BigUint {
        let mut bytes = vec![0_u8; (W * H).div_ceil(8)];
        for (bit, (_, _, cell)) in self.board.iter().enumerate() {
            if cell.alive {
                bytes[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        BigUint::from_bytes_be(&bytes)
    }

    /// Run one full tick: step, recolor, record the new state, and reseed if
    /// the run has gone stagnant.
    ///
    /// Returns `true` when a stagnation restart happened. After a restart the
    /// history is replaced with a fresh [`RESTART_HISTORY_CAPACITY`] buffer
    /// holding only the reseeded state.
    ///
    /// # Errors
    ///
    /// Propagates seeding errors; impossible on the standard 32×8 board.
    pub fn advance(&mut self, rng: &mut impl Rng) -> Result<bool> {
        self.step();
        self.recolor();
        self.history.record(self.state_key());
        if !self.history.is_stagnant() {
            return Ok(false);
        }

        debug!(
            "board stagnant (a state repeated {STAGNATION_REPEATS} times); reseeding {:?}",
            self.pattern
        );
        self.history = StateHistory::new(RESTART_HISTORY_CAPACITY);
        self.seed(self.pattern, rng)?;
        self.recolor();
        Ok(true)
    }
}

impl<const W: usize, const H: usize> Default for LifeBoard<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hue byte for a given live population: `0.67 * clamp(pop, 0, 256) / 256`
/// scaled onto the `u8` hue wheel.
#[must_use]
pub fn hue_for_population(population: usize) -> u8 {
    let clamped = population.min(256) as f32;
    (0.67 * clamped / 256.0 * 255.0) as u8
}

/// Population-driven cell color: full-saturation, full-value HSV.
#[must_use]
pub fn population_color(population: usize) -> RGB8 {
    hsv2rgb(Hsv {
        hue: hue_for_population(population),
        sat: 255,
        val: 255,
    })
}

/// Paint rule for rendering: live cells show their color, dead cells are
/// black.
#[must_use]
pub fn cell_color(cell: &LifeCell) -> RGB8 {
    if cell.alive { cell.color } else { BLACK }
}
