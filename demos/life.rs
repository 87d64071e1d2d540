//! Conway's Game of Life on a 32×8 panel, rendered to the terminal.
//!
//! The run never ends on its own: stagnant boards (a state repeating 20
//! times within the history window) are reseeded automatically.

use board_kit::display::{AnsiSink, blit};
use board_kit::life::{self, LifeBoard, SeedPattern};
use clap::Parser;
use log::{info, warn};
use std::thread;
use std::time::Duration;

const WIDTH: usize = 32;
const HEIGHT: usize = 8;

#[derive(Debug, Parser)]
#[command(
    name = "life",
    about = "Apply the Conway's Game of Life algorithm to the 32x8 pixel matrix"
)]
struct Args {
    /// Initial state of the board: random, blinker, toad, or penta-decathlon.
    #[arg(short, long, default_value = "random")]
    state: String,

    /// Delay between generations, in milliseconds.
    #[arg(short, long, default_value_t = 100, value_name = "MS")]
    delay: u64,
}

fn main() -> board_kit::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let pattern = SeedPattern::from_name(&args.state);
    if pattern.is_none() {
        warn!("unknown state {:?}; the board stays empty", args.state);
    }

    let mut rng = rand::thread_rng();
    let mut life = LifeBoard::<WIDTH, HEIGHT>::new();
    life.seed(pattern, &mut rng)?;
    life.recolor();

    let mut sink = AnsiSink::<WIDTH, HEIGHT>::new();
    blit(life.board(), life::cell_color, &mut sink)?;

    let frame_delay = Duration::from_millis(args.delay);
    loop {
        thread::sleep(frame_delay);
        if life.advance(&mut rng)? {
            info!("stagnant run restarted (population {})", life.population());
        }
        blit(life.board(), life::cell_color, &mut sink)?;
    }
}
