//! Maze generation and animated depth-first search on a 32×8 panel,
//! rendered to the terminal. Generates, solves, and repeats forever.

use board_kit::Error;
use board_kit::display::{AnsiSink, blit};
use board_kit::maze::{self, MazeBoard};
use clap::Parser;
use log::{info, warn};
use rand::seq::SliceRandom;
use std::thread;
use std::time::Duration;

const WIDTH: usize = 32;
const HEIGHT: usize = 8;

fn parse_coord(arg: &str) -> Result<(usize, usize), String> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {arg:?}"))?;
    let x = x.trim().parse().map_err(|err| format!("bad x: {err}"))?;
    let y = y.trim().parse().map_err(|err| format!("bad y: {err}"))?;
    Ok((x, y))
}

#[derive(Debug, Parser)]
#[command(
    name = "maze",
    about = "Apply the DFS algorithm to a maze carved on the 32x8 pixel matrix"
)]
struct Args {
    /// Step delay of the search animation, in milliseconds.
    #[arg(short, long, default_value_t = 25, value_name = "MS")]
    speed: u64,

    /// Fixed start cell (default: a random open cell).
    #[arg(long, value_parser = parse_coord, value_name = "X,Y")]
    start: Option<(usize, usize)>,

    /// Fixed goal cell (default: a random open cell).
    #[arg(long, value_parser = parse_coord, value_name = "X,Y")]
    goal: Option<(usize, usize)>,
}

fn main() -> board_kit::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let step_delay = Duration::from_millis(args.speed);

    let mut rng = rand::thread_rng();
    let mut sink = AnsiSink::<WIDTH, HEIGHT>::new();

    loop {
        let mut maze = MazeBoard::<WIDTH, HEIGHT>::new();
        maze.generate(&mut rng)?;
        blit(maze.board(), maze::cell_color, &mut sink)?;

        let open = maze.open_cells();
        let Some(&fallback) = open.first() else {
            warn!("maze has no open cells; regenerating");
            continue;
        };
        let start = match args.start {
            Some(coord) => coord,
            None => *open.choose(&mut rng).unwrap_or(&fallback),
        };
        let goal = match args.goal {
            Some(coord) => coord,
            None => *open.choose(&mut rng).unwrap_or(&fallback),
        };

        match maze.depth_first_search(start, goal, &mut sink, step_delay) {
            Ok(steps) => info!("solved {start:?} -> {goal:?} in {steps} steps"),
            Err(Error::GoalUnreachable) => {
                warn!("goal {goal:?} unreachable from {start:?}; regenerating");
            }
            Err(err) => return Err(err),
        }

        thread::sleep(Duration::from_secs(1));
    }
}
