#![allow(missing_docs)]
//! Host tests for the Life engine: transition rules, coloring, and
//! stagnation-driven restarts.

use board_kit::display::BLACK;
use board_kit::life::{
    self, HISTORY_CAPACITY, LifeBoard, RESTART_HISTORY_CAPACITY, STAGNATION_REPEATS, SeedPattern,
    StateHistory,
};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn alive_cells<const W: usize, const H: usize>(life: &LifeBoard<W, H>) -> HashSet<(usize, usize)> {
    life.board()
        .iter()
        .filter(|(_, _, cell)| cell.alive)
        .map(|(x, y, _)| (x, y))
        .collect()
}

fn make_alive(life: &mut LifeBoard<32, 8>, coords: &[(usize, usize)]) {
    for &(x, y) in coords {
        life.board_mut().cell_mut(x, y).unwrap().alive = true;
    }
}

#[test]
fn underpopulated_cells_die_and_reset_their_age() {
    let mut life = LifeBoard::<32, 8>::new();
    make_alive(&mut life, &[(5, 5), (20, 3), (20, 4)]);
    for &(x, y) in &[(5, 5), (20, 3), (20, 4)] {
        life.board_mut().cell_mut(x, y).unwrap().steps_alive = 5;
    }

    life.step();

    assert!(alive_cells(&life).is_empty());
    for &(x, y) in &[(5, 5), (20, 3), (20, 4)] {
        assert_eq!(life.board().cell(x, y).unwrap().steps_alive, 0);
    }
}

#[test]
fn birth_requires_exactly_three_neighbors() {
    let mut life = LifeBoard::<32, 8>::new();
    make_alive(&mut life, &[(10, 3), (11, 3), (12, 3)]);

    life.step();

    assert_eq!(
        alive_cells(&life),
        HashSet::from([(11, 2), (11, 3), (11, 4)])
    );
    // Birth generation counts as one generation alive.
    assert_eq!(life.board().cell(11, 2).unwrap().steps_alive, 1);
    assert_eq!(life.board().cell(11, 4).unwrap().steps_alive, 1);
    // The survivor saw two live neighbors before the transition.
    assert_eq!(life.board().cell(11, 3).unwrap().living_neighbors, 2);
    assert_eq!(life.board().cell(11, 3).unwrap().steps_alive, 1);
}

#[test]
fn block_is_a_still_life() {
    let block = [(5, 5), (5, 6), (6, 5), (6, 6)];
    let mut life = LifeBoard::<32, 8>::new();
    make_alive(&mut life, &block);

    life.step();
    life.step();

    assert_eq!(alive_cells(&life), HashSet::from(block));
    for &(x, y) in &block {
        assert_eq!(life.board().cell(x, y).unwrap().steps_alive, 2);
    }
}

#[test]
fn blinker_oscillates_with_period_two() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut life = LifeBoard::<32, 8>::new();
    life.seed(Some(SeedPattern::Blinker), &mut rng).unwrap();
    let horizontal = alive_cells(&life);
    assert_eq!(horizontal, HashSet::from([(14, 3), (15, 3), (16, 3)]));

    life.step();
    assert_eq!(
        alive_cells(&life),
        HashSet::from([(15, 2), (15, 3), (15, 4)])
    );

    life.step();
    assert_eq!(alive_cells(&life), horizontal);
}

#[test]
fn named_patterns_seed_their_literal_cells() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut life = LifeBoard::<32, 8>::new();

    life.seed(Some(SeedPattern::Toad), &mut rng).unwrap();
    assert_eq!(
        alive_cells(&life),
        HashSet::from([(14, 3), (15, 3), (16, 3), (13, 4), (14, 4), (15, 4)])
    );

    life.seed(Some(SeedPattern::PentaDecathlon), &mut rng).unwrap();
    let cells = alive_cells(&life);
    assert_eq!(cells.len(), 24);
    assert!(cells.contains(&(13, 2)));
    assert!(cells.contains(&(20, 4)));
    assert!(!cells.contains(&(12, 3)));
}

#[test]
fn random_seed_fills_roughly_half_the_board() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut life = LifeBoard::<32, 8>::new();
    life.seed(Some(SeedPattern::Random), &mut rng).unwrap();
    life.recolor();
    let population = life.population();
    assert!(
        (64..=192).contains(&population),
        "population {population} far from half of 256"
    );
}

#[test]
fn pattern_names_are_looked_up_permissively() {
    assert_eq!(SeedPattern::from_name("random"), Some(SeedPattern::Random));
    assert_eq!(
        SeedPattern::from_name("blinker"),
        Some(SeedPattern::Blinker)
    );
    assert_eq!(SeedPattern::from_name("toad"), Some(SeedPattern::Toad));
    assert_eq!(
        SeedPattern::from_name("penta-decathlon"),
        Some(SeedPattern::PentaDecathlon)
    );
    assert_eq!(SeedPattern::from_name("spiral"), None);

    // Seeding with an unknown pattern leaves the board dead.
    let mut rng = StdRng::seed_from_u64(4);
    let mut life = LifeBoard::<32, 8>::new();
    life.seed(None, &mut rng).unwrap();
    assert!(alive_cells(&life).is_empty());
}

#[test]
fn seed_clears_any_previous_generation() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut life = LifeBoard::<32, 8>::new();
    make_alive(&mut life, &[(0, 0), (31, 7)]);
    life.seed(Some(SeedPattern::Blinker), &mut rng).unwrap();
    assert_eq!(alive_cells(&life), HashSet::from([(14, 3), (15, 3), (16, 3)]));
}

#[test]
fn hue_tracks_the_clamped_population() {
    assert_eq!(life::hue_for_population(0), 0);
    assert_eq!(life::hue_for_population(128), 85);
    assert_eq!(life::hue_for_population(256), 170);
    // Clamped: anything past a full board looks like a full board.
    assert_eq!(life::hue_for_population(10_000), 170);
}

#[test]
fn recolor_applies_one_population_color_everywhere() {
    let mut life = LifeBoard::<32, 8>::new();
    make_alive(&mut life, &[(5, 5), (5, 6), (6, 5), (6, 6)]);
    life.recolor();

    assert_eq!(life.population(), 4);
    let expected = life::population_color(4);
    for (_, _, cell) in life.board().iter() {
        assert_eq!(cell.color, expected);
    }

    // Dead cells render black regardless of their stored color.
    let dead = life.board().cell(0, 0).unwrap();
    assert!(!dead.alive);
    assert_eq!(life::cell_color(dead), BLACK);
    let live = life.board().cell(5, 5).unwrap();
    assert_eq!(life::cell_color(live), expected);
}

#[test]
fn state_key_distinguishes_boards_and_is_stable() {
    let mut life = LifeBoard::<32, 8>::new();
    let empty_key = life.state_key();
    assert_eq!(empty_key, BigUint::from(0_u32));

    make_alive(&mut life, &[(0, 0)]);
    let one_key = life.state_key();
    assert_ne!(one_key, empty_key);
    assert_eq!(life.state_key(), one_key);
}

#[test]
fn history_counts_repeats_within_its_window() {
    let mut history = StateHistory::new(HISTORY_CAPACITY);
    let key = BigUint::from(7_u32);
    for _ in 0..STAGNATION_REPEATS - 1 {
        history.record(key.clone());
        assert!(!history.is_stagnant());
    }
    history.record(key);
    assert!(history.is_stagnant());
}

#[test]
fn history_evicts_oldest_at_capacity() {
    let mut history = StateHistory::new(5);
    for n in 0..8_u32 {
        history.record(BigUint::from(n));
    }
    assert_eq!(history.len(), 5);
    assert_eq!(history.capacity(), 5);
    assert!(!history.is_stagnant());
}

#[test]
fn seeding_records_the_initial_state() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut life = LifeBoard::<32, 8>::new();
    assert!(life.history().is_empty());

    life.seed(Some(SeedPattern::Blinker), &mut rng).unwrap();
    assert_eq!(life.history().len(), 1);

    // Even an empty seed is a state worth counting.
    life.seed(None, &mut rng).unwrap();
    assert_eq!(life.history().len(), 2);
}

#[test]
fn stagnant_run_restarts_with_a_smaller_history() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut life = LifeBoard::<32, 8>::new();
    life.seed(Some(SeedPattern::Blinker), &mut rng).unwrap();
    life.recolor();
    assert_eq!(life.history().capacity(), HISTORY_CAPACITY);
    assert_eq!(life.history().len(), 1);

    // A period-2 oscillator repeats each phase every other tick; the seeded
    // phase already counts once, so it hits the repeat threshold on tick
    // 2 * (STAGNATION_REPEATS - 1).
    let mut restarted_after = None;
    for tick in 1..=2 * STAGNATION_REPEATS + 1 {
        if life.advance(&mut rng).unwrap() {
            restarted_after = Some(tick);
            break;
        }
    }

    assert_eq!(restarted_after, Some(2 * (STAGNATION_REPEATS - 1)));
    assert_eq!(life.history().capacity(), RESTART_HISTORY_CAPACITY);
    // The fresh history holds only the reseeded state.
    assert_eq!(life.history().len(), 1);
    // Reseeded back to the stored pattern.
    assert_eq!(alive_cells(&life), HashSet::from([(14, 3), (15, 3), (16, 3)]));
    assert_eq!(life.population(), 3);
}
