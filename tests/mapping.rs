#![allow(missing_docs)]
//! Host tests for the serpentine mapping primitives.

use board_kit::display::{FrameSink, blit};
use board_kit::{Board, Error, RGB8, Serpentine};
use std::collections::HashSet;

type Panel = Serpentine<32, 8>;

#[test]
fn literal_anchor_values() {
    assert_eq!(Panel::xy_to_index(0, 0).unwrap(), 0);
    assert_eq!(Panel::xy_to_index(0, 7).unwrap(), 7);
    // Odd columns run bottom-to-top.
    assert_eq!(Panel::xy_to_index(1, 7).unwrap(), 8);
    assert_eq!(Panel::xy_to_index(1, 0).unwrap(), 15);
    assert_eq!(Panel::xy_to_index(2, 0).unwrap(), 16);
    assert_eq!(Panel::xy_to_index(31, 0).unwrap(), 255);
}

#[test]
fn small_panel_matches_wiring_diagram() {
    // 3×2 panel, strip snaking down the columns:
    //   LED0  LED3  LED4
    //   LED1  LED2  LED5
    let wiring = [(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)];
    for (led, (x, y)) in wiring.into_iter().enumerate() {
        assert_eq!(Serpentine::<3, 2>::xy_to_index(x, y).unwrap(), led);
        assert_eq!(Serpentine::<3, 2>::index_to_xy(led).unwrap(), (x, y));
    }
}

#[test]
fn forward_then_inverse_is_identity() {
    for x in 0..32 {
        for y in 0..8 {
            let index = Panel::xy_to_index(x, y).unwrap();
            assert_eq!(Panel::index_to_xy(index).unwrap(), (x, y));
        }
    }
}

#[test]
fn inverse_then_forward_is_identity_and_bijective() {
    let mut seen = HashSet::new();
    for index in 0..256 {
        let (x, y) = Panel::index_to_xy(index).unwrap();
        assert!(x < 32 && y < 8);
        assert!(seen.insert((x, y)), "index {index} mapped to a repeat cell");
        assert_eq!(Panel::xy_to_index(x, y).unwrap(), index);
    }
    assert_eq!(seen.len(), 256);
}

#[test]
fn out_of_range_fails_fast() {
    assert_eq!(
        Panel::xy_to_index(32, 0),
        Err(Error::CoordOutOfBounds {
            x: 32,
            y: 0,
            width: 32,
            height: 8
        })
    );
    assert!(Panel::xy_to_index(0, 8).is_err());
    assert_eq!(
        Panel::index_to_xy(256),
        Err(Error::PixelOutOfRange {
            index: 256,
            pixel_count: 256
        })
    );
}

#[test]
fn flatten_emits_every_index_exactly_once() {
    let board = Board::<bool, 3, 2>::new();
    let frame = Serpentine::<3, 2>::flatten(&board, |_| RGB8::new(1, 2, 3));
    assert_eq!(frame.len(), 6);
    let indices: HashSet<usize> = frame.iter().map(|&(index, _)| index).collect();
    assert_eq!(indices, (0..6).collect());
}

#[test]
fn blit_writes_each_pixel_once_and_flushes() {
    let board = Board::<bool, 3, 2>::new();
    let gray = RGB8::new(9, 9, 9);
    let mut sink = FrameSink::new(6);
    blit(&board, |_| gray, &mut sink).unwrap();
    assert_eq!(sink.write_count(), 6);
    assert_eq!(sink.show_count(), 1);
    assert!(sink.shown().iter().all(|&color| color == gray));
}

#[test]
fn blit_into_undersized_sink_fails() {
    let board = Board::<bool, 3, 2>::new();
    let mut sink = FrameSink::new(5);
    assert!(matches!(
        blit(&board, |_| RGB8::new(0, 0, 0), &mut sink),
        Err(Error::PixelOutOfRange { index: 5, .. })
    ));
}
