//! Incremental-tracking behavior: the engine must only ever touch the
//! neighborhood of activity, and quiet regions must cost nothing.

use petri_engine::{Board, BoardConfig};
use petri_test_utils::GLIDER_8X8;

/// A glider's dirty set stays small and bounded no matter how long it
/// travels — the rest of the board is never rescanned.
#[test]
fn glider_dirty_set_stays_bounded() {
    let mut board = Board::from_rows(GLIDER_8X8, '#').unwrap();
    for generation in 0..100u64 {
        let outcome = board.step().unwrap();
        // 5 live cells plus their tracked border; generously under the
        // 64-cell board, and far under a full rescan.
        assert!(
            outcome.metrics.requeued <= 40,
            "generation {generation}: dirty set grew to {}",
            outcome.metrics.requeued
        );
        assert!(outcome.metrics.evaluated <= 40, "generation {generation}");
    }
}

/// A large board with a small pattern: evaluation cost is proportional
/// to the pattern's neighborhood, not the board area.
#[test]
fn quiet_regions_are_never_visited() {
    let mut board = Board::new(BoardConfig {
        width: 512,
        height: 512,
        workers: Some(4),
        ..BoardConfig::default()
    })
    .unwrap();
    // Blinker in the middle of a quarter-million cells.
    for x in [200, 201, 202] {
        board.set_cell_alive(x, 200, true).unwrap();
    }

    for _ in 0..50 {
        let outcome = board.step().unwrap();
        assert!(outcome.metrics.evaluated <= 15 + 6);
        assert_eq!(outcome.changed.len(), 4);
    }
}

/// Wiping out all life drains the dirty set completely; stepping an
/// empty board afterwards does no work at all.
#[test]
fn extinction_drains_the_dirty_set() {
    let mut board = Board::from_rows(GLIDER_8X8, '#').unwrap();
    board.step().unwrap();
    board.step().unwrap();

    // Kill every live cell between generations.
    for y in 0..8 {
        for x in 0..8 {
            board.set_cell_alive(x, y, false).unwrap();
        }
    }

    // The edits re-seed the dead neighborhoods; they evaluate once, find
    // nothing, and fall out of the dirty set.
    board.step().unwrap();
    let outcome = board.step().unwrap();
    assert_eq!(outcome.metrics.requeued, 0);

    let outcome = board.step().unwrap();
    assert_eq!(outcome.metrics.evaluated, 0);
    assert!(outcome.changed.is_empty());
    assert_eq!(board.render('.', '#').matches('#').count(), 0);
}

/// Editing one cell of a quiet board wakes exactly its neighborhood.
#[test]
fn single_edit_wakes_one_neighborhood() {
    let mut board = Board::new(BoardConfig {
        width: 64,
        height: 64,
        workers: Some(2),
        ..BoardConfig::default()
    })
    .unwrap();
    board.step().unwrap();
    assert_eq!(board.last_metrics().evaluated, 0);

    board.set_cell_alive(10, 10, true).unwrap();
    let outcome = board.step().unwrap();
    assert_eq!(outcome.metrics.evaluated, 9, "cell plus its 8 neighbors");
    assert_eq!(outcome.changed.len(), 1, "the lone cell dies");
}
