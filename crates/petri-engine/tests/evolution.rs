//! Golden-sequence evolution tests against the classic sample games.

use petri_engine::Board;

/// A solid 6×6 block on a 14×14 board runs the classic ring sequence:
/// block → diamond → ring → smaller diamond → still block of four.
/// The pattern never reaches within two cells of the edge, so wrapping
/// plays no part and the expected grids are exact.
#[test]
fn filled_square_ring_sequence() {
    let initial = [
        "..............",
        "..............",
        "..............",
        "..............",
        "....######....",
        "....######....",
        "....######....",
        "....######....",
        "....######....",
        "....######....",
        "..............",
        "..............",
        "..............",
        "..............",
    ];
    let steps: [&[&str]; 6] = [
        &[
            "..............",
            "..............",
            "..............",
            ".....####.....",
            "....#....#....",
            "...#......#...",
            "...#......#...",
            "...#......#...",
            "...#......#...",
            "....#....#....",
            ".....####.....",
            "..............",
            "..............",
            "..............",
        ],
        &[
            "..............",
            "..............",
            "......##......",
            ".....####.....",
            "....######....",
            "...##....##...",
            "..###....###..",
            "..###....###..",
            "...##....##...",
            "....######....",
            ".....####.....",
            "......##......",
            "..............",
            "..............",
        ],
        &[
            "..............",
            "..............",
            ".....#..#.....",
            "....#....#....",
            "...#......#...",
            "..#...##...#..",
            ".....#..#.....",
            ".....#..#.....",
            "..#...##...#..",
            "...#......#...",
            "....#....#....",
            ".....#..#.....",
            "..............",
            "..............",
        ],
        &[
            "..............",
            "..............",
            "..............",
            "....#....#....",
            "...#......#...",
            "......##......",
            ".....#..#.....",
            ".....#..#.....",
            "......##......",
            "...#......#...",
            "....#....#....",
            "..............",
            "..............",
            "..............",
        ],
        &[
            "..............",
            "..............",
            "..............",
            "..............",
            "..............",
            "......##......",
            ".....#..#.....",
            ".....#..#.....",
            "......##......",
            "..............",
            "..............",
            "..............",
            "..............",
            "..............",
        ],
        &[
            "..............",
            "..............",
            "..............",
            "..............",
            "..............",
            "......##......",
            ".....#..#.....",
            ".....#..#.....",
            "......##......",
            "..............",
            "..............",
            "..............",
            "..............",
            "..............",
        ],
    ];

    let mut board = Board::from_rows(&initial, '#').unwrap();
    assert_eq!(board.render('.', '#'), initial.join("\n"));

    for (generation, expected) in steps.iter().enumerate() {
        board.step().unwrap();
        assert_eq!(
            board.render('.', '#'),
            expected.join("\n"),
            "generation {}",
            generation + 1
        );
    }

    // Generation 5 onward is a stable tub-of-four ring: no more changes.
    let outcome = board.step().unwrap();
    assert!(outcome.changed.is_empty());
}

/// A blinker oscillates while a nearby block holds still, on the same
/// board — flips must be independent per neighborhood.
#[test]
fn blinker_and_block_coexist() {
    let initial = [
        ".......",
        ".###...",
        ".......",
        ".......",
        ".......",
        "...##..",
        "...##..",
        ".......",
        ".......",
    ];
    let vertical = [
        "..#....",
        "..#....",
        "..#....",
        ".......",
        ".......",
        "...##..",
        "...##..",
        ".......",
        ".......",
    ];

    let mut board = Board::from_rows(&initial, '#').unwrap();
    assert_eq!(board.render('.', '#'), initial.join("\n"));

    board.step().unwrap();
    assert_eq!(board.render('.', '#'), vertical.join("\n"));

    board.step().unwrap();
    assert_eq!(board.render('.', '#'), initial.join("\n"));
}

/// The blinker keeps period 2 over many generations, and each flip
/// reports exactly four changed cells.
#[test]
fn blinker_period_two_long_run() {
    let mut board = Board::from_rows(petri_test_utils::BLINKER_5X5, '#').unwrap();
    let horizontal = board.render('.', '#');
    board.step().unwrap();
    let vertical = board.render('.', '#');
    assert_ne!(horizontal, vertical);

    for generation in 2..=20u64 {
        let outcome = board.step().unwrap();
        assert_eq!(outcome.changed.len(), 4, "generation {generation}");
        let expected = if generation % 2 == 0 {
            &horizontal
        } else {
            &vertical
        };
        assert_eq!(&board.render('.', '#'), expected, "generation {generation}");
    }
}

/// A glider on a small torus wraps around both edges and arrives back at
/// its starting configuration after `4 * width` generations.
#[test]
fn glider_round_trips_the_torus() {
    let mut board = Board::from_rows(petri_test_utils::GLIDER_8X8, '#').unwrap();
    let initial = board.render('.', '#');

    for _ in 0..32 {
        board.step().unwrap();
    }
    assert_eq!(board.render('.', '#'), initial);
}
