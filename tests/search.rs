use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use slider_puzzle::{Board, Heuristic, Outcome, SearchEngine, SearchResult};

fn any_board(size: usize) -> impl Strategy<Value = Board> {
    let cells = (size * size) as u8;
    Just((0..cells).collect::<Vec<u8>>())
        .prop_shuffle()
        .prop_map(move |tiles| Board::new(size, tiles).unwrap())
}

fn scrambled(size: usize, max_moves: usize) -> impl Strategy<Value = Board> {
    (any::<u64>(), 0..=max_moves).prop_map(move |(seed, moves)| {
        Board::solved(size)
            .unwrap()
            .scramble(moves, &mut StdRng::seed_from_u64(seed))
    })
}

fn scrambled_with_seed(size: usize, moves: usize, seed: u64) -> Board {
    Board::solved(size)
        .unwrap()
        .scramble(moves, &mut StdRng::seed_from_u64(seed))
}

/// The path starts at `initial`, ends at the goal, and every step is one slide.
fn is_valid_solution(result: &SearchResult, initial: &Board) -> bool {
    result.outcome == Outcome::Solved
        && result.path.first() == Some(initial)
        && result.solution().is_some_and(Board::is_goal)
        && result
            .path
            .windows(2)
            .all(|pair| pair[0].neighbors().contains(&pair[1]))
}

proptest! {
    #[test]
    fn neighbors_are_single_adjacent_swaps(board in any_board(4)) {
        let (row, col) = board.blank();
        let expected = 4
            - usize::from(row == 0)
            - usize::from(row == 3)
            - usize::from(col == 0)
            - usize::from(col == 3);
        let neighbors = board.neighbors();
        prop_assert_eq!(neighbors.len(), expected);

        for neighbor in &neighbors {
            let changed: Vec<usize> = (0..16)
                .filter(|&i| board.tiles()[i] != neighbor.tiles()[i])
                .collect();
            prop_assert_eq!(changed.len(), 2);

            let (new_row, new_col) = neighbor.blank();
            prop_assert_eq!(row.abs_diff(new_row) + col.abs_diff(new_col), 1);
            prop_assert_eq!(board.tile(new_row, new_col), neighbor.tile(row, col));
        }
    }

    #[test]
    fn goal_iff_canonical_layout(board in any_board(4)) {
        let canonical: Vec<u8> = (1..16).chain(std::iter::once(0)).collect();
        prop_assert_eq!(board.is_goal(), board.tiles() == canonical.as_slice());
    }

    #[test]
    fn scrambling_preserves_solvability(board in scrambled(4, 60)) {
        prop_assert!(board.is_solvable());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn optimal_searches_agree_on_move_count(board in scrambled(3, 20)) {
        let engine = SearchEngine::new(board.clone());
        let bfs = engine.run_bfs();
        prop_assert!(is_valid_solution(&bfs, &board));

        for heuristic in [Heuristic::Zero, Heuristic::Manhattan, Heuristic::LinearConflict] {
            let astar = engine.run_astar(&heuristic);
            prop_assert!(is_valid_solution(&astar, &board));
            prop_assert_eq!(astar.move_count(), bfs.move_count(), "{}", heuristic);
        }
    }

    #[test]
    fn inflated_heuristics_find_valid_but_possibly_longer_paths(board in scrambled(3, 20)) {
        let engine = SearchEngine::new(board.clone());
        let optimal = engine.run_astar(&Heuristic::Manhattan).move_count().unwrap();

        for heuristic in [Heuristic::InflatedEuclidean, Heuristic::DoubledManhattan] {
            let result = engine.run_astar(&heuristic);
            prop_assert!(is_valid_solution(&result, &board));
            prop_assert!(result.move_count().unwrap() >= optimal, "{}", heuristic);
        }
    }
}

#[test]
fn bfs_is_deterministic_across_resets() {
    let board = scrambled_with_seed(4, 20, 11);
    let mut engine = SearchEngine::new(Board::solved(4).unwrap());

    engine.reset(board.clone());
    let first = engine.run_bfs();
    engine.reset(board);
    let second = engine.run_bfs();

    assert_eq!(first.states_processed, second.states_processed);
    assert_eq!(first.move_count(), second.move_count());
    assert_eq!(first.path, second.path);
}

#[test]
fn twenty_slide_fifteen_puzzles_match_between_bfs_and_manhattan() {
    for seed in 1..=3 {
        let board = scrambled_with_seed(4, 20, seed);
        let engine = SearchEngine::new(board.clone());

        let bfs = engine.run_bfs();
        let manhattan = engine.run_astar(&Heuristic::Manhattan);
        let euclidean = engine.run_astar(&Heuristic::InflatedEuclidean);

        assert!(is_valid_solution(&bfs, &board));
        assert!(is_valid_solution(&manhattan, &board));
        assert!(is_valid_solution(&euclidean, &board));
        assert_eq!(bfs.move_count(), manhattan.move_count(), "seed {seed}");
        assert!(manhattan.move_count() <= euclidean.move_count(), "seed {seed}");
        assert!(bfs.move_count().unwrap() <= 20);
    }
}

#[test]
fn twenty_four_puzzle_solves_with_manhattan() {
    let board = scrambled_with_seed(5, 20, 5);
    let engine = SearchEngine::new(board.clone());
    let manhattan = engine.run_astar(&Heuristic::Manhattan);
    let conflicts = engine.run_astar(&Heuristic::LinearConflict);

    assert!(is_valid_solution(&manhattan, &board));
    assert_eq!(manhattan.move_count(), conflicts.move_count());
}

#[test]
fn unsolvable_eight_puzzle_terminates_without_solution() {
    let board = Board::from_rows(&[[1u8, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
    assert!(!board.is_solvable());

    let result = SearchEngine::new(board).run_astar(&Heuristic::Manhattan);
    assert_eq!(result.outcome, Outcome::NoSolution);
    assert_eq!(result.states_discovered, 181_440);
}
