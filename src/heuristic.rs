//! Distance estimates that steer A*.
//!
//! Every estimate is a pure function of the board. [`Heuristic::Zero`] turns
//! A* into uniform-cost search, [`Heuristic::Manhattan`] and
//! [`Heuristic::LinearConflict`] never overestimate, and the two inflated
//! variants deliberately do.

use crate::puzzle::Board;
use derive_more::{Display, Error};
use std::{fmt, str::FromStr};

/// Anything that can score a board for A*.
///
/// Implemented for [`Heuristic`] and for plain closures, so callers can plug
/// in their own estimate:
///
/// ```
/// use slider_puzzle::{Board, Estimate};
///
/// let misplaced = |board: &Board| {
///     board
///         .cells()
///         .filter(|&(row, col, tile)| {
///             tile != 0 && usize::from(tile) != row * board.size() + col + 1
///         })
///         .count() as u32
/// };
/// assert_eq!(misplaced.estimate(&Board::solved(4).unwrap()), 0);
/// ```
pub trait Estimate {
    fn estimate(&self, board: &Board) -> u32;
}

impl<F> Estimate for F
where
    F: Fn(&Board) -> u32,
{
    fn estimate(&self, board: &Board) -> u32 {
        self(board)
    }
}

/// The built-in estimates, dispatched by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Always 0; A* degenerates to Dijkstra.
    Zero,
    /// Sum of tile distances to their goal cells.
    Manhattan,
    /// Manhattan plus two moves per tile that must leave its goal row or column.
    LinearConflict,
    /// Per-tile `floor(2 * euclidean)`; overestimates.
    InflatedEuclidean,
    /// Twice Manhattan; overestimates.
    DoubledManhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Zero,
        Heuristic::Manhattan,
        Heuristic::LinearConflict,
        Heuristic::InflatedEuclidean,
        Heuristic::DoubledManhattan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Zero => "zero",
            Heuristic::Manhattan => "manhattan",
            Heuristic::LinearConflict => "linear-conflict",
            Heuristic::InflatedEuclidean => "inflated-euclidean",
            Heuristic::DoubledManhattan => "doubled-manhattan",
        }
    }

    /// Whether A* driven by this estimate is guaranteed to return a shortest path.
    pub fn is_admissible(&self) -> bool {
        matches!(
            self,
            Heuristic::Zero | Heuristic::Manhattan | Heuristic::LinearConflict
        )
    }
}

impl Estimate for Heuristic {
    fn estimate(&self, board: &Board) -> u32 {
        match self {
            Heuristic::Zero => zero(board),
            Heuristic::Manhattan => manhattan_distance(board),
            Heuristic::LinearConflict => manhattan_distance(board) + 2 * linear_conflicts(board),
            Heuristic::InflatedEuclidean => inflated_euclidean(board),
            Heuristic::DoubledManhattan => doubled_manhattan(board),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown heuristic {name:?}")]
pub struct UnknownHeuristic {
    pub name: String,
}

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "zero" | "dijkstra" => Ok(Heuristic::Zero),
            "manhattan" => Ok(Heuristic::Manhattan),
            "linear-conflict" => Ok(Heuristic::LinearConflict),
            "inflated-euclidean" | "euclidean" | "inadmissible" => {
                Ok(Heuristic::InflatedEuclidean)
            }
            "doubled-manhattan" => Ok(Heuristic::DoubledManhattan),
            _ => Err(UnknownHeuristic { name: s.to_owned() }),
        }
    }
}

/// Goal cell of a non-blank tile.
fn target(tile: u8, size: usize) -> (usize, usize) {
    let index = usize::from(tile) - 1;
    (index / size, index % size)
}

/// Row and column offsets of every non-blank tile from its goal cell.
fn displacements(board: &Board) -> impl Iterator<Item = (usize, usize)> + '_ {
    let size = board.size();
    board
        .cells()
        .filter(|&(_, _, tile)| tile != 0)
        .map(move |(row, col, tile)| {
            let (target_row, target_col) = target(tile, size);
            (row.abs_diff(target_row), col.abs_diff(target_col))
        })
}

pub fn zero(_board: &Board) -> u32 {
    0
}

pub fn manhattan_distance(board: &Board) -> u32 {
    displacements(board).map(|(dr, dc)| (dr + dc) as u32).sum()
}

pub fn doubled_manhattan(board: &Board) -> u32 {
    2 * manhattan_distance(board)
}

/// Each tile contributes `floor(2 * sqrt(dr² + dc²))`, truncated before summing.
pub fn inflated_euclidean(board: &Board) -> u32 {
    const FACTOR: f64 = 2.0;
    displacements(board)
        .map(|(dr, dc)| (FACTOR * ((dr * dr + dc * dc) as f64).sqrt()) as u32)
        .sum()
}

/// Tiles that have to step out of their goal row or column to let another
/// tile of the same line pass, summed over all rows and columns.
///
/// For a line the count is the number of goal-line tiles minus the longest run
/// of them already in increasing goal order.
pub fn linear_conflicts(board: &Board) -> u32 {
    let size = board.size();
    let mut conflicts = 0;

    for line in 0..size {
        // Row conflicts: tiles whose goal row is `line`, keyed by goal column.
        let row: Vec<usize> = (0..size)
            .map(|col| board.tile(line, col))
            .filter(|&tile| tile != 0 && target(tile, size).0 == line)
            .map(|tile| target(tile, size).1)
            .collect();
        conflicts += row.len() - longest_increasing_run(&row);

        // Column conflicts: tiles whose goal column is `line`, keyed by goal row.
        let column: Vec<usize> = (0..size)
            .map(|row| board.tile(row, line))
            .filter(|&tile| tile != 0 && target(tile, size).1 == line)
            .map(|tile| target(tile, size).0)
            .collect();
        conflicts += column.len() - longest_increasing_run(&column);
    }

    conflicts as u32
}

/// Length of the longest strictly increasing subsequence.
fn longest_increasing_run(values: &[usize]) -> usize {
    let mut best = vec![1; values.len()];
    for i in 0..values.len() {
        for j in 0..i {
            if values[j] < values[i] && best[j] + 1 > best[i] {
                best[i] = best[j] + 1;
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}
