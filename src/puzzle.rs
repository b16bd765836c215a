use derive_more::{Display, Error};
use rand::Rng;
use std::{fmt, str::FromStr};

/// Smallest supported grid dimension.
pub const MIN_SIZE: usize = 2;
/// Largest supported grid dimension; every tile label fits in a `u8`.
pub const MAX_SIZE: usize = 15;

/// A single slide, named by the direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Neighbor generation order. Search tie-breaking depends on it.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column offset applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// The slide that turns `from` into `to`, if they are one slide apart.
    pub fn between(from: &Board, to: &Board) -> Option<Move> {
        if from.size != to.size {
            return None;
        }
        let (from_row, from_col) = from.blank();
        let (to_row, to_col) = to.blank();
        let offset = (
            to_row as isize - from_row as isize,
            to_col as isize - from_col as isize,
        );
        Move::ALL
            .into_iter()
            .find(|m| m.as_offset() == offset)
            .filter(|&m| from.apply_move(m).as_ref() == Some(to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Reasons a grid cannot be turned into a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display("unsupported board size {size}")]
    UnsupportedSize { size: usize },
    #[display("expected {expected} tiles, found {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[display("{found} tiles do not form a square grid")]
    NotSquare { found: usize },
    #[display("row {row} has {len} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("tile {value} is out of range (max {max})")]
    TileOutOfRange { value: usize, max: usize },
    #[display("tile {value} appears more than once")]
    DuplicateTile { value: usize },
    #[display("board has no blank (0) tile")]
    MissingBlank,
    #[display("invalid tile {token:?}")]
    InvalidToken { token: String },
}

/// A square sliding-tile grid with exactly one blank, stored row-major.
///
/// Equality and hashing cover the grid only: two boards reached by different
/// paths are the same search vertex. The blank index is derived from the
/// tiles, so including it in the derives does not change that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u8>,
    blank: usize,
}

impl Board {
    /// Builds a board from row-major tiles, rejecting anything that is not a
    /// permutation of `0..size * size`.
    ///
    /// ```
    /// use slider_puzzle::{Board, BoardError};
    ///
    /// let board = Board::new(2, vec![1, 2, 0, 3]).unwrap();
    /// assert_eq!(board.blank(), (1, 0));
    ///
    /// assert_eq!(
    ///     Board::new(2, vec![1, 1, 0, 3]),
    ///     Err(BoardError::DuplicateTile { value: 1 }),
    /// );
    /// ```
    pub fn new(size: usize, tiles: Vec<u8>) -> Result<Self, BoardError> {
        check_size(size)?;
        let cells = size * size;
        if tiles.len() != cells {
            return Err(BoardError::WrongTileCount {
                expected: cells,
                found: tiles.len(),
            });
        }

        if let Some(&value) = tiles.iter().find(|&&t| usize::from(t) >= cells) {
            return Err(BoardError::TileOutOfRange {
                value: usize::from(value),
                max: cells - 1,
            });
        }
        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or(BoardError::MissingBlank)?;

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let value = usize::from(tile);
            if seen[value] {
                return Err(BoardError::DuplicateTile { value });
            }
            seen[value] = true;
        }

        Ok(Self { size, tiles, blank })
    }

    /// Builds a board from a slice of rows.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        check_size(size)?;
        let mut tiles = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(BoardError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            tiles.extend_from_slice(values);
        }
        Self::new(size, tiles)
    }

    /// The goal configuration: `1..size²-1` in order with the blank bottom-right.
    pub fn solved(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        let cells = size * size;
        // MAX_SIZE keeps every label below 256.
        let tiles: Vec<u8> = (1..cells as u8).chain(std::iter::once(0)).collect();
        Ok(Self {
            size,
            tiles,
            blank: cells - 1,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * self.size + col]
    }

    /// Row and column of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Every cell as `(row, col, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let size = self.size;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (i / size, i % size, tile))
    }

    /// Slides the tile next to the blank into it, leaving `self` untouched.
    /// Returns `None` when the blank would leave the grid.
    pub fn apply_move(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.as_offset();
        let (row, col) = self.blank();
        let new_row = row.checked_add_signed(dr).filter(|&r| r < self.size)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < self.size)?;

        let target = new_row * self.size + new_col;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Self {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Adjacent boards in [`Move::ALL`] order.
    pub fn neighbors(&self) -> Vec<Self> {
        Move::ALL
            .iter()
            .filter_map(|&m| self.apply_move(m))
            .collect()
    }

    /// Adjacent boards paired with the slide that produces them.
    pub fn neighbor_moves(&self) -> Vec<(Move, Self)> {
        Move::ALL
            .iter()
            .filter_map(|&m| self.apply_move(m).map(|board| (m, board)))
            .collect()
    }

    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles[last] == 0
            && self.tiles[..last]
                .iter()
                .zip(1u8..)
                .all(|(&tile, expected)| tile == expected)
    }

    /// Whether the goal is reachable, by inversion parity.
    pub fn is_solvable(&self) -> bool {
        let inversions = count_inversions(&self.tiles);
        let (empty_row, _) = self.blank();

        if self.size % 2 == 1 {
            // Odd width: solvable iff inversions is even
            inversions % 2 == 0
        } else {
            // Even width: solvable iff inversions plus the blank's row is odd
            (inversions + empty_row) % 2 == 1
        }
    }

    /// Random walk of `moves` slides from `self`, picking uniformly among the
    /// neighbors at every step. Walking back is allowed, so the result is often
    /// fewer than `moves` slides from the start.
    pub fn scramble<R: Rng + ?Sized>(&self, moves: usize, rng: &mut R) -> Self {
        let mut board = self.clone();
        for _ in 0..moves {
            let mut neighbors = board.neighbors();
            let pick = rng.gen_range(0..neighbors.len());
            board = neighbors.swap_remove(pick);
        }
        board
    }
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::UnsupportedSize { size })
    }
}

fn count_inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

/// Parses whitespace- or comma-separated tiles in row-major order; the grid
/// size is inferred from the tile count.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                let value: usize = token.parse().map_err(|_| BoardError::InvalidToken {
                    token: token.to_owned(),
                })?;
                u8::try_from(value).map_err(|_| BoardError::TileOutOfRange {
                    value,
                    max: usize::from(u8::MAX),
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let found = tiles.len();
        let size = (MIN_SIZE..=MAX_SIZE)
            .find(|size| size * size == found)
            .ok_or(BoardError::NotSquare { found })?;
        Self::new(size, tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
