//! Breadth-first and best-first search over the board graph.
//!
//! Discovered boards live in an arena; each node remembers the arena index of
//! the node that discovered it, so a path is rebuilt by walking parent indices
//! back to the root.

use crate::heuristic::{Estimate, Heuristic};
use crate::puzzle::{Board, Move};
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
    fmt,
    time::{Duration, Instant},
};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    /// The frontier emptied without reaching the goal.
    NoSolution,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Solved => write!(f, "solved"),
            Outcome::NoSolution => write!(f, "no solution found"),
        }
    }
}

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    AStar(Heuristic),
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "BFS"),
            Algorithm::AStar(Heuristic::Zero) => write!(f, "A* (zero / Dijkstra)"),
            Algorithm::AStar(heuristic) => write!(f, "A* ({})", heuristic),
        }
    }
}

/// Statistics and the solution path of one run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: Outcome,
    pub elapsed: Duration,
    /// Boards popped and expanded (stale A* entries excluded).
    pub states_processed: usize,
    /// Distinct boards seen by the run.
    pub states_discovered: usize,
    /// Root to goal inclusive; empty when unsolved.
    pub path: Vec<Board>,
}

impl SearchResult {
    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }

    /// Number of slides from the initial board to the goal.
    pub fn move_count(&self) -> Option<usize> {
        self.is_solved().then(|| self.path.len() - 1)
    }

    pub fn solution(&self) -> Option<&Board> {
        self.path.last()
    }

    /// The slides along [`SearchResult::path`].
    pub fn moves(&self) -> Vec<Move> {
        self.path
            .windows(2)
            .filter_map(|pair| Move::between(&pair[0], &pair[1]))
            .collect()
    }
}

struct Node {
    board: Board,
    parent: Option<usize>,
    cost: u32,
}

#[derive(Default)]
struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn push(&mut self, board: Board, parent: Option<usize>, cost: u32) -> usize {
        self.nodes.push(Node {
            board,
            parent,
            cost,
        });
        self.nodes.len() - 1
    }

    fn board(&self, id: usize) -> &Board {
        &self.nodes[id].board
    }

    fn cost(&self, id: usize) -> u32 {
        self.nodes[id].cost
    }

    fn path_to(&self, id: usize) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.cost(id) as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            path.push(self.board(current).clone());
            cursor = self.nodes[current].parent;
        }
        path.reverse();
        path
    }
}

/// Creates an engine rooted at `initial`.
pub fn new_search(initial: Board) -> SearchEngine {
    SearchEngine::new(initial)
}

/// Solves from a fixed initial board. Each run builds its own frontier, so
/// runs never observe each other and the engine can be reused.
///
/// ```
/// use slider_puzzle::{Board, Heuristic, Move, SearchEngine};
///
/// let start = Board::solved(4).unwrap().apply_move(Move::Up).unwrap();
/// let engine = SearchEngine::new(start);
///
/// let bfs = engine.run_bfs();
/// let astar = engine.run_astar(&Heuristic::Manhattan);
/// assert_eq!(bfs.move_count(), Some(1));
/// assert_eq!(astar.moves(), vec![Move::Down]);
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine {
    initial: Board,
}

impl SearchEngine {
    pub fn new(initial: Board) -> Self {
        Self { initial }
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    /// Replaces the initial board for subsequent runs.
    pub fn reset(&mut self, initial: Board) {
        self.initial = initial;
    }

    pub fn run(&self, algorithm: Algorithm) -> SearchResult {
        match algorithm {
            Algorithm::Bfs => self.run_bfs(),
            Algorithm::AStar(heuristic) => self.run_astar(&heuristic),
        }
    }

    /// FIFO expansion. Every edge costs one move, so the first goal dequeued
    /// is at minimum depth.
    pub fn run_bfs(&self) -> SearchResult {
        let start = Instant::now();
        debug!(
            "BFS: starting from a {0}x{0} board",
            self.initial.size()
        );

        let mut arena = Arena::default();
        let mut visited: FxHashSet<Board> = FxHashSet::default();
        let mut frontier = VecDeque::new();
        let mut states_processed = 0;

        visited.insert(self.initial.clone());
        frontier.push_back(arena.push(self.initial.clone(), None, 0));

        while let Some(current) = frontier.pop_front() {
            states_processed += 1;

            if arena.board(current).is_goal() {
                return finish("BFS", &arena, Some(current), states_processed, visited.len(), start);
            }

            let cost = arena.cost(current) + 1;
            let neighbors = arena.board(current).neighbors();
            for neighbor in neighbors {
                if visited.insert(neighbor.clone()) {
                    frontier.push_back(arena.push(neighbor, Some(current), cost));
                }
            }
        }

        finish("BFS", &arena, None, states_processed, visited.len(), start)
    }

    /// Best-first expansion by `cost + estimate`, ties broken by insertion
    /// order. A board is re-queued only when a strictly cheaper path to it
    /// appears; superseded queue entries are skipped when popped.
    pub fn run_astar<H: Estimate + ?Sized>(&self, heuristic: &H) -> SearchResult {
        let start = Instant::now();
        debug!(
            "A*: starting from a {0}x{0} board",
            self.initial.size()
        );

        let mut arena = Arena::default();
        // Board -> node holding its cheapest known cost.
        let mut best: FxHashMap<Board, usize> = FxHashMap::default();
        let mut open = BinaryHeap::new();
        let mut sequence: u64 = 0;
        let mut states_processed = 0;

        let root = arena.push(self.initial.clone(), None, 0);
        best.insert(self.initial.clone(), root);
        open.push(Reverse((heuristic.estimate(&self.initial), sequence, root)));

        while let Some(Reverse((_, _, current))) = open.pop() {
            if best.get(arena.board(current)) != Some(&current) {
                continue;
            }
            states_processed += 1;

            if arena.board(current).is_goal() {
                return finish("A*", &arena, Some(current), states_processed, best.len(), start);
            }

            let new_cost = arena.cost(current) + 1;
            let neighbors = arena.board(current).neighbors();
            for neighbor in neighbors {
                match best.get(&neighbor) {
                    Some(&known) if new_cost >= arena.cost(known) => continue,
                    Some(&known) => trace!(
                        "A*: relaxing board from cost {} to {}",
                        arena.cost(known),
                        new_cost
                    ),
                    None => {}
                }

                let priority = new_cost.saturating_add(heuristic.estimate(&neighbor));
                let id = arena.push(neighbor.clone(), Some(current), new_cost);
                best.insert(neighbor, id);
                sequence += 1;
                open.push(Reverse((priority, sequence, id)));
            }
        }

        finish("A*", &arena, None, states_processed, best.len(), start)
    }
}

fn finish(
    label: &str,
    arena: &Arena,
    goal: Option<usize>,
    states_processed: usize,
    states_discovered: usize,
    start: Instant,
) -> SearchResult {
    let elapsed = start.elapsed();
    let (outcome, path) = match goal {
        Some(id) => (Outcome::Solved, arena.path_to(id)),
        None => (Outcome::NoSolution, Vec::new()),
    };
    debug!(
        "{}: {} after {} processed / {} discovered states in {:?}",
        label, outcome, states_processed, states_discovered, elapsed
    );
    SearchResult {
        outcome,
        elapsed,
        states_processed,
        states_discovered,
        path,
    }
}
