//! Planner bookkeeping types and failure taxonomy.

use crate::core::GridCoord;
use std::cmp::Ordering;
use thiserror::Error;

/// Why a search produced no route.
///
/// `AlreadyAtDestination` rides the error channel so every non-route outcome
/// is a distinct variant, but it is a terminal-success signal: the mission
/// runner alone decides what each variant means.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum PlannerError {
    #[error("Coordinate {0} is outside the grid")]
    InvalidCoordinate(GridCoord),

    #[error("Cell {0} is occupied")]
    BlockedCell(GridCoord),

    #[error("Source and destination are the same cell")]
    AlreadyAtDestination,

    #[error("No path to the destination exists")]
    NoPathFound,

    #[error("Search budget exhausted after expanding {expanded} cells")]
    SearchBudgetExceeded { expanded: usize },
}

/// Per-cell search bookkeeping, allocated for the duration of one search.
///
/// A cell starts undiscovered (`f = +inf`); the source is its own parent,
/// which is the sentinel that terminates path reconstruction.
#[derive(Clone, Copy, Debug)]
pub(super) struct CellRecord {
    pub parent: GridCoord,
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

impl CellRecord {
    pub fn undiscovered() -> Self {
        Self {
            parent: GridCoord::default(),
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
        }
    }

    #[inline]
    pub fn is_undiscovered(&self) -> bool {
        self.f.is_infinite()
    }
}

/// Frontier entry: min-ordered on `f`, with insertion order (`seq`) breaking
/// ties so equal-cost nodes pop in the order they were generated.
#[derive(Clone, Copy, Debug)]
pub(super) struct FrontierNode {
    pub coord: GridCoord,
    pub f: f64,
    pub seq: u64,
}

impl Eq for FrontierNode {}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; earlier seq wins ties.
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A planned route from source to destination.
///
/// Consecutive cells are unit-adjacent along one axis; the first cell is the
/// source and the last the destination.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Path cells, source first
    pub cells: Vec<GridCoord>,
    /// Accumulated step cost (1.0 per edge)
    pub cost: f64,
    /// Cells expanded during the search
    pub nodes_expanded: usize,
}

impl Route {
    /// Number of edges (motion steps) in the route
    pub fn edge_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}
