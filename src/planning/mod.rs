//! A* route planning over the occupancy grid.

mod astar;
mod types;

pub use astar::RoutePlanner;
pub use types::{PlannerError, Route};
