//! Mission state machine: the scan, detect, route, move, update cycle.

mod runner;
mod state;

pub use runner::{MissionReport, MissionRunner};
pub use state::NavState;
