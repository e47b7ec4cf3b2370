//! # YatraNav: Occupancy-Grid Navigation for an Ultrasonic Rover
//!
//! A navigation controller for a small ground vehicle that explores an
//! unknown planar environment with a single steerable range sensor. Each
//! drive cycle it:
//!
//! 1. **Scans**: sweeps the sensor across a fan of angles and projects the
//!    readings into a fixed-size binary occupancy grid, joining consecutive
//!    detections with DDA-interpolated lines
//! 2. **Routes**: runs A* over the grid from the believed position to the
//!    goal (4-connected, unit step cost, Euclidean heuristic)
//! 3. **Moves**: translates the route into discrete motion primitives
//!    (advance, retreat, pivot left/right) issued through the actuator
//!    capability
//! 4. **Updates**: folds the accumulated displacement into the believed
//!    position and resets the grid for the next sweep
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yatra_nav::config::YatraConfig;
//! use yatra_nav::hardware::create_hardware;
//! use yatra_nav::mission::MissionRunner;
//!
//! let config = YatraConfig::default();
//! let (mut sensor, mut actuator) = create_hardware(&config.hardware).unwrap();
//! let mut runner = MissionRunner::new(config);
//! let report = runner.run(sensor.as_mut(), actuator.as_mut()).unwrap();
//! println!("Reached {} in {} cycles", report.final_position, report.cycles);
//! ```
//!
//! ## Coordinate Frame
//!
//! Grid coordinate `x` is the forward (row) axis and `y` the lateral
//! (column) axis; the vehicle advances along +x and +y is to its left. The
//! vehicle's row at mapping time (`sweep.origin_row`) anchors the sensor
//! projection.
//!
//! ## Architecture
//!
//! - [`core`]: integer geometry ([`core::GridCoord`], [`core::Displacement`])
//! - [`grid`]: occupancy grid storage, fan-sweep builder, DDA rasterizer
//! - [`planning`]: A* route planner and its failure taxonomy
//! - [`motion`]: route-to-primitive translation and actuation timing
//! - [`mission`]: the navigation state machine
//! - [`hardware`]: sensor/actuator capability traits and simulated backends
//! - [`io`]: plain-text grid snapshots for offline debugging
//!
//! The pipeline is single-threaded and synchronous: each stage runs to
//! completion on values passed by exclusive reference, so the core needs no
//! locks or channels. Only the hardware boundary is abstracted behind
//! traits, which is what lets the whole stack run against simulated devices.

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod hardware;
pub mod io;
pub mod mission;
pub mod motion;
pub mod planning;

pub use crate::core::{Displacement, GridCoord};
pub use config::YatraConfig;
pub use error::{Result, YatraError};
pub use grid::{GridBuilder, OccupancyGrid};
pub use mission::{MissionReport, MissionRunner, NavState};
pub use motion::{MotionPrimitive, MotionTranslator};
pub use planning::{PlannerError, Route, RoutePlanner};
