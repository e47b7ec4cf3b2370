//! Mission runner: drives one scan, detect, route, move, update cycle at a
//! time until the goal is reached.
//!
//! The runner is the sole owner of the occupancy grid and the believed
//! vehicle position, and the sole decision point for planner failures:
//! `AlreadyAtDestination` finishes the mission, `InvalidCoordinate` aborts it
//! as a configuration error, and every other failure triggers a bounded
//! re-scan retry.

use crate::config::YatraConfig;
use crate::core::{Displacement, GridCoord};
use crate::error::{Result, YatraError};
use crate::grid::{GridBuilder, OccupancyGrid};
use crate::hardware::{DriveActuator, RangeSensor};
use crate::mission::NavState;
use crate::motion::MotionTranslator;
use crate::planning::{PlannerError, RoutePlanner};
use log::{debug, info, warn};
use std::time::Duration;

/// Summary of a completed mission.
#[derive(Clone, Debug)]
pub struct MissionReport {
    /// Full drive cycles executed (scan through update)
    pub cycles: usize,
    /// Motion primitives issued across all cycles
    pub primitives_issued: usize,
    /// Final believed position
    pub final_position: GridCoord,
}

/// The navigation state machine.
pub struct MissionRunner {
    config: YatraConfig,
    builder: GridBuilder,
    planner: RoutePlanner,
    translator: MotionTranslator,
    grid: OccupancyGrid,
    position: GridCoord,
    goal: GridCoord,
    state: NavState,
    pending_route: Option<Vec<GridCoord>>,
    pending_displacement: Displacement,
    route_retries: usize,
    cycles: usize,
    primitives_issued: usize,
}

impl MissionRunner {
    /// Create a runner from configuration.
    pub fn new(config: YatraConfig) -> Self {
        let builder = GridBuilder::new(
            config.grid.clone(),
            config.sweep.clone(),
            config.output.clone(),
        );
        let planner = RoutePlanner::new(config.planner.clone());
        let translator = MotionTranslator::new(config.motion.clone());
        let grid = OccupancyGrid::new(config.grid.rows, config.grid.cols);
        let position = GridCoord::new(config.mission.start_x, config.mission.start_y);
        let goal = GridCoord::new(config.mission.goal_x, config.mission.goal_y);

        Self {
            config,
            builder,
            planner,
            translator,
            grid,
            position,
            goal,
            state: NavState::Scan,
            pending_route: None,
            pending_displacement: Displacement::ZERO,
            route_retries: 0,
            cycles: 0,
            primitives_issued: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Believed vehicle position
    pub fn position(&self) -> GridCoord {
        self.position
    }

    /// Run the mission to completion.
    pub fn run(
        &mut self,
        sensor: &mut dyn RangeSensor,
        actuator: &mut dyn DriveActuator,
    ) -> Result<MissionReport> {
        info!(
            "Mission start: position={} goal={}",
            self.position, self.goal
        );

        // Bring both servos to neutral before the first sweep.
        sensor.set_orientation(0)?;
        actuator.set_steering(0.0)?;
        actuator.stop()?;

        while !self.state.is_terminal() {
            self.step(sensor, actuator)?;
            self.pause();
        }

        let report = MissionReport {
            cycles: self.cycles,
            primitives_issued: self.primitives_issued,
            final_position: self.position,
        };
        info!(
            "Destination reached after {} cycles and {} primitives, final position {}",
            report.cycles, report.primitives_issued, report.final_position
        );
        Ok(report)
    }

    /// Advance the state machine by one transition.
    pub fn step(
        &mut self,
        sensor: &mut dyn RangeSensor,
        actuator: &mut dyn DriveActuator,
    ) -> Result<()> {
        debug!("State: {}", self.state.name());

        match self.state {
            NavState::Scan => {
                self.builder.scan(sensor, &mut self.grid);
                self.state = NavState::Detect;
            }
            NavState::Detect => {
                // Camera object detection lives outside this crate; the state
                // stays in the cycle as a pass-through.
                debug!("Object detection not implemented, continuing");
                self.state = NavState::Route;
            }
            NavState::Route => self.route()?,
            NavState::Move => match self.pending_route.take() {
                Some(cells) => {
                    let (primitives, displacement) =
                        self.translator.translate(actuator, cells)?;
                    self.primitives_issued += primitives.len();
                    self.pending_displacement = displacement;
                    self.state = NavState::Update;
                }
                None => {
                    warn!("Entered Move without a pending route");
                    self.state = NavState::Fault;
                }
            },
            NavState::Update => {
                self.position = self.position + self.pending_displacement;
                self.pending_displacement = Displacement::ZERO;
                info!("Vehicle position: {}", self.position);
                self.grid.reset();
                self.cycles += 1;
                self.state = NavState::Scan;
            }
            NavState::Finished => {}
            NavState::Fault => {
                warn!("Unrecognized state, defaulting to Detect");
                self.state = NavState::Detect;
            }
        }

        Ok(())
    }

    /// The Route state: plan and decide on the outcome.
    fn route(&mut self) -> Result<()> {
        match self.planner.search(&self.grid, self.position, self.goal) {
            Ok(route) => {
                info!(
                    "Route found: {} steps, cost {:.0}, {} cells expanded",
                    route.edge_count(),
                    route.cost,
                    route.nodes_expanded
                );
                self.pending_route = Some(route.cells);
                self.route_retries = 0;
                self.state = NavState::Move;
            }
            Err(PlannerError::AlreadyAtDestination) => {
                self.state = NavState::Finished;
            }
            Err(PlannerError::InvalidCoordinate(coord)) => {
                return Err(YatraError::Config(format!(
                    "Mission endpoint {} is outside the {}x{} grid",
                    coord,
                    self.grid.rows(),
                    self.grid.cols()
                )));
            }
            Err(e) => {
                // NoPathFound, BlockedCell, and an exhausted search budget
                // are all treated as artifacts of one noisy sweep: re-scan,
                // bounded by the retry budget.
                self.route_retries += 1;
                if self.route_retries > self.config.mission.max_route_retries {
                    return Err(YatraError::MissionFailed(format!(
                        "Routing failed {} times in a row: {}",
                        self.route_retries, e
                    )));
                }
                warn!(
                    "Routing failed ({}), re-scanning (attempt {}/{})",
                    e, self.route_retries, self.config.mission.max_route_retries
                );
                self.grid.reset();
                self.state = NavState::Scan;
            }
        }
        Ok(())
    }

    fn pause(&self) {
        if self.config.mission.cycle_pause_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.mission.cycle_pause_ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MissionConfig, MotionConfig, OutputConfig, SweepConfig, YatraConfig};
    use crate::hardware::sim::{RecordingActuator, SimRangeSensor};

    fn test_config(start: (i32, i32), goal: (i32, i32)) -> YatraConfig {
        YatraConfig {
            sweep: SweepConfig {
                settle_ms: 0,
                ..SweepConfig::default()
            },
            motion: MotionConfig {
                forward_ms: 0,
                backward_ms: 0,
                turn_ms: 0,
                nudge_ms: 0,
                ..MotionConfig::default()
            },
            mission: MissionConfig {
                start_x: start.0,
                start_y: start.1,
                goal_x: goal.0,
                goal_y: goal.1,
                cycle_pause_ms: 0,
                ..MissionConfig::default()
            },
            output: OutputConfig {
                save_snapshot: false,
                ..OutputConfig::default()
            },
            ..YatraConfig::default()
        }
    }

    #[test]
    fn test_open_field_mission_reaches_goal() {
        let mut runner = MissionRunner::new(test_config((19, 0), (19, 3)));
        let mut sensor = SimRangeSensor::open_field();
        let mut actuator = RecordingActuator::new();

        let report = runner.run(&mut sensor, &mut actuator).unwrap();

        assert_eq!(report.final_position, GridCoord::new(19, 3));
        assert_eq!(report.primitives_issued, 3);
        assert_eq!(report.cycles, 1);
        assert_eq!(runner.state(), NavState::Finished);
    }

    #[test]
    fn test_no_path_triggers_rescan() {
        let mut runner = MissionRunner::new(test_config((2, 0), (2, 9)));
        let mut sensor = SimRangeSensor::open_field();
        let mut actuator = RecordingActuator::new();

        // Wall the goal off completely, then force a Route step.
        for x in 0..runner.grid.rows() as i32 {
            runner.grid.mark_occupied(GridCoord::new(x, 5));
        }
        runner.state = NavState::Route;
        runner.step(&mut sensor, &mut actuator).unwrap();

        assert_eq!(runner.state(), NavState::Scan);
        assert_eq!(runner.route_retries, 1);
        // The grid was reset for the fresh sweep.
        assert_eq!(runner.grid.occupied_count(), 0);
    }

    #[test]
    fn test_route_retry_budget_aborts_mission() {
        let mut runner = MissionRunner::new(test_config((2, 0), (2, 9)));
        let mut sensor = SimRangeSensor::open_field();
        let mut actuator = RecordingActuator::new();

        runner.route_retries = runner.config.mission.max_route_retries;
        for x in 0..runner.grid.rows() as i32 {
            runner.grid.mark_occupied(GridCoord::new(x, 5));
        }
        runner.state = NavState::Route;

        let result = runner.step(&mut sensor, &mut actuator);
        assert!(matches!(result, Err(YatraError::MissionFailed(_))));
    }

    #[test]
    fn test_blocked_goal_follows_retry_policy() {
        let mut runner = MissionRunner::new(test_config((2, 0), (2, 9)));
        let mut sensor = SimRangeSensor::open_field();
        let mut actuator = RecordingActuator::new();

        runner.grid.mark_occupied(GridCoord::new(2, 9));
        runner.state = NavState::Route;
        runner.step(&mut sensor, &mut actuator).unwrap();

        assert_eq!(runner.state(), NavState::Scan);
        assert_eq!(runner.route_retries, 1);
    }

    #[test]
    fn test_invalid_goal_is_config_error() {
        let mut runner = MissionRunner::new(test_config((19, 0), (50, 50)));
        let mut sensor = SimRangeSensor::open_field();
        let mut actuator = RecordingActuator::new();

        runner.state = NavState::Route;
        let result = runner.step(&mut sensor, &mut actuator);
        assert!(matches!(result, Err(YatraError::Config(_))));
    }

    #[test]
    fn test_fault_state_recovers_via_detect() {
        let mut runner = MissionRunner::new(test_config((19, 0), (19, 3)));
        let mut sensor = SimRangeSensor::open_field();
        let mut actuator = RecordingActuator::new();

        runner.state = NavState::Fault;
        runner.step(&mut sensor, &mut actuator).unwrap();
        assert_eq!(runner.state(), NavState::Detect);
    }

    #[test]
    fn test_move_without_route_goes_to_fault() {
        let mut runner = MissionRunner::new(test_config((19, 0), (19, 3)));
        let mut sensor = SimRangeSensor::open_field();
        let mut actuator = RecordingActuator::new();

        runner.state = NavState::Move;
        runner.step(&mut sensor, &mut actuator).unwrap();
        assert_eq!(runner.state(), NavState::Fault);
    }
}
