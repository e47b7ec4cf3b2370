//! Configuration loading for YatraNav

use crate::error::{Result, YatraError};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct YatraConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub mission: MissionConfig,
    #[serde(default)]
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Occupancy grid dimensions and sensor-to-grid projection scale
#[derive(Clone, Debug, Deserialize)]
pub struct GridConfig {
    /// Grid rows, forward axis (default: 40)
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Grid columns, lateral axis (default: 40)
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Centimeters-per-grid-unit conversion constant used when projecting
    /// a range reading onto the grid (default: 200.0)
    #[serde(default = "default_projection_scale")]
    pub projection_scale_cm: f64,
}

/// Fan sweep parameters for the range sensor
#[derive(Clone, Debug, Deserialize)]
pub struct SweepConfig {
    /// First steering angle in degrees (default: -60)
    #[serde(default = "default_start_deg")]
    pub start_deg: i32,

    /// Last steering angle in degrees, inclusive (default: 60)
    #[serde(default = "default_end_deg")]
    pub end_deg: i32,

    /// Angle increment in degrees (default: 10)
    #[serde(default = "default_step_deg")]
    pub step_deg: i32,

    /// Settle delay after steering the sensor, before reading (default: 250)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Row the vehicle occupies at mapping time; projected points are
    /// translated forward by this offset (default: 19)
    #[serde(default = "default_origin_row")]
    pub origin_row: i32,

    /// Maximum forward-axis separation, in cells, between two consecutive
    /// detections for interpolation to join them (default: 10)
    #[serde(default = "default_interpolation_gap")]
    pub interpolation_gap_cells: i32,
}

/// A* planner limits
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    /// Maximum number of cells to expand before giving up (default: 1600)
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

/// Motion primitive timings and drive power
#[derive(Clone, Debug, Deserialize)]
pub struct MotionConfig {
    /// Drive power, 0-100 (default: 10)
    #[serde(default = "default_drive_power")]
    pub drive_power: u8,

    /// Duration of one forward step in milliseconds (default: 500)
    #[serde(default = "default_forward_ms")]
    pub forward_ms: u64,

    /// Duration of one backward step in milliseconds (default: 500)
    #[serde(default = "default_backward_ms")]
    pub backward_ms: u64,

    /// Duration of a pivot turn in milliseconds (default: 960)
    #[serde(default = "default_turn_ms")]
    pub turn_ms: u64,

    /// Steering deflection used for pivots, degrees (default: 45.0)
    #[serde(default = "default_steering_angle")]
    pub steering_angle_deg: f64,

    /// Short forward nudge after a pivot to settle into the new cell
    /// (default: 300)
    #[serde(default = "default_nudge_ms")]
    pub nudge_ms: u64,
}

/// Mission endpoints and loop pacing
#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    /// Start cell, forward axis (default: 19)
    #[serde(default = "default_start_x")]
    pub start_x: i32,

    /// Start cell, lateral axis (default: 0)
    #[serde(default = "default_start_y")]
    pub start_y: i32,

    /// Goal cell, forward axis (default: 29)
    #[serde(default = "default_goal_x")]
    pub goal_x: i32,

    /// Goal cell, lateral axis (default: 29)
    #[serde(default = "default_goal_y")]
    pub goal_y: i32,

    /// Pause between state transitions in milliseconds (default: 1000)
    #[serde(default = "default_cycle_pause_ms")]
    pub cycle_pause_ms: u64,

    /// Consecutive failed routing attempts tolerated before the mission is
    /// declared failed (default: 3)
    #[serde(default = "default_max_route_retries")]
    pub max_route_retries: usize,
}

/// Hardware backend selection
#[derive(Clone, Debug, Deserialize)]
pub struct HardwareConfig {
    /// Backend name: "sim" is the only built-in backend (default: "sim")
    #[serde(default = "default_backend")]
    pub backend: String,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Save a plain-text grid snapshot after every sweep (default: true)
    #[serde(default = "default_save_snapshot")]
    pub save_snapshot: bool,

    /// Path of the grid snapshot file
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

// Default value functions
fn default_rows() -> usize {
    40
}
fn default_cols() -> usize {
    40
}
fn default_projection_scale() -> f64 {
    200.0
}
fn default_start_deg() -> i32 {
    -60
}
fn default_end_deg() -> i32 {
    60
}
fn default_step_deg() -> i32 {
    10
}
fn default_settle_ms() -> u64 {
    250
}
fn default_origin_row() -> i32 {
    19
}
fn default_interpolation_gap() -> i32 {
    10
}
fn default_max_expansions() -> usize {
    1600
}
fn default_drive_power() -> u8 {
    10
}
fn default_forward_ms() -> u64 {
    500
}
fn default_backward_ms() -> u64 {
    500
}
fn default_turn_ms() -> u64 {
    960
}
fn default_steering_angle() -> f64 {
    45.0
}
fn default_nudge_ms() -> u64 {
    300
}
fn default_start_x() -> i32 {
    19
}
fn default_start_y() -> i32 {
    0
}
fn default_goal_x() -> i32 {
    29
}
fn default_goal_y() -> i32 {
    29
}
fn default_cycle_pause_ms() -> u64 {
    1000
}
fn default_max_route_retries() -> usize {
    3
}
fn default_backend() -> String {
    "sim".to_string()
}
fn default_save_snapshot() -> bool {
    true
}
fn default_snapshot_path() -> String {
    "output/environment.txt".to_string()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            projection_scale_cm: default_projection_scale(),
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_deg: default_start_deg(),
            end_deg: default_end_deg(),
            step_deg: default_step_deg(),
            settle_ms: default_settle_ms(),
            origin_row: default_origin_row(),
            interpolation_gap_cells: default_interpolation_gap(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: default_max_expansions(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            drive_power: default_drive_power(),
            forward_ms: default_forward_ms(),
            backward_ms: default_backward_ms(),
            turn_ms: default_turn_ms(),
            steering_angle_deg: default_steering_angle(),
            nudge_ms: default_nudge_ms(),
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            start_x: default_start_x(),
            start_y: default_start_y(),
            goal_x: default_goal_x(),
            goal_y: default_goal_y(),
            cycle_pause_ms: default_cycle_pause_ms(),
            max_route_retries: default_max_route_retries(),
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_snapshot: default_save_snapshot(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl Default for YatraConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            sweep: SweepConfig::default(),
            planner: PlannerConfig::default(),
            motion: MotionConfig::default(),
            mission: MissionConfig::default(),
            hardware: HardwareConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl YatraConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| YatraError::Config(format!("Failed to read config file: {}", e)))?;
        let config: YatraConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_platform() {
        let config = YatraConfig::default();
        assert_eq!(config.grid.rows, 40);
        assert_eq!(config.grid.cols, 40);
        assert_eq!(config.grid.projection_scale_cm, 200.0);
        assert_eq!(config.sweep.origin_row, 19);
        assert_eq!(config.mission.goal_x, 29);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: YatraConfig = toml::from_str(
            r#"
            [mission]
            goal_x = 10
            goal_y = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.mission.goal_x, 10);
        assert_eq!(config.mission.goal_y, 5);
        assert_eq!(config.mission.start_x, 19);
        assert_eq!(config.grid.rows, 40);
    }
}
