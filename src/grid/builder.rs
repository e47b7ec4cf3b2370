//! Fan-sweep occupancy grid builder.
//!
//! Sweeps the range sensor across a fan of steering angles, projects each
//! valid reading onto the grid, and joins consecutive detections with a DDA
//! line so discrete samples approximate a continuous surface. Sensor faults
//! and out-of-range detections are absorbed here; they never surface to the
//! mission loop.

use crate::config::{GridConfig, OutputConfig, SweepConfig};
use crate::core::GridCoord;
use crate::grid::{DdaLine, OccupancyGrid};
use crate::hardware::{RangeSensor, Reading};
use log::{debug, warn};
use std::path::Path;
use std::time::Duration;

/// Converts one sensor fan sweep into occupancy grid updates.
pub struct GridBuilder {
    grid_config: GridConfig,
    sweep: SweepConfig,
    output: OutputConfig,
}

impl GridBuilder {
    /// Create a builder with the given configuration
    pub fn new(grid_config: GridConfig, sweep: SweepConfig, output: OutputConfig) -> Self {
        Self {
            grid_config,
            sweep,
            output,
        }
    }

    /// Sweep the sensor and mark detections into `grid`.
    ///
    /// Bad readings are logged and skipped; the sweep always runs to
    /// completion and leaves the sensor at neutral orientation.
    pub fn scan(&self, sensor: &mut dyn RangeSensor, grid: &mut OccupancyGrid) {
        let mut detections: Vec<GridCoord> = Vec::new();

        let mut angle = self.sweep.start_deg;
        while angle <= self.sweep.end_deg {
            debug!("Reading distance at {} deg", angle);

            if let Err(e) = sensor.set_orientation(angle) {
                warn!("Failed to steer sensor to {} deg: {}", angle, e);
                angle += self.sweep.step_deg;
                continue;
            }
            self.settle();

            let distance = match sensor.read_distance() {
                Reading::Distance(d) if d >= 0.0 => d,
                Reading::Distance(d) => {
                    warn!("Bad sensor reading {:.2}cm at {} deg", d, angle);
                    angle += self.sweep.step_deg;
                    continue;
                }
                Reading::Fault => {
                    warn!("No echo or bad sensor reading at {} deg", angle);
                    angle += self.sweep.step_deg;
                    continue;
                }
            };

            debug!("Angle={} deg, distance={:.2}cm", angle, distance);

            if let Some(point) = self.project(angle, distance) {
                if !grid.is_valid(point) {
                    warn!("Point {} is outside the environment grid", point);
                } else {
                    grid.mark_occupied(point);
                    detections.push(point);
                }
            }

            angle += self.sweep.step_deg;
        }

        self.interpolate(&detections, grid);

        if self.output.save_snapshot {
            if let Err(e) =
                crate::io::save_grid_snapshot(grid, Path::new(&self.output.snapshot_path))
            {
                warn!("Failed to save grid snapshot: {}", e);
            }
        }

        // Return sensor to neutral for the drive phase.
        if let Err(e) = sensor.set_orientation(0) {
            warn!("Failed to return sensor to neutral: {}", e);
        }
    }

    /// Project a distance reading at a steering angle onto the grid.
    ///
    /// Returns `None` when the reading carries no detection (zero distance,
    /// or a projected lateral coordinate of zero). The returned coordinate is
    /// already translated by the vehicle's row offset and may still be out of
    /// bounds.
    fn project(&self, angle_deg: i32, distance_cm: f64) -> Option<GridCoord> {
        if distance_cm == 0.0 {
            return None;
        }

        let scale = self.grid_config.projection_scale_cm;
        let (pt_x, pt_y) = if angle_deg == 0 {
            (0, (scale / distance_cm).round() as i32)
        } else {
            let rad = (angle_deg as f64).to_radians();
            (
                (scale / (distance_cm * rad.sin())).round() as i32,
                (scale / (distance_cm * rad.cos())).round() as i32,
            )
        };

        if pt_y == 0 {
            // Reading too far out to register a surface.
            return None;
        }

        Some(GridCoord::new(self.sweep.origin_row + pt_x, pt_y))
    }

    /// Join consecutive detections with DDA lines, skipping pairs whose
    /// forward-axis separation exceeds the configured gap (two unrelated
    /// obstacles).
    fn interpolate(&self, detections: &[GridCoord], grid: &mut OccupancyGrid) {
        for pair in detections.windows(2) {
            let (a, b) = (pair[0], pair[1]);

            if (b.x - a.x).abs() > self.sweep.interpolation_gap_cells {
                debug!("Gap between {} and {} too wide, not interpolating", a, b);
                continue;
            }

            debug!("Interpolating between points {} and {}", a, b);
            for cell in DdaLine::new(a, b) {
                grid.mark_occupied(cell);
            }
        }
    }

    fn settle(&self) {
        if self.sweep.settle_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.sweep.settle_ms));
        }
    }
}
