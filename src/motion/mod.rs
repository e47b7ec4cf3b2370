//! Route-to-motion translation.
//!
//! Consumes a planned route one edge at a time from the front, mapping each
//! unit delta to a motion primitive, driving the actuator for the primitive's
//! duration, and accumulating the net displacement for the caller's position
//! update. One mapping applies to every edge; the direction convention is
//! the vehicle's: +x forward, +y to its left.

use crate::config::MotionConfig;
use crate::core::{Displacement, GridCoord};
use crate::error::{Result, YatraError};
use crate::hardware::{DriveActuator, DriveDirection};
use log::debug;
use std::time::Duration;

/// A discrete, atomic actuation command for one unit cell transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPrimitive {
    /// One cell forward (+x)
    Advance,
    /// One cell backward (-x)
    Retreat,
    /// Pivot and settle one cell to the left (+y)
    PivotLeft,
    /// Pivot and settle one cell to the right (-y)
    PivotRight,
}

impl MotionPrimitive {
    /// The unit delta for this primitive, or `None` for a non-unit edge
    fn from_delta(delta: GridCoord) -> Option<Self> {
        match (delta.x, delta.y) {
            (1, 0) => Some(MotionPrimitive::Advance),
            (-1, 0) => Some(MotionPrimitive::Retreat),
            (0, 1) => Some(MotionPrimitive::PivotLeft),
            (0, -1) => Some(MotionPrimitive::PivotRight),
            _ => None,
        }
    }

    /// Grid-cell displacement accomplished by this primitive
    pub fn displacement(&self) -> Displacement {
        match self {
            MotionPrimitive::Advance => Displacement::new(1, 0),
            MotionPrimitive::Retreat => Displacement::new(-1, 0),
            MotionPrimitive::PivotLeft => Displacement::new(0, 1),
            MotionPrimitive::PivotRight => Displacement::new(0, -1),
        }
    }
}

/// Translates routes into actuation and a cumulative displacement.
pub struct MotionTranslator {
    config: MotionConfig,
}

impl MotionTranslator {
    /// Create a translator with the given timings
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    /// Execute a route, edge by edge from the front, until it is exhausted.
    ///
    /// Returns the primitives issued and the net displacement, which the
    /// caller folds into the believed vehicle position.
    pub fn translate(
        &self,
        actuator: &mut dyn DriveActuator,
        mut route: Vec<GridCoord>,
    ) -> Result<(Vec<MotionPrimitive>, Displacement)> {
        let mut primitives = Vec::new();
        let mut displacement = Displacement::ZERO;

        while route.len() >= 2 {
            let delta = route[1] - route[0];
            let primitive = MotionPrimitive::from_delta(delta).ok_or_else(|| {
                YatraError::Motion(format!(
                    "Non-unit edge {} -> {} in route",
                    route[0], route[1]
                ))
            })?;

            debug!("Executing {:?} ({} -> {})", primitive, route[0], route[1]);
            self.execute(actuator, primitive)?;

            displacement += primitive.displacement();
            primitives.push(primitive);
            route.remove(0);
        }

        Ok((primitives, displacement))
    }

    /// Issue the actuation sequence for one primitive.
    fn execute(&self, actuator: &mut dyn DriveActuator, primitive: MotionPrimitive) -> Result<()> {
        let power = self.config.drive_power;
        match primitive {
            MotionPrimitive::Advance => {
                actuator.set_steering(0.0)?;
                actuator.drive(DriveDirection::Forward, power)?;
                self.pause(self.config.forward_ms);
                actuator.stop()?;
            }
            MotionPrimitive::Retreat => {
                actuator.set_steering(0.0)?;
                actuator.drive(DriveDirection::Backward, power)?;
                self.pause(self.config.backward_ms);
                actuator.stop()?;
            }
            MotionPrimitive::PivotLeft => self.pivot(actuator, -self.config.steering_angle_deg)?,
            MotionPrimitive::PivotRight => self.pivot(actuator, self.config.steering_angle_deg)?,
        }
        Ok(())
    }

    /// Pivot: deflect, arc forward for the turn duration, straighten, then
    /// nudge forward to settle into the new cell.
    fn pivot(&self, actuator: &mut dyn DriveActuator, steering_deg: f64) -> Result<()> {
        let power = self.config.drive_power;
        actuator.set_steering(steering_deg)?;
        actuator.drive(DriveDirection::Forward, power)?;
        self.pause(self.config.turn_ms);
        actuator.set_steering(0.0)?;
        actuator.drive(DriveDirection::Forward, power)?;
        self.pause(self.config.nudge_ms);
        actuator.stop()?;
        Ok(())
    }

    fn pause(&self, ms: u64) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::sim::{ActuatorCommand, RecordingActuator};

    fn translator() -> MotionTranslator {
        MotionTranslator::new(MotionConfig {
            forward_ms: 0,
            backward_ms: 0,
            turn_ms: 0,
            nudge_ms: 0,
            ..MotionConfig::default()
        })
    }

    fn route(cells: &[(i32, i32)]) -> Vec<GridCoord> {
        cells.iter().map(|&(x, y)| GridCoord::new(x, y)).collect()
    }

    #[test]
    fn test_two_advances() {
        let mut actuator = RecordingActuator::new();
        let (primitives, displacement) = translator()
            .translate(&mut actuator, route(&[(0, 0), (1, 0), (2, 0)]))
            .unwrap();

        assert_eq!(
            primitives,
            vec![MotionPrimitive::Advance, MotionPrimitive::Advance]
        );
        assert_eq!(displacement, Displacement::new(2, 0));
        assert_eq!(
            actuator
                .commands()
                .iter()
                .filter(|c| matches!(c, ActuatorCommand::Drive(DriveDirection::Forward, _)))
                .count(),
            2
        );
    }

    #[test]
    fn test_pivot_left() {
        let mut actuator = RecordingActuator::new();
        let (primitives, displacement) = translator()
            .translate(&mut actuator, route(&[(0, 0), (0, 1)]))
            .unwrap();

        assert_eq!(primitives, vec![MotionPrimitive::PivotLeft]);
        assert_eq!(displacement, Displacement::new(0, 1));
        // Pivot deflects the steering before straightening again.
        assert_eq!(actuator.commands()[0], ActuatorCommand::Steering(-45.0));
    }

    #[test]
    fn test_pivot_right() {
        let mut actuator = RecordingActuator::new();
        let (primitives, displacement) = translator()
            .translate(&mut actuator, route(&[(0, 0), (0, -1)]))
            .unwrap();

        assert_eq!(primitives, vec![MotionPrimitive::PivotRight]);
        assert_eq!(displacement, Displacement::new(0, -1));
        assert_eq!(actuator.commands()[0], ActuatorCommand::Steering(45.0));
    }

    #[test]
    fn test_retreat() {
        let mut actuator = RecordingActuator::new();
        let (primitives, displacement) = translator()
            .translate(&mut actuator, route(&[(1, 0), (0, 0)]))
            .unwrap();

        assert_eq!(primitives, vec![MotionPrimitive::Retreat]);
        assert_eq!(displacement, Displacement::new(-1, 0));
    }

    #[test]
    fn test_mixed_route_accumulates_displacement() {
        let mut actuator = RecordingActuator::new();
        let (primitives, displacement) = translator()
            .translate(&mut actuator, route(&[(0, 0), (1, 0), (1, 1), (2, 1)]))
            .unwrap();

        assert_eq!(
            primitives,
            vec![
                MotionPrimitive::Advance,
                MotionPrimitive::PivotLeft,
                MotionPrimitive::Advance,
            ]
        );
        assert_eq!(displacement, Displacement::new(2, 1));
    }

    #[test]
    fn test_non_unit_edge_is_rejected() {
        let mut actuator = RecordingActuator::new();
        let result = translator().translate(&mut actuator, route(&[(0, 0), (2, 0)]));
        assert!(matches!(result, Err(YatraError::Motion(_))));
    }

    #[test]
    fn test_short_routes_are_no_ops() {
        let mut actuator = RecordingActuator::new();
        for cells in [route(&[]), route(&[(3, 3)])] {
            let (primitives, displacement) =
                translator().translate(&mut actuator, cells).unwrap();
            assert!(primitives.is_empty());
            assert_eq!(displacement, Displacement::ZERO);
        }
        assert!(actuator.commands().is_empty());
    }
}
