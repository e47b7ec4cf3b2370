//! Simulated hardware backends.
//!
//! The sim sensor answers each steering angle from a fixed table of readings,
//! defaulting to a fault (no echo) for angles without an entry, which is how
//! an ultrasonic transducer behaves in open space. The sim actuator records
//! every command it receives so tests can assert on the exact actuation
//! sequence.

use super::{DriveActuator, DriveDirection, RangeSensor, Reading};
use crate::error::Result;
use log::trace;
use std::collections::HashMap;

/// Range sensor that replays a fixed angle-to-distance table.
pub struct SimRangeSensor {
    readings: HashMap<i32, f64>,
    orientation: i32,
}

impl SimRangeSensor {
    /// Sensor in open space: every reading is a fault (no echo)
    pub fn open_field() -> Self {
        Self::with_readings(&[])
    }

    /// Sensor with surfaces at the given (angle, distance-cm) pairs
    pub fn with_readings(readings: &[(i32, f64)]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            orientation: 0,
        }
    }

    /// Current steering angle of the sensor, degrees
    pub fn orientation(&self) -> i32 {
        self.orientation
    }
}

impl RangeSensor for SimRangeSensor {
    fn set_orientation(&mut self, angle_deg: i32) -> Result<()> {
        trace!("[sim] sensor orientation -> {} deg", angle_deg);
        self.orientation = angle_deg;
        Ok(())
    }

    fn read_distance(&mut self) -> Reading {
        match self.readings.get(&self.orientation) {
            Some(&distance) => Reading::Distance(distance),
            None => Reading::Fault,
        }
    }
}

/// A single recorded actuation command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActuatorCommand {
    Steering(f64),
    Drive(DriveDirection, u8),
    Stop,
}

/// Drive actuator that records every command instead of moving motors.
#[derive(Default)]
pub struct RecordingActuator {
    commands: Vec<ActuatorCommand>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands received so far, in order
    pub fn commands(&self) -> &[ActuatorCommand] {
        &self.commands
    }
}

impl DriveActuator for RecordingActuator {
    fn set_steering(&mut self, angle_deg: f64) -> Result<()> {
        trace!("[sim] steering -> {:.0} deg", angle_deg);
        self.commands.push(ActuatorCommand::Steering(angle_deg));
        Ok(())
    }

    fn drive(&mut self, direction: DriveDirection, power: u8) -> Result<()> {
        trace!("[sim] drive {:?} at power {}", direction, power);
        self.commands.push(ActuatorCommand::Drive(direction, power));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        trace!("[sim] stop");
        self.commands.push(ActuatorCommand::Stop);
        Ok(())
    }
}
