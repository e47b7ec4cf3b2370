//! Hardware capability traits and backend selection.
//!
//! The mapping and motion stages only ever talk to these traits, so the whole
//! pipeline can run against simulated devices. The vendor SDK wrapper for the
//! physical rover lives outside this crate and plugs in through the same
//! traits.

pub mod sim;

use crate::config::HardwareConfig;
use crate::error::{Result, YatraError};
use sim::{RecordingActuator, SimRangeSensor};

/// One range-sensor measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reading {
    /// Echo received: distance to the nearest surface in centimeters
    Distance(f64),
    /// No echo or a bad reading from the transducer
    Fault,
}

/// Steerable range sensor (ultrasonic transducer on a pan servo).
pub trait RangeSensor {
    /// Steer the sensor to the given angle in degrees (0 = straight ahead)
    fn set_orientation(&mut self, angle_deg: i32) -> Result<()>;

    /// Take one distance measurement at the current orientation
    fn read_distance(&mut self) -> Reading;
}

/// Drive direction for the traction motors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveDirection {
    Forward,
    Backward,
}

/// Steering servo plus traction motors.
///
/// `drive` starts motion and returns immediately; the caller bounds the
/// motion by sleeping for the primitive's duration and then calling `stop`.
pub trait DriveActuator {
    /// Deflect the steering servo, degrees (0 = straight)
    fn set_steering(&mut self, angle_deg: f64) -> Result<()>;

    /// Run the traction motors in the given direction at the given power
    fn drive(&mut self, direction: DriveDirection, power: u8) -> Result<()>;

    /// Stop the traction motors
    fn stop(&mut self) -> Result<()>;
}

/// Create a sensor/actuator pair for the configured backend.
pub fn create_hardware(
    config: &HardwareConfig,
) -> Result<(Box<dyn RangeSensor>, Box<dyn DriveActuator>)> {
    match config.backend.as_str() {
        "sim" => Ok((
            Box::new(SimRangeSensor::open_field()),
            Box::new(RecordingActuator::new()),
        )),
        other => Err(YatraError::Hardware(format!(
            "Unknown hardware backend: {}",
            other
        ))),
    }
}
