//! # Hardware abstraction layer
//!
//! The handles peripherals use to reach their hardware. Peripherals own their handles, the
//! control core never touches the hardware directly.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use util::maths::saturate;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Body-frame output demanded of the drive train.
///
/// All values are normalised between -1 and +1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DriveOutput {
    /// Sideways speed, positive to the right
    pub x: f64,

    /// Forwards speed
    pub y: f64,

    /// Rotation rate, positive clockwise (increasing heading)
    pub rotation: f64,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// The motors and odometry of the drive train.
pub trait DriveTrain {
    /// Command the drive train output for this cycle.
    fn set_output(&mut self, output: DriveOutput);

    /// Total path length travelled by the robot since power on.
    ///
    /// Units: inches
    fn distance_travelled_in(&self) -> f64;
}

/// A two position pneumatic actuator.
pub trait Solenoid {
    fn set(&mut self, extended: bool);
}

/// A single motor controller.
pub trait MotorController {
    /// Set the motor power, between -1 and +1.
    fn set(&mut self, power: f64);
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveOutput {
    /// An output which stops the drive train.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Return a copy of the output with every component clamped into `[-1, 1]`.
    pub fn saturated(self) -> Self {
        Self {
            x: saturate(self.x, 1.0),
            y: saturate(self.y, 1.0),
            rotation: saturate(self.rotation, 1.0),
        }
    }

    /// Magnitude of the translation part of the output.
    pub fn translation_magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}
