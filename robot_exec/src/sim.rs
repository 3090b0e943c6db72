//! # Simulated hardware
//!
//! Kinematic stand-ins for the robot's hardware, used when running on the bench and in tests. The
//! chassis integrates the drive train output once per call to `set_output`, so one control cycle
//! moves the chassis by at most `max_speed_in_per_cycle` inches and
//! `max_rotation_deg_per_cycle` degrees.
//!
//! Handles created from the same [`SimChassis`] share its state, so a test can keep the chassis
//! and observe what the drive did with the handles it was given.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use serde::Deserialize;

// Internal
use crate::gyro::Gyroscope;
use crate::hal::{DriveOutput, DriveTrain, MotorController, Solenoid};
use util::module::Peripheral;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the simulated chassis.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimParams {
    /// Distance covered in one cycle at full translation output.
    ///
    /// Units: inches/cycle
    pub max_speed_in_per_cycle: f64,

    /// Heading change in one cycle at full rotation output.
    ///
    /// Units: degrees/cycle
    pub max_rotation_deg_per_cycle: f64,
}

#[derive(Debug, Default)]
struct ChassisState {
    distance_in: f64,
    heading_deg: f64,
    output: DriveOutput,

    /// Number of gyroscope steps left to glitch
    glitch_pending: u32,

    /// True while the gyroscope is glitching
    glitch_active: bool,
}

/// A simulated robot chassis.
#[derive(Clone)]
pub struct SimChassis {
    state: Rc<RefCell<ChassisState>>,
    params: SimParams,
}

/// Simulated drive motors and odometry.
pub struct SimDriveTrain {
    state: Rc<RefCell<ChassisState>>,
    params: SimParams,
}

/// Simulated gyroscope.
pub struct SimGyro {
    state: Rc<RefCell<ChassisState>>,
}

/// Simulated solenoid. Clones share the same actuator.
#[derive(Debug, Clone, Default)]
pub struct SimSolenoid {
    extended: Rc<Cell<bool>>,
}

/// Simulated motor controller. Clones share the same motor.
#[derive(Debug, Clone, Default)]
pub struct SimMotor {
    power: Rc<Cell<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            max_speed_in_per_cycle: 4.0,
            max_rotation_deg_per_cycle: 9.0,
        }
    }
}

impl SimChassis {
    pub fn new(params: SimParams) -> Self {
        Self {
            state: Rc::new(RefCell::new(ChassisState::default())),
            params,
        }
    }

    /// Create a drive train handle for this chassis.
    pub fn drive_train(&self) -> SimDriveTrain {
        SimDriveTrain {
            state: self.state.clone(),
            params: self.params,
        }
    }

    /// Create a gyroscope handle for this chassis.
    pub fn gyroscope(&self) -> SimGyro {
        SimGyro {
            state: self.state.clone(),
        }
    }

    pub fn distance_in(&self) -> f64 {
        self.state.borrow().distance_in
    }

    pub fn heading_deg(&self) -> f64 {
        self.state.borrow().heading_deg
    }

    /// Move the chassis to a new heading, as if it had been pushed.
    pub fn set_heading_deg(&self, heading_deg: f64) {
        self.state.borrow_mut().heading_deg = heading_deg;
    }

    /// The last output commanded of the drive train.
    pub fn output(&self) -> DriveOutput {
        self.state.borrow().output
    }

    /// Make the gyroscope report no reading for the next `num_cycles` steps.
    pub fn inject_gyro_glitch(&self, num_cycles: u32) {
        self.state.borrow_mut().glitch_pending = num_cycles;
    }
}

impl DriveTrain for SimDriveTrain {
    fn set_output(&mut self, output: DriveOutput) {
        let output = output.saturated();
        let mut state = self.state.borrow_mut();

        state.output = output;
        state.distance_in += output.translation_magnitude() * self.params.max_speed_in_per_cycle;
        state.heading_deg += output.rotation * self.params.max_rotation_deg_per_cycle;
    }

    fn distance_travelled_in(&self) -> f64 {
        self.state.borrow().distance_in
    }
}

impl Peripheral for SimGyro {
    fn name(&self) -> &'static str {
        "sim_gyro"
    }

    fn init(&mut self) {
        let mut state = self.state.borrow_mut();
        state.glitch_pending = 0;
        state.glitch_active = false;
    }

    fn periodic(&mut self) {
        let mut state = self.state.borrow_mut();

        if state.glitch_pending > 0 {
            state.glitch_pending -= 1;
            state.glitch_active = true;
        }
        else {
            state.glitch_active = false;
        }
    }
}

impl Gyroscope for SimGyro {
    fn heading_deg(&self) -> Option<f64> {
        let state = self.state.borrow();

        if state.glitch_active {
            None
        }
        else {
            Some(state.heading_deg)
        }
    }
}

impl SimSolenoid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_extended(&self) -> bool {
        self.extended.get()
    }
}

impl Solenoid for SimSolenoid {
    fn set(&mut self, extended: bool) {
        self.extended.set(extended);
    }
}

impl SimMotor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power(&self) -> f64 {
        self.power.get()
    }
}

impl MotorController for SimMotor {
    fn set(&mut self, power: f64) {
        self.power.set(power);
    }
}
