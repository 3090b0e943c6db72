//! # Robot library.
//!
//! The control core of the robot: the fixed-rate control loop, the mode state machine, and the
//! peripherals it drives. The `robot_exec` binary and the benchmarks access everything through
//! this library.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Builder - assembles the robot with its peripherals in dependency order
pub mod builder;

/// Cargo guide peripheral
pub mod cargo_guide;

/// Diagnostics - telemetry snapshots and the end of cycle flush
pub mod diagnostics;

/// Drive capability contract and drive implementations
pub mod drive;

/// Driver station - the robot's view of the host environment
pub mod driver_station;

/// Gyroscope interface
pub mod gyro;

/// Hardware abstraction layer - handles to the robot's actuators and sensors
pub mod hal;

/// Hook peripheral
pub mod hook;

/// Launcher peripheral
pub mod launcher;

/// Mode selector - maps the operator state onto a mode
pub mod mode_selector;

/// Robot modes
pub mod modes;

/// Executable parameters
pub mod params;

/// The set of peripherals owned by the robot
pub mod peripherals;

/// Robot - the control loop
pub mod robot;

/// Simulated hardware
pub mod sim;

#[cfg(test)]
pub(crate) mod mock;
