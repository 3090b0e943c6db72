//! # Robot builder
//!
//! Assembles a [`Robot`] from its peripherals. The drive can only be added once the gyroscope has
//! been supplied, and is built from the gyroscope itself, so a drive can never be constructed
//! around a gyroscope which doesn't exist yet:
//!
//! ```compile_fail
//! use robot_lib::builder::RobotBuilder;
//! use robot_lib::drive::NullDrive;
//!
//! // No gyroscope yet, so there is no `drive` method
//! let _ = RobotBuilder::new().drive(|_| NullDrive::new());
//! ```
//!
//! Bench setups without a drive train use [`RobotBuilder::null_drive`] instead.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use thiserror::Error;

use crate::{
    cargo_guide::CargoGuide,
    diagnostics::{Diagnostics, DiagnosticsParams},
    drive::{Drive, NullDrive},
    gyro::Gyroscope,
    hook::Hook,
    launcher::Launcher,
    modes::{AutoParams, Modes, TeleopParams},
    peripherals::Peripherals,
    robot::Robot};
use util::module::Peripheral;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the robot's modes and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RobotParams {
    pub auto: AutoParams,
    pub teleop: TeleopParams,
    pub diagnostics: DiagnosticsParams,
}

/// Builder stage before the gyroscope has been supplied.
pub struct NeedsGyroscope;

/// Builder stage holding the gyroscope, waiting for the drive built around it.
pub struct NeedsDrive<G: Gyroscope> {
    gyro: G,
}

/// Builder stage once the drive exists.
pub struct HasDrive {
    drive: Box<dyn Drive>,
}

pub struct RobotBuilder<S> {
    stage: S,
    hook: Option<Box<dyn Hook>>,
    launcher: Option<Box<dyn Launcher>>,
    cargo_guide: Option<Box<dyn CargoGuide>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No {0} was supplied to the robot builder")]
    MissingPeripheral(&'static str),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RobotBuilder<NeedsGyroscope> {
    fn default() -> Self {
        Self {
            stage: NeedsGyroscope,
            hook: None,
            launcher: None,
            cargo_guide: None,
        }
    }
}

impl RobotBuilder<NeedsGyroscope> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the gyroscope.
    pub fn gyroscope<G: Gyroscope>(self, gyro: G) -> RobotBuilder<NeedsDrive<G>> {
        self.with_stage(NeedsDrive { gyro })
    }

    /// Use the null drive, no gyroscope is needed.
    pub fn null_drive(self) -> RobotBuilder<HasDrive> {
        self.with_stage(HasDrive {
            drive: Box::new(NullDrive::new())
        })
    }
}

impl<G: Gyroscope> RobotBuilder<NeedsDrive<G>> {
    /// Build the drive around the gyroscope.
    pub fn drive<D, F>(self, build_drive: F) -> RobotBuilder<HasDrive>
    where
        D: Drive + 'static,
        F: FnOnce(G) -> D
    {
        let RobotBuilder { stage, hook, launcher, cargo_guide } = self;

        RobotBuilder {
            stage: HasDrive {
                drive: Box::new(build_drive(stage.gyro))
            },
            hook,
            launcher,
            cargo_guide,
        }
    }
}

impl<S> RobotBuilder<S> {
    pub fn hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn launcher<L: Launcher + 'static>(mut self, launcher: L) -> Self {
        self.launcher = Some(Box::new(launcher));
        self
    }

    pub fn cargo_guide<C: CargoGuide + 'static>(mut self, cargo_guide: C) -> Self {
        self.cargo_guide = Some(Box::new(cargo_guide));
        self
    }

    fn with_stage<T>(self, stage: T) -> RobotBuilder<T> {
        RobotBuilder {
            stage,
            hook: self.hook,
            launcher: self.launcher,
            cargo_guide: self.cargo_guide,
        }
    }
}

impl RobotBuilder<HasDrive> {
    /// Build the robot.
    pub fn build(self, params: RobotParams) -> Result<Robot, BuildError> {
        let periph = Peripherals {
            drive: self.stage.drive,
            hook: self.hook.ok_or(BuildError::MissingPeripheral("hook"))?,
            launcher: self.launcher.ok_or(BuildError::MissingPeripheral("launcher"))?,
            cargo_guide: self.cargo_guide.ok_or(BuildError::MissingPeripheral("cargo guide"))?,
        };

        info!(
            "Robot built with {}, {}, {} and {}",
            periph.drive.name(),
            periph.hook.name(),
            periph.launcher.name(),
            periph.cargo_guide.name()
        );

        Ok(Robot::new(
            periph,
            Modes::new(params.auto, params.teleop),
            Diagnostics::new(params.diagnostics)
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        cargo_guide::SolenoidCargoGuide,
        hook::SolenoidHook,
        launcher::{FlywheelLauncher, LauncherParams},
        sim::{SimMotor, SimSolenoid}};

    #[test]
    fn test_missing_peripheral() {
        let res = RobotBuilder::new()
            .null_drive()
            .hook(SolenoidHook::new(SimSolenoid::new()))
            .cargo_guide(SolenoidCargoGuide::new(SimSolenoid::new()))
            .build(RobotParams::default());

        assert!(matches!(res, Err(BuildError::MissingPeripheral("launcher"))));
    }

    #[test]
    fn test_null_drive_robot() {
        let robot = RobotBuilder::new()
            .hook(SolenoidHook::new(SimSolenoid::new()))
            .null_drive()
            .launcher(FlywheelLauncher::new(
                SimMotor::new(), SimSolenoid::new(), LauncherParams::default()
            ))
            .cargo_guide(SolenoidCargoGuide::new(SimSolenoid::new()))
            .build(RobotParams::default())
            .unwrap();

        assert_eq!(robot.peripherals().drive.name(), "null_drive");
        assert!(robot.current_mode().is_none());
    }
}
