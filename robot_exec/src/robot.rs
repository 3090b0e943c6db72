//! # Robot control loop
//!
//! [`Robot::step`] runs a single control cycle:
//!
//! 1. Sample the operator state and select the desired mode.
//! 2. On a change of mode, reconfigure the diagnostics, initialise every peripheral, initialise
//!    the new mode and make it current.
//! 3. Step the current mode.
//! 4. Step the peripherals which must be serviced every cycle.
//! 5. Flush the deferred diagnostic output.
//!
//! The executable calls `step` at a fixed rate. Timing is the caller's job.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use thiserror::Error;

use comms_if::ds::{ControlWordError, LifecycleEvent, OperatorState};
use crate::{
    diagnostics::{Diagnostics, Telemetry},
    driver_station::DriverStation,
    mode_selector,
    modes::{ModeId, Modes},
    peripherals::Peripherals};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The robot, owning every peripheral and mode for the life of the process.
pub struct Robot {
    periph: Peripherals,
    modes: Modes,

    /// The current mode, `None` until the first cycle has run
    current: Option<ModeId>,

    diagnostics: Diagnostics,

    num_cycles: u64,
}

/// Summary of a completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub state: OperatorState,
    pub mode: ModeId,

    /// True if the mode changed (or was first selected) on this cycle
    pub transitioned: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("Unrecognised operator state: {0}")]
    InvalidOperatorState(ControlWordError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Robot {
    pub fn new(periph: Peripherals, modes: Modes, diagnostics: Diagnostics) -> Self {
        Self {
            periph,
            modes,
            current: None,
            diagnostics,
            num_cycles: 0,
        }
    }

    /// Tell the driver station the program is about to enter the control loop.
    pub fn start<D: DriverStation + ?Sized>(&mut self, ds: &mut D) {
        info!("Robot program starting");
        ds.observe(LifecycleEvent::ProgramStarting);
    }

    /// Run one control cycle.
    ///
    /// If the operator state can't be resolved the cycle is abandoned before any mode or
    /// peripheral is touched.
    pub fn step<D: DriverStation + ?Sized>(&mut self, ds: &mut D)
        -> Result<CycleReport, RobotError>
    {
        let state = ds.control_word()
            .operator_state()
            .map_err(RobotError::InvalidOperatorState)?;

        let desired = mode_selector::desired_mode(state, ds);

        let transitioned = self.current != Some(desired);
        if transitioned {
            info!("Mode transition {:?} -> {:?} (state {:?})", self.current, desired, state);

            self.diagnostics.set_live_window(state == OperatorState::Test);
            self.periph.reinit();
            self.modes.init(desired, &mut self.periph);
            self.current = Some(desired);
        }

        let input = ds.operator_input();
        self.modes.periodic(desired, &mut self.periph, &input);

        self.periph.service();

        let telemetry = Telemetry::capture(self.num_cycles, state, desired, &self.periph);
        self.diagnostics.flush(&telemetry);

        self.num_cycles += 1;

        Ok(CycleReport {
            state,
            mode: desired,
            transitioned,
        })
    }

    pub fn current_mode(&self) -> Option<ModeId> {
        self.current
    }

    /// Number of cycles completed.
    pub fn num_cycles(&self) -> u64 {
        self.num_cycles
    }

    pub fn peripherals(&self) -> &Peripherals {
        &self.periph
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::ds::{ControlWord, DsSample, OperatorInput};
    use crate::{
        builder::{RobotBuilder, RobotParams},
        cargo_guide::{CargoGuide, GuidePosition, SolenoidCargoGuide},
        drive::{Drive, DriveMode, DriveParams, MecanumDrive},
        driver_station::FixedDriverStation,
        hal::{DriveOutput, Solenoid},
        hook::{Hook, HookState, SolenoidHook},
        launcher::{FlywheelLauncher, Launcher, LauncherParams, LauncherState},
        mock::{CallCounter, Counted},
        modes::{AutoAction, AutoParams},
        sim::{SimChassis, SimMotor, SimParams, SimSolenoid}};

    struct Rig {
        robot: Robot,
        ds: FixedDriverStation,
        chassis: SimChassis,
        hook_solenoid: SimSolenoid,
        drive: CallCounter,
        hook: CallCounter,
        launcher: CallCounter,
        cargo_guide: CallCounter,
    }

    fn rig(auto: AutoParams) -> Rig {
        let chassis = SimChassis::new(SimParams::default());
        let hook_solenoid = SimSolenoid::new();
        let drive = CallCounter::default();
        let hook = CallCounter::default();
        let launcher = CallCounter::default();
        let cargo_guide = CallCounter::default();

        let train = chassis.drive_train();
        let drive_counter = drive.clone();

        let robot = RobotBuilder::new()
            .gyroscope(chassis.gyroscope())
            .drive(move |gyro| Counted::new(
                MecanumDrive::new(train, gyro, DriveParams::default()),
                drive_counter
            ))
            .hook(Counted::new(SolenoidHook::new(hook_solenoid.clone()), hook.clone()))
            .launcher(Counted::new(
                FlywheelLauncher::new(SimMotor::new(), SimSolenoid::new(), LauncherParams::default()),
                launcher.clone()
            ))
            .cargo_guide(Counted::new(
                SolenoidCargoGuide::new(SimSolenoid::new()),
                cargo_guide.clone()
            ))
            .build(RobotParams {
                auto,
                ..RobotParams::default()
            })
            .unwrap();

        Rig {
            robot,
            ds: FixedDriverStation::default(),
            chassis,
            hook_solenoid,
            drive,
            hook,
            launcher,
            cargo_guide,
        }
    }

    impl Rig {
        fn step(&mut self, state: OperatorState, input: OperatorInput) -> CycleReport {
            self.ds.set_sample(DsSample {
                control: ControlWord::enabled(state),
                input,
            });
            self.robot.step(&mut self.ds).unwrap()
        }

        fn counters(&self) -> [&CallCounter; 4] {
            [&self.drive, &self.hook, &self.launcher, &self.cargo_guide]
        }
    }

    #[test]
    fn test_init_once_per_mode_change() {
        let mut rig = rig(AutoParams::default());
        rig.robot.start(&mut rig.ds);

        let states = [
            OperatorState::Disabled,
            OperatorState::Disabled,
            OperatorState::Autonomous,
            OperatorState::Teleoperated,
            OperatorState::Test,
        ];

        let transitions: Vec<bool> = states
            .iter()
            .map(|s| rig.step(*s, OperatorInput::default()).transitioned)
            .collect();

        assert_eq!(transitions, vec![true, false, true, true, false]);

        for c in rig.counters().iter() {
            assert_eq!(c.inits(), 3);
        }

        assert_eq!(rig.robot.current_mode(), Some(ModeId::Teleoperated));
        assert_eq!(rig.ds.events, vec![
            LifecycleEvent::ProgramStarting,
            LifecycleEvent::Disabled,
            LifecycleEvent::Disabled,
            LifecycleEvent::Autonomous,
            LifecycleEvent::Teleop,
            LifecycleEvent::Test,
        ]);

        // Teleoperated -> Test isn't a transition, so the live window stays off
        assert!(!rig.robot.diagnostics().is_live_window());
    }

    #[test]
    fn test_live_window_on_entering_test() {
        let mut rig = rig(AutoParams::default());

        rig.step(OperatorState::Disabled, OperatorInput::default());
        assert!(!rig.robot.diagnostics().is_live_window());

        let report = rig.step(OperatorState::Test, OperatorInput::default());
        assert_eq!(report.mode, ModeId::Teleoperated);
        assert!(report.transitioned);
        assert!(rig.robot.diagnostics().is_live_window());

        rig.step(OperatorState::Disabled, OperatorInput::default());
        assert!(!rig.robot.diagnostics().is_live_window());
    }

    #[test]
    fn test_invalid_operator_state() {
        let mut rig = rig(AutoParams::default());

        rig.ds.set_control(ControlWord {
            enabled: true,
            autonomous: true,
            teleop: true,
            test: false,
        });
        assert!(matches!(
            rig.robot.step(&mut rig.ds),
            Err(RobotError::InvalidOperatorState(ControlWordError::AmbiguousPhase(_)))
        ));

        rig.ds.set_control(ControlWord {
            enabled: true,
            ..ControlWord::default()
        });
        assert!(matches!(
            rig.robot.step(&mut rig.ds),
            Err(RobotError::InvalidOperatorState(ControlWordError::NoPhase(_)))
        ));

        // Nothing was touched
        for c in rig.counters().iter() {
            assert_eq!(c.inits(), 0);
            assert_eq!(c.periodics(), 0);
        }
        assert!(rig.robot.current_mode().is_none());
        assert_eq!(rig.robot.num_cycles(), 0);
        assert!(rig.ds.events.is_empty());

        // And a good state recovers
        rig.step(OperatorState::Disabled, OperatorInput::default());
        assert_eq!(rig.robot.current_mode(), Some(ModeId::Disabled));
    }

    #[test]
    fn test_background_service() {
        let mut rig = rig(AutoParams::default());

        for _ in 0..4 {
            rig.step(OperatorState::Disabled, OperatorInput::default());
        }
        for _ in 0..6 {
            rig.step(OperatorState::Teleoperated, OperatorInput::default());
        }

        assert_eq!(rig.drive.periodics(), 10);
        assert_eq!(rig.launcher.periodics(), 10);
        assert_eq!(rig.hook.periodics(), 10);
        assert_eq!(rig.cargo_guide.periodics(), 6);
        assert_eq!(rig.robot.num_cycles(), 10);

        for _ in 0..3 {
            rig.step(OperatorState::Autonomous, OperatorInput::default());
        }

        assert_eq!(rig.hook.periodics(), 13);
        assert_eq!(rig.cargo_guide.periodics(), 6);
    }

    #[test]
    fn test_hook_position_reasserted() {
        let mut rig = rig(AutoParams::default());
        let input = OperatorInput {
            hook_toggle: true,
            ..OperatorInput::default()
        };

        rig.step(OperatorState::Teleoperated, input);
        assert!(rig.hook_solenoid.is_extended());

        // Something else drops the solenoid, the next cycle puts it back
        let mut solenoid = rig.hook_solenoid.clone();
        solenoid.set(false);
        rig.step(OperatorState::Teleoperated, input);
        assert!(rig.hook_solenoid.is_extended());
        assert_eq!(rig.robot.peripherals().hook.state(), HookState::Open);
    }

    #[test]
    fn test_disabled_never_drives() {
        let mut rig = rig(AutoParams::default());

        let input = OperatorInput {
            drive_x: 1.0,
            drive_y: 1.0,
            aim_x: 1.0,
            nudge: true,
            spin_up: true,
            ..OperatorInput::default()
        };

        for _ in 0..20 {
            rig.step(OperatorState::Disabled, input);
        }

        assert_eq!(rig.chassis.distance_in(), 0.0);
        assert_eq!(rig.chassis.heading_deg(), 0.0);
        assert_eq!(rig.chassis.output(), DriveOutput::zero());
        assert_eq!(
            rig.robot.peripherals().launcher.state(),
            LauncherState::Idle
        );
    }

    #[test]
    fn test_autonomous_sequence() {
        let mut rig = rig(AutoParams {
            sequence: vec![
                AutoAction::Drive { distance_in: 24.0, x_speed: 0.5, y_speed: 0.0 },
                AutoAction::OpenHook,
            ]
        });

        rig.step(OperatorState::Disabled, OperatorInput::default());

        for _ in 0..11 {
            rig.step(OperatorState::Autonomous, OperatorInput::default());
            assert_eq!(
                rig.robot.peripherals().drive.current_drive_mode(),
                DriveMode::AutonomousMotion
            );
        }

        // The drive completes its motion on the twelfth cycle
        rig.step(OperatorState::Autonomous, OperatorInput::default());
        assert_eq!(rig.chassis.distance_in(), 24.0);
        assert_eq!(
            rig.robot.peripherals().drive.current_drive_mode(),
            DriveMode::DriverControl
        );
        assert!(!rig.hook_solenoid.is_extended());
        assert!(!rig.robot.modes().autonomous.is_complete());

        // The mode sees the completion on the next cycle and opens the hook
        rig.step(OperatorState::Autonomous, OperatorInput::default());
        assert!(rig.hook_solenoid.is_extended());
        assert_eq!(rig.robot.peripherals().hook.state(), HookState::Open);
        assert!(rig.robot.modes().autonomous.is_complete());

        for _ in 0..10 {
            rig.step(OperatorState::Autonomous, OperatorInput::default());
        }
        assert_eq!(rig.chassis.distance_in(), 24.0);
    }

    #[test]
    fn test_leaving_autonomous_cancels_motion() {
        let mut rig = rig(AutoParams {
            sequence: vec![
                AutoAction::Drive { distance_in: 100.0, x_speed: 0.0, y_speed: 0.5 },
            ]
        });

        for _ in 0..3 {
            rig.step(OperatorState::Autonomous, OperatorInput::default());
        }
        assert_eq!(rig.chassis.distance_in(), 6.0);

        for _ in 0..10 {
            rig.step(OperatorState::Teleoperated, OperatorInput::default());
        }
        assert_eq!(rig.chassis.distance_in(), 6.0);
        assert_eq!(
            rig.robot.peripherals().drive.current_drive_mode(),
            DriveMode::DriverControl
        );

        // Re-entering autonomous restarts the sequence
        rig.step(OperatorState::Autonomous, OperatorInput::default());
        assert_eq!(rig.robot.modes().autonomous.step(), 0);
        assert_eq!(rig.chassis.distance_in(), 8.0);
    }

    #[test]
    fn test_teleop_controls() {
        let mut rig = rig(AutoParams::default());

        let drive = OperatorInput {
            drive_y: 0.5,
            ..OperatorInput::default()
        };
        let toggle = OperatorInput {
            hook_toggle: true,
            guide_lower: true,
            ..drive
        };

        rig.step(OperatorState::Teleoperated, toggle);
        assert_eq!(rig.robot.peripherals().hook.state(), HookState::Open);
        assert_eq!(rig.robot.peripherals().cargo_guide.position(), GuidePosition::Lowered);

        // Holding the button doesn't toggle again
        rig.step(OperatorState::Teleoperated, toggle);
        assert_eq!(rig.robot.peripherals().hook.state(), HookState::Open);

        rig.step(OperatorState::Teleoperated, drive);
        assert_eq!(rig.robot.peripherals().cargo_guide.position(), GuidePosition::Raised);

        rig.step(OperatorState::Teleoperated, toggle);
        assert_eq!(rig.robot.peripherals().hook.state(), HookState::Closed);

        rig.step(OperatorState::Teleoperated, drive);
        assert_eq!(rig.chassis.distance_in(), 10.0);
        assert_eq!(rig.chassis.heading_deg(), 0.0);
    }

    #[test]
    fn test_teleop_nudge() {
        let mut rig = rig(AutoParams::default());

        let nudge = OperatorInput {
            nudge: true,
            ..OperatorInput::default()
        };

        rig.step(OperatorState::Teleoperated, nudge);
        assert_eq!(
            rig.robot.peripherals().drive.current_drive_mode(),
            DriveMode::AutonomousMotion
        );

        for _ in 0..10 {
            rig.step(OperatorState::Teleoperated, OperatorInput::default());
        }

        assert_eq!(
            rig.robot.peripherals().drive.current_drive_mode(),
            DriveMode::DriverControl
        );
        assert!(rig.chassis.distance_in() >= 6.0);
        assert!(rig.chassis.distance_in() < 8.0);
    }
}
