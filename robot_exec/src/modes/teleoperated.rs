//! Teleoperated mode

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use serde::Deserialize;

use super::{ModeId, RobotMode};
use crate::cargo_guide::CargoGuide;
use crate::drive::{Drive, DriveMode};
use crate::hook::Hook;
use crate::launcher::{Launcher, LauncherState};
use crate::peripherals::TeleopIo;
use comms_if::ds::OperatorInput;
use util::maths::deadband;
use util::module::Peripheral;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the teleoperated mode.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TeleopParams {
    /// Drive stick deflections smaller than this are ignored.
    pub deadband: f64,

    /// Aim stick deflection above which the robot turns to face the stick.
    pub aim_threshold: f64,

    /// Length of a nudge move.
    ///
    /// Units: inches
    pub nudge_distance_in: f64,

    /// Forwards speed of a nudge move.
    pub nudge_speed: f64,
}

/// Maps live operator input onto the peripherals.
pub struct TeleoperatedMode {
    params: TeleopParams,

    /// Input from the previous cycle, used to detect button presses
    last_input: OperatorInput,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for TeleopParams {
    fn default() -> Self {
        Self {
            deadband: 0.05,
            aim_threshold: 0.5,
            nudge_distance_in: 6.0,
            nudge_speed: 0.4,
        }
    }
}

impl TeleoperatedMode {
    pub fn new(params: TeleopParams) -> Self {
        Self {
            params,
            last_input: OperatorInput::default(),
        }
    }
}

impl<'a> RobotMode<'a> for TeleoperatedMode {
    type Io = TeleopIo<'a>;

    fn id(&self) -> ModeId {
        ModeId::Teleoperated
    }

    fn init(&mut self, _io: TeleopIo<'a>) {
        self.last_input = OperatorInput::default();
        info!("Teleoperated control active");
    }

    fn periodic(&mut self, io: TeleopIo<'a>, input: &OperatorInput) {
        let last = self.last_input;
        self.last_input = *input;

        // ---- HOOK ----

        if input.hook_toggle && !last.hook_toggle {
            io.hook.toggle();
        }

        // ---- LAUNCHER ----

        if input.launch && !last.launch {
            io.launcher.launch();
        }
        else if input.spin_up || input.launch {
            io.launcher.spin_up();
        }
        else if !matches!(io.launcher.state(), LauncherState::Launching { .. }) {
            io.launcher.stop();
        }

        // ---- CARGO GUIDE ----

        if input.guide_lower {
            io.cargo_guide.lower();
        }
        else {
            io.cargo_guide.raise();
        }

        io.hook.periodic();
        io.cargo_guide.periodic();

        // ---- DRIVE ----

        // Leave the drive alone while a nudge is running
        if io.drive.current_drive_mode() != DriveMode::DriverControl {
            return
        }

        if input.nudge && !last.nudge {
            io.drive.drive_distance(
                self.params.nudge_distance_in,
                0.0,
                self.params.nudge_speed
            );
            return
        }

        io.drive.drive_manual(
            deadband(input.drive_x, self.params.deadband),
            deadband(input.drive_y, self.params.deadband)
        );

        let aim_mag = input.aim_x.hypot(input.aim_y);
        if aim_mag > self.params.aim_threshold {
            // Heading is measured clockwise from forwards
            let heading_deg = input.aim_x.atan2(input.aim_y).to_degrees();
            io.drive.look_at(heading_deg, aim_mag);
        }
        else {
            io.drive.maintain_heading();
        }
    }
}
