//! Autonomous mode

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use serde::Deserialize;

use super::{ModeId, RobotMode};
use crate::drive::{Drive, MotionTicket};
use crate::hook::Hook;
use crate::peripherals::AutonomousIo;
use comms_if::ds::OperatorInput;
use util::module::Peripheral;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the autonomous mode.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoParams {
    /// The actions to run, in order
    pub sequence: Vec<AutoAction>,
}

/// Runs a pre-programmed sequence of actions.
///
/// Each motion waits for the drive to report its completion before the next action starts. Hook
/// actions complete as soon as they are issued.
pub struct AutonomousMode {
    params: AutoParams,

    /// Index of the action being run
    step: usize,

    /// Ticket of the motion being waited on
    active: Option<MotionTicket>,

    complete: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A single autonomous action.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AutoAction {
    Drive {
        distance_in: f64,
        #[serde(default)]
        x_speed: f64,
        #[serde(default)]
        y_speed: f64,
    },
    Rotate {
        angle_deg: f64,
        speed: f64,
    },
    OpenHook,
    CloseHook,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for AutoParams {
    fn default() -> Self {
        Self {
            sequence: vec![
                AutoAction::Drive { distance_in: 48.0, x_speed: 0.0, y_speed: 0.5 },
                AutoAction::Rotate { angle_deg: 90.0, speed: 0.5 },
                AutoAction::Drive { distance_in: 24.0, x_speed: 0.0, y_speed: 0.4 },
                AutoAction::OpenHook,
            ]
        }
    }
}

impl AutonomousMode {
    pub fn new(params: AutoParams) -> Self {
        Self {
            params,
            step: 0,
            active: None,
            complete: false,
        }
    }

    /// Index of the action being run.
    pub fn step(&self) -> usize {
        self.step
    }

    /// True once every action in the sequence has completed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl<'a> RobotMode<'a> for AutonomousMode {
    type Io = AutonomousIo<'a>;

    fn id(&self) -> ModeId {
        ModeId::Autonomous
    }

    fn init(&mut self, _io: AutonomousIo<'a>) {
        self.step = 0;
        self.active = None;
        self.complete = false;

        info!("Autonomous sequence of {} actions", self.params.sequence.len());
    }

    fn periodic(&mut self, io: AutonomousIo<'a>, _input: &OperatorInput) {
        io.hook.periodic();

        if self.complete {
            return
        }

        // Wait for the motion in progress
        if let Some(ticket) = self.active {
            if io.drive.take_completion(ticket) {
                self.active = None;
                self.step += 1;
            }
            else {
                return
            }
        }

        // Start actions until one has to be waited on
        while self.active.is_none() {
            let action = match self.params.sequence.get(self.step) {
                Some(a) => *a,
                None => {
                    info!("Autonomous sequence complete");
                    self.complete = true;
                    return
                }
            };

            info!("Autonomous step {}: {:?}", self.step, action);

            match action {
                AutoAction::Drive { distance_in, x_speed, y_speed } => {
                    self.active = Some(io.drive.drive_distance_tracked(
                        distance_in, x_speed, y_speed
                    ));
                },
                AutoAction::Rotate { angle_deg, speed } => {
                    self.active = Some(io.drive.rotate_degrees_tracked(angle_deg, speed));
                },
                AutoAction::OpenHook => {
                    io.hook.open();
                    self.step += 1;
                },
                AutoAction::CloseHook => {
                    io.hook.close();
                    self.step += 1;
                }
            }
        }
    }
}
