//! # Launcher module
//!
//! The launcher fires cargo with a flywheel. A kicker solenoid pushes the cargo into the flywheel
//! once it is up to speed. Spin up and launch are both timed in control cycles, so the launcher
//! must be stepped every cycle, even while idle, to drive its outputs.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::{Deserialize, Serialize};

use crate::hal::{MotorController, Solenoid};
use util::{maths::saturate, module::Peripheral};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the launcher.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LauncherParams {
    /// Number of cycles the flywheel takes to reach launch speed.
    pub spin_up_cycles: u32,

    /// Number of cycles the kicker is held extended for a launch.
    pub launch_cycles: u32,

    /// Flywheel power while spinning, between 0 and 1.
    pub spin_power: f64,
}

/// A flywheel launcher with a kicker.
pub struct FlywheelLauncher<M: MotorController, S: Solenoid> {
    flywheel: M,
    kicker: S,
    params: LauncherParams,
    state: LauncherState,

    /// A launch was requested before the flywheel was ready
    launch_queued: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LauncherState {
    Idle,
    SpinningUp { cycles_remaining: u32 },
    Ready,
    Launching { cycles_remaining: u32 },
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Launcher capability set. Initialising the launcher stops it.
pub trait Launcher: Peripheral {
    /// Start the flywheel. Has no effect unless the launcher is idle.
    fn spin_up(&mut self);

    /// Fire the launcher.
    ///
    /// If the flywheel isn't up to speed yet it is spun up and the launch happens once it is
    /// ready.
    fn launch(&mut self);

    /// Stop the flywheel and cancel any queued launch.
    fn stop(&mut self);

    fn state(&self) -> LauncherState;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LauncherParams {
    fn default() -> Self {
        Self {
            spin_up_cycles: 25,
            launch_cycles: 10,
            spin_power: 0.8,
        }
    }
}

impl<M: MotorController, S: Solenoid> FlywheelLauncher<M, S> {
    pub fn new(flywheel: M, kicker: S, params: LauncherParams) -> Self {
        Self {
            flywheel,
            kicker,
            params,
            state: LauncherState::Idle,
            launch_queued: false,
        }
    }

    fn set_state(&mut self, state: LauncherState) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&state) {
            debug!("Launcher {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    fn start_launch(&mut self) {
        self.launch_queued = false;
        self.set_state(LauncherState::Launching {
            cycles_remaining: self.params.launch_cycles
        });
    }

    /// Drive the flywheel and kicker from the current state.
    fn drive_outputs(&mut self) {
        let power = match self.state {
            LauncherState::Idle => 0.0,
            _ => saturate(self.params.spin_power, 1.0)
        };

        self.flywheel.set(power);
        self.kicker.set(matches!(self.state, LauncherState::Launching { .. }));
    }
}

impl<M: MotorController, S: Solenoid> Peripheral for FlywheelLauncher<M, S> {
    fn name(&self) -> &'static str {
        "launcher"
    }

    fn init(&mut self) {
        self.stop();
    }

    fn periodic(&mut self) {
        match self.state {
            LauncherState::SpinningUp { cycles_remaining } if cycles_remaining > 1 => {
                self.state = LauncherState::SpinningUp {
                    cycles_remaining: cycles_remaining - 1
                };
            },
            LauncherState::SpinningUp { .. } => self.set_state(LauncherState::Ready),
            LauncherState::Launching { cycles_remaining } if cycles_remaining > 1 => {
                self.state = LauncherState::Launching {
                    cycles_remaining: cycles_remaining - 1
                };
            },
            LauncherState::Launching { .. } => self.set_state(LauncherState::Ready),
            LauncherState::Idle | LauncherState::Ready => ()
        }

        if self.state == LauncherState::Ready && self.launch_queued {
            self.start_launch();
        }

        self.drive_outputs();
    }
}

impl<M: MotorController, S: Solenoid> Launcher for FlywheelLauncher<M, S> {
    fn spin_up(&mut self) {
        if self.state == LauncherState::Idle {
            self.set_state(LauncherState::SpinningUp {
                cycles_remaining: self.params.spin_up_cycles
            });
        }
    }

    fn launch(&mut self) {
        match self.state {
            LauncherState::Ready => self.start_launch(),
            LauncherState::Idle => {
                self.spin_up();
                self.launch_queued = true;
            },
            LauncherState::SpinningUp { .. } => self.launch_queued = true,
            LauncherState::Launching { .. } => ()
        }
    }

    fn stop(&mut self) {
        self.launch_queued = false;
        self.set_state(LauncherState::Idle);
        self.drive_outputs();
    }

    fn state(&self) -> LauncherState {
        self.state
    }
}
