//! Disabled mode

use log::info;

use super::{ModeId, RobotMode};
use crate::hook::Hook;
use crate::launcher::{Launcher, LauncherState};
use crate::peripherals::DisabledIo;
use comms_if::ds::OperatorInput;
use util::module::Peripheral;

/// The robot is disabled.
///
/// The drive is never touched so its motors stay unpowered. The launcher is held stopped.
#[derive(Debug, Default)]
pub struct DisabledMode;

impl DisabledMode {
    pub fn new() -> Self {
        Self
    }
}

impl<'a> RobotMode<'a> for DisabledMode {
    type Io = DisabledIo<'a>;

    fn id(&self) -> ModeId {
        ModeId::Disabled
    }

    fn init(&mut self, io: DisabledIo<'a>) {
        io.launcher.stop();
        info!("Robot disabled, hook {:?}", io.hook.state());
    }

    fn periodic(&mut self, io: DisabledIo<'a>, _input: &OperatorInput) {
        if io.launcher.state() != LauncherState::Idle {
            io.launcher.stop();
        }

        io.hook.periodic();
    }
}
