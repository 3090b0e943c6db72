//! # Peripheral set
//!
//! The control loop owns one instance of each peripheral for the life of the process. Modes never
//! own peripherals, on each call they are handed a view containing only the peripherals they are
//! composed from.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;

use crate::{
    cargo_guide::CargoGuide,
    drive::Drive,
    hook::Hook,
    launcher::Launcher};
use util::module::Peripheral;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Every peripheral of the robot.
pub struct Peripherals {
    pub drive: Box<dyn Drive>,
    pub hook: Box<dyn Hook>,
    pub launcher: Box<dyn Launcher>,
    pub cargo_guide: Box<dyn CargoGuide>,
}

/// The peripherals used by the disabled mode. The drive is deliberately absent.
pub struct DisabledIo<'a> {
    pub hook: &'a mut dyn Hook,
    pub launcher: &'a mut dyn Launcher,
}

/// The peripherals used by the autonomous mode.
pub struct AutonomousIo<'a> {
    pub drive: &'a mut dyn Drive,
    pub hook: &'a mut dyn Hook,
}

/// The peripherals used by the teleoperated mode.
pub struct TeleopIo<'a> {
    pub drive: &'a mut dyn Drive,
    pub hook: &'a mut dyn Hook,
    pub launcher: &'a mut dyn Launcher,
    pub cargo_guide: &'a mut dyn CargoGuide,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Peripherals {

    /// Initialise every peripheral, whether or not the next mode uses it.
    pub fn reinit(&mut self) {
        self.cargo_guide.init();
        self.drive.init();
        self.hook.init();
        self.launcher.init();

        trace!(
            "Peripherals initialised: {}, {}, {}, {}",
            self.cargo_guide.name(),
            self.drive.name(),
            self.hook.name(),
            self.launcher.name()
        );
    }

    /// Step the peripherals which must be re-driven every cycle, whatever the current mode.
    pub fn service(&mut self) {
        self.drive.periodic();
        self.launcher.periodic();
    }

    pub fn disabled_io(&mut self) -> DisabledIo<'_> {
        DisabledIo {
            hook: self.hook.as_mut(),
            launcher: self.launcher.as_mut(),
        }
    }

    pub fn autonomous_io(&mut self) -> AutonomousIo<'_> {
        AutonomousIo {
            drive: self.drive.as_mut(),
            hook: self.hook.as_mut(),
        }
    }

    pub fn teleop_io(&mut self) -> TeleopIo<'_> {
        TeleopIo {
            drive: self.drive.as_mut(),
            hook: self.hook.as_mut(),
            launcher: self.launcher.as_mut(),
            cargo_guide: self.cargo_guide.as_mut(),
        }
    }
}
