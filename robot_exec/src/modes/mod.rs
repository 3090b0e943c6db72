//! # Robot modes
//!
//! The robot is always in exactly one of the modes defined here. Each mode is a behaviour unit
//! composed from the subset of peripherals it needs, which it receives as a view on every call
//! rather than owning them.
//!
//! All modes are constructed once at startup and live for the whole process. Only the control
//! loop's choice of current mode changes.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod autonomous;
mod disabled;
mod teleoperated;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use comms_if::ds::OperatorInput;
use crate::peripherals::Peripherals;

pub use autonomous::*;
pub use disabled::*;
pub use teleoperated::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The set of mode instances.
pub struct Modes {
    pub disabled: DisabledMode,
    pub autonomous: AutonomousMode,
    pub teleoperated: TeleoperatedMode,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Identity of a mode.
///
/// There is no test mode, the test phase runs the teleoperated mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModeId {
    Disabled,
    Autonomous,
    Teleoperated,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A robot operating mode.
pub trait RobotMode<'a> {
    /// The view of the peripherals this mode is composed from.
    type Io: 'a;

    fn id(&self) -> ModeId;

    /// Prepare the mode to become current.
    fn init(&mut self, io: Self::Io);

    /// Run one control step of the mode.
    fn periodic(&mut self, io: Self::Io, input: &OperatorInput);
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Modes {
    pub fn new(auto: AutoParams, teleop: TeleopParams) -> Self {
        Self {
            disabled: DisabledMode::new(),
            autonomous: AutonomousMode::new(auto),
            teleoperated: TeleoperatedMode::new(teleop),
        }
    }

    /// Initialise the given mode.
    pub fn init(&mut self, id: ModeId, periph: &mut Peripherals) {
        match id {
            ModeId::Disabled => self.disabled.init(periph.disabled_io()),
            ModeId::Autonomous => self.autonomous.init(periph.autonomous_io()),
            ModeId::Teleoperated => self.teleoperated.init(periph.teleop_io())
        }
    }

    /// Run one step of the given mode.
    pub fn periodic(&mut self, id: ModeId, periph: &mut Peripherals, input: &OperatorInput) {
        match id {
            ModeId::Disabled => self.disabled.periodic(periph.disabled_io(), input),
            ModeId::Autonomous => self.autonomous.periodic(periph.autonomous_io(), input),
            ModeId::Teleoperated => self.teleoperated.periodic(periph.teleop_io(), input)
        }
    }
}
