//! # Cargo guide module
//!
//! A pneumatic ramp which is lowered to guide cargo into the launcher.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::Serialize;

use crate::hal::Solenoid;
use util::module::Peripheral;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A cargo guide driven by a single solenoid, extended when lowered.
pub struct SolenoidCargoGuide<S: Solenoid> {
    solenoid: S,
    position: GuidePosition,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuidePosition {
    Raised,
    Lowered,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Cargo guide capability set. Initialising the guide raises it.
pub trait CargoGuide: Peripheral {
    fn raise(&mut self);

    fn lower(&mut self);

    fn position(&self) -> GuidePosition;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: Solenoid> SolenoidCargoGuide<S> {
    pub fn new(solenoid: S) -> Self {
        Self {
            solenoid,
            position: GuidePosition::Raised,
        }
    }

    fn apply(&mut self, position: GuidePosition) {
        if self.position != position {
            debug!("Cargo guide {:?} -> {:?}", self.position, position);
        }
        self.position = position;
        self.solenoid.set(position == GuidePosition::Lowered);
    }
}

impl<S: Solenoid> Peripheral for SolenoidCargoGuide<S> {
    fn name(&self) -> &'static str {
        "cargo_guide"
    }

    fn init(&mut self) {
        self.apply(GuidePosition::Raised);
    }

    fn periodic(&mut self) {
        self.solenoid.set(self.position == GuidePosition::Lowered);
    }
}

impl<S: Solenoid> CargoGuide for SolenoidCargoGuide<S> {
    fn raise(&mut self) {
        self.apply(GuidePosition::Raised);
    }

    fn lower(&mut self) {
        self.apply(GuidePosition::Lowered);
    }

    fn position(&self) -> GuidePosition {
        self.position
    }
}
