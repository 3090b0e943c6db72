//! # Hook module
//!
//! The hook is a pneumatic latch used to grab and release game pieces.

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

/// A hook driven by a single solenoid, extended when open.
pub struct SolenoidHook<S: Solenoid> {
    solenoid: S,
    state: HookState,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HookState {
    Closed,
    Open,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Hook capability set. Initialising the hook closes it.
pub trait Hook: Peripheral {
    fn open(&mut self);

    fn close(&mut self);

    fn state(&self) -> HookState;

    /// Open the hook if closed, otherwise close it.
    fn toggle(&mut self) {
        match self.state() {
            HookState::Closed => self.open(),
            HookState::Open => self.close()
        }
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: Solenoid> SolenoidHook<S> {
    pub fn new(solenoid: S) -> Self {
        Self {
            solenoid,
            state: HookState::Closed,
        }
    }

    fn apply(&mut self, state: HookState) {
        if self.state != state {
            debug!("Hook {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        self.solenoid.set(state == HookState::Open);
    }
}

impl<S: Solenoid> Peripheral for SolenoidHook<S> {
    fn name(&self) -> &'static str {
        "hook"
    }

    fn init(&mut self) {
        self.apply(HookState::Closed);
    }

    /// Re-assert the commanded position.
    fn periodic(&mut self) {
        self.solenoid.set(self.state == HookState::Open);
    }
}

impl<S: Solenoid> Hook for SolenoidHook<S> {
    fn open(&mut self) {
        self.apply(HookState::Open);
    }

    fn close(&mut self) {
        self.apply(HookState::Closed);
    }

    fn state(&self) -> HookState {
        self.state
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::SimSolenoid;

    #[test]
    fn test_hook() {
        let solenoid = SimSolenoid::new();
        let mut hook = SolenoidHook::new(solenoid.clone());

        hook.open();
        assert!(solenoid.is_extended());
        assert_eq!(hook.state(), HookState::Open);

        hook.toggle();
        assert!(!solenoid.is_extended());
        hook.toggle();
        assert_eq!(hook.state(), HookState::Open);

        // Periodic re-asserts the commanded position
        let mut other = solenoid.clone();
        other.set(false);
        hook.periodic();
        assert!(solenoid.is_extended());

        hook.init();
        hook.init();
        assert_eq!(hook.state(), HookState::Closed);
        assert!(!solenoid.is_extended());
    }
}
