//! # Driver station module
//!
//! This module defines the data reported by the driver station to the robot each cycle. The
//! driver station itself (and how it is polled) belongs to the host environment, the core only
//! sees the samples defined here.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The control word reported by the driver station.
///
/// The control word is the raw form of the [`OperatorState`], use
/// [`ControlWord::operator_state`] to resolve it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlWord {
    /// True if the robot is enabled. A disabled robot is always in the disabled state no matter
    /// which phase flags are set.
    pub enabled: bool,

    /// Autonomous phase flag
    pub autonomous: bool,

    /// Teleoperated phase flag
    pub teleop: bool,

    /// Test phase flag
    pub test: bool,
}

/// Live operator input values.
///
/// Axes are normalised between -1 and +1, with `y` positive forwards and `x` positive to the
/// right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorInput {
    /// Translation stick, sideways axis
    pub drive_x: f64,

    /// Translation stick, forwards axis
    pub drive_y: f64,

    /// Aiming stick, sideways axis
    pub aim_x: f64,

    /// Aiming stick, forwards axis
    pub aim_y: f64,

    /// Toggles the hook between open and closed on the rising edge
    pub hook_toggle: bool,

    /// Spins up the launcher while held
    pub spin_up: bool,

    /// Launches the loaded cargo
    pub launch: bool,

    /// Lowers the cargo guide while held
    pub guide_lower: bool,

    /// Requests a short scripted forwards move
    pub nudge: bool,
}

/// A single sample from the driver station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DsSample {
    /// The control word at this sample
    pub control: ControlWord,

    /// The operator input at this sample
    pub input: OperatorInput,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The competition phase the robot is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorState {
    Disabled,
    Autonomous,
    Teleoperated,
    Test,
}

/// Lifecycle events the robot reports back to the driver station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// The user program has started and is about to enter the main loop
    ProgramStarting,
    Disabled,
    Autonomous,
    Teleop,
    Test,
}

/// Errors raised when a control word cannot be resolved into an operator state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlWordError {
    #[error("Robot is enabled but no phase flag is set ({0:?})")]
    NoPhase(ControlWord),

    #[error("Robot is enabled with more than one phase flag set ({0:?})")]
    AmbiguousPhase(ControlWord),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum DsParseError {
    #[error("Sample contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlWord {
    /// Control word for a disabled robot.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Control word for an enabled robot in the given phase.
    ///
    /// `OperatorState::Disabled` gives the disabled control word.
    pub fn enabled(state: OperatorState) -> Self {
        match state {
            OperatorState::Disabled => Self::disabled(),
            OperatorState::Autonomous => Self {
                enabled: true,
                autonomous: true,
                ..Self::default()
            },
            OperatorState::Teleoperated => Self {
                enabled: true,
                teleop: true,
                ..Self::default()
            },
            OperatorState::Test => Self {
                enabled: true,
                test: true,
                ..Self::default()
            },
        }
    }

    /// Resolve the control word into an operator state.
    ///
    /// A disabled robot is always `Disabled`. An enabled robot must have exactly one phase flag
    /// set, otherwise the word is not recognised and an error is returned.
    pub fn operator_state(&self) -> Result<OperatorState, ControlWordError> {
        if !self.enabled {
            return Ok(OperatorState::Disabled);
        }

        match (self.autonomous, self.teleop, self.test) {
            (true, false, false) => Ok(OperatorState::Autonomous),
            (false, true, false) => Ok(OperatorState::Teleoperated),
            (false, false, true) => Ok(OperatorState::Test),
            (false, false, false) => Err(ControlWordError::NoPhase(*self)),
            _ => Err(ControlWordError::AmbiguousPhase(*self)),
        }
    }
}

impl DsSample {
    /// Parse a new sample from a JSON packet.
    ///
    /// Missing fields take their default values, so `{}` is a disabled robot with no input.
    pub fn from_json(json_str: &str) -> Result<Self, DsParseError> {
        serde_json::from_str(json_str).map_err(DsParseError::InvalidJson)
    }
}

impl From<OperatorState> for LifecycleEvent {
    fn from(state: OperatorState) -> Self {
        match state {
            OperatorState::Disabled => LifecycleEvent::Disabled,
            OperatorState::Autonomous => LifecycleEvent::Autonomous,
            OperatorState::Teleoperated => LifecycleEvent::Teleop,
            OperatorState::Test => LifecycleEvent::Test,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_control_word_resolution() {
        // Disabled wins over any phase flag
        let cw = ControlWord {
            enabled: false,
            autonomous: true,
            teleop: true,
            test: false,
        };
        assert_eq!(cw.operator_state(), Ok(OperatorState::Disabled));

        for state in [
            OperatorState::Disabled,
            OperatorState::Autonomous,
            OperatorState::Teleoperated,
            OperatorState::Test,
        ]
        .iter()
        {
            assert_eq!(ControlWord::enabled(*state).operator_state(), Ok(*state));
        }
    }

    #[test]
    fn test_unrecognised_control_word() {
        let none = ControlWord {
            enabled: true,
            ..ControlWord::default()
        };
        assert_eq!(none.operator_state(), Err(ControlWordError::NoPhase(none)));

        let both = ControlWord {
            enabled: true,
            autonomous: true,
            test: true,
            ..ControlWord::default()
        };
        assert_eq!(
            both.operator_state(),
            Err(ControlWordError::AmbiguousPhase(both))
        );
    }

    #[test]
    fn test_sample_from_json() {
        let sample = DsSample::from_json(
            r#"{"control": {"enabled": true, "teleop": true}, "input": {"drive_y": 0.5}}"#,
        )
        .unwrap();

        assert_eq!(
            sample.control.operator_state(),
            Ok(OperatorState::Teleoperated)
        );
        assert_eq!(sample.input.drive_y, 0.5);
        assert_eq!(sample.input.drive_x, 0.0);
        assert!(!sample.input.launch);

        assert_eq!(DsSample::from_json("{}").unwrap(), DsSample::default());
        assert!(DsSample::from_json("{\"control\": 3").is_err());
    }
}
