//! # Driver station
//!
//! The robot's view of the host environment. Each cycle the control loop reads the control word
//! and operator input from the driver station, and reports lifecycle events back to it.
//!
//! [`ScriptedDriverStation`] replays a driver station script, and is what the executable runs
//! against. [`FixedDriverStation`] reports whatever sample it was last given, for tests and
//! benchmarks.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, info};

use comms_if::ds::{ControlWord, DsSample, LifecycleEvent, OperatorInput};
use util::script_interpreter::{PendingSamples, ScriptInterpreter};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Receives lifecycle events from the robot.
pub trait LifecycleObserver {
    fn observe(&mut self, event: LifecycleEvent);
}

/// A source of driver station samples.
pub trait DriverStation: LifecycleObserver {
    /// Sample the control word for this cycle.
    ///
    /// Called exactly once at the start of every cycle.
    fn control_word(&mut self) -> ControlWord;

    /// The operator input for this cycle.
    fn operator_input(&self) -> OperatorInput;

    /// True once the host wants the control loop to exit.
    fn shutdown_requested(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Replays a driver station script, advancing the script clock by one cycle period per sample.
///
/// The end of the script is reported as a shutdown request.
pub struct ScriptedDriverStation {
    si: ScriptInterpreter,
    cycle_period_s: f64,
    time_s: f64,
    current: DsSample,
    last_event: Option<LifecycleEvent>,
    end_of_script: bool,
}

/// Reports a fixed sample until told otherwise.
#[derive(Debug, Default)]
pub struct FixedDriverStation {
    sample: DsSample,

    /// Every event observed, in order
    pub events: Vec<LifecycleEvent>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LifecycleObserver for Vec<LifecycleEvent> {
    fn observe(&mut self, event: LifecycleEvent) {
        self.push(event);
    }
}

impl ScriptedDriverStation {
    pub fn new(si: ScriptInterpreter, cycle_period_s: f64) -> Self {
        Self {
            si,
            cycle_period_s,
            time_s: 0.0,
            current: DsSample::default(),
            last_event: None,
            end_of_script: false,
        }
    }

    /// Script time of the next sample.
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// The most recent lifecycle event reported by the robot.
    pub fn last_event(&self) -> Option<LifecycleEvent> {
        self.last_event
    }
}

impl LifecycleObserver for ScriptedDriverStation {
    fn observe(&mut self, event: LifecycleEvent) {
        if self.last_event != Some(event) {
            debug!("Driver station observed {:?}", event);
        }
        self.last_event = Some(event);
    }
}

impl DriverStation for ScriptedDriverStation {
    fn control_word(&mut self) -> ControlWord {
        match self.si.get_pending_samples(self.time_s) {
            PendingSamples::Some(samples) => {
                // Only the latest sample matters
                if let Some(s) = samples.last() {
                    self.current = *s;
                }
            },
            PendingSamples::None => (),
            PendingSamples::EndOfScript => {
                if !self.end_of_script {
                    info!("End of driver station script at {:.3} s", self.time_s);
                }
                self.end_of_script = true;
            }
        }

        self.time_s += self.cycle_period_s;

        self.current.control
    }

    fn operator_input(&self) -> OperatorInput {
        self.current.input
    }

    fn shutdown_requested(&self) -> bool {
        self.end_of_script
    }
}

impl FixedDriverStation {
    pub fn new(sample: DsSample) -> Self {
        Self {
            sample,
            events: Vec::new(),
        }
    }

    pub fn set_sample(&mut self, sample: DsSample) {
        self.sample = sample;
    }

    pub fn set_control(&mut self, control: ControlWord) {
        self.sample.control = control;
    }

    pub fn set_input(&mut self, input: OperatorInput) {
        self.sample.input = input;
    }
}

impl LifecycleObserver for FixedDriverStation {
    fn observe(&mut self, event: LifecycleEvent) {
        self.events.push(event);
    }
}

impl DriverStation for FixedDriverStation {
    fn control_word(&mut self) -> ControlWord {
        self.sample.control
    }

    fn operator_input(&self) -> OperatorInput {
        self.sample.input
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::ds::OperatorState;

    #[test]
    fn test_scripted_driver_station() {
        let si = ScriptInterpreter::from_script(r#"
            0.0: {"control": {"enabled": false}};
            0.5: {"control": {"enabled": true, "autonomous": true}};
            1.0: {"control": {"enabled": true, "teleop": true}, "input": {"drive_y": 0.5}};
        "#).unwrap();
        let mut ds = ScriptedDriverStation::new(si, 0.25);

        let mut states = Vec::new();
        while !ds.shutdown_requested() {
            states.push(ds.control_word().operator_state().unwrap());
        }

        // Sampled at 0.0, 0.25, ..., 1.25, with the last sample held until the end is seen
        assert_eq!(states, vec![
            OperatorState::Disabled,
            OperatorState::Disabled,
            OperatorState::Autonomous,
            OperatorState::Autonomous,
            OperatorState::Teleoperated,
            OperatorState::Teleoperated,
        ]);
        assert_eq!(ds.operator_input().drive_y, 0.5);
    }
}
