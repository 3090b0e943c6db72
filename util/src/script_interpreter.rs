//! # Driver station script interpreter module
//!
//! This module provides an interpreter for driver station scripts, allowing a timed sequence of
//! driver station samples to be replayed into the robot.
//!
//! A script contains one sample per line in the form `<time_s>: <json>;`, for example:
//!
//! ```text
//! 0.0: {"control": {"enabled": false}};
//! 2.0: {"control": {"enabled": true, "autonomous": true}};
//! 17.0: {"control": {"enabled": true, "teleop": true}, "input": {"drive_y": 0.5}};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::ds::{DsSample, DsParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A sample which is scripted to occur at a specific time.
pub struct Command {
    /// The time the sample is supposed to be applied at
    exec_time_s: f64,

    /// The sample to apply
    sample: DsSample
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending_samples` to
/// acquire a list of samples that are due.
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    cmds: VecDeque<Command>,
    num_cmds: usize,
    duration_s: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid sample at {0} s: {1}")]
    InvalidSample(f64, DsParseError)
}

#[derive(Debug)]
pub enum PendingSamples {
    None,
    Some(Vec<DsSample>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.to_string_lossy().to_string()));
        }

        // Load the script into a string
        let script = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        let mut si = Self::from_script(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut cmd_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        for cap in re.captures_iter(script) {
            // Groups 1 and 3 are not optional so are always present in a match
            let (time_str, payload) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(p)) => (t.as_str(), p.as_str()),
                _ => continue
            };

            // Parse the exec time
            let exec_time_s: f64 = match time_str.parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the sample from the payload. The scripts contain JSON only.
            let sample = match DsSample::from_json(payload) {
                Ok(s) => s,
                Err(e) => return Err(ScriptError::InvalidSample(
                    exec_time_s, e
                ))
            };

            cmd_queue.push_back(Command {
                exec_time_s,
                sample
            });
        }

        if cmd_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        let num_cmds = cmd_queue.len();
        let duration_s = cmd_queue
            .iter()
            .map(|c| c.exec_time_s)
            .fold(0f64, f64::max);

        Ok(ScriptInterpreter {
            _script_path: None,
            cmds: cmd_queue,
            num_cmds,
            duration_s
        })
    }

    /// Return all samples due at or before `current_time_s`.
    ///
    /// Once every sample has been returned `PendingSamples::EndOfScript` is returned.
    pub fn get_pending_samples(&mut self, current_time_s: f64) -> PendingSamples {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingSamples::EndOfScript
        }

        let mut sample_vec: Vec<DsSample> = vec![];

        // Peek items from the queue, if the head's exec time is lower than
        // the current time add it to the vector, and keep adding samples until
        // the exec times are larger than the current time.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s > current_time_s {
                break;
            }

            if let Some(cmd) = self.cmds.pop_front() {
                sample_vec.push(cmd.sample);
            }
        }

        // If the vector is longer than 0 return Some, otherwise None
        if sample_vec.is_empty() {
            PendingSamples::None
        }
        else {
            PendingSamples::Some(sample_vec)
        }
    }

    /// Get the number of samples in the script
    pub fn get_num_samples(&self) -> usize {
        self.num_cmds
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        self.duration_s
    }
}
