//! # Robot Executable Parameters
//!
//! This module provides parameters for the robot executable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::{diagnostics::DiagnosticsParams, sim::SimParams};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RobotExecParams {
    /// Target period of one control cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    pub diagnostics: DiagnosticsParams,

    /// Parameters of the simulated hardware the executable runs against
    pub sim: SimParams,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExecParamsError {
    #[error("The cycle period must be a positive number of seconds, found {0}")]
    InvalidCyclePeriod(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RobotExecParams {
    /// The cycle period as a duration.
    pub fn cycle_period(&self) -> Result<Duration, ExecParamsError> {
        if self.cycle_period_s.is_finite() && self.cycle_period_s > 0.0 {
            Ok(Duration::from_secs_f64(self.cycle_period_s))
        }
        else {
            Err(ExecParamsError::InvalidCyclePeriod(self.cycle_period_s))
        }
    }
}

impl Default for RobotExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            diagnostics: DiagnosticsParams::default(),
            sim: SimParams::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exec_params_file() {
        let params: RobotExecParams = util::params::from_str(
            include_str!("../../params/robot_exec.toml")
        ).unwrap();

        assert_eq!(params.cycle_period_s, 0.02);
        assert_eq!(params.diagnostics.telemetry_interval_cycles, 50);
        assert_eq!(params.sim.max_speed_in_per_cycle, 4.0);
        assert_eq!(params.cycle_period().unwrap(), Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_cycle_period() {
        for period in [-0.02, 0.0, f64::NAN, f64::INFINITY].iter() {
            let params = RobotExecParams {
                cycle_period_s: *period,
                ..RobotExecParams::default()
            };

            match params.cycle_period() {
                Err(ExecParamsError::InvalidCyclePeriod(_)) => (),
                r => panic!("Expected an invalid period error for {}, got {:?}", period, r)
            }
        }
    }
}
