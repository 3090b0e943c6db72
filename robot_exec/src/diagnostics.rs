//! # Diagnostics
//!
//! Deferred output of the control loop. At the end of every cycle the loop hands a telemetry
//! snapshot to [`Diagnostics::flush`], which decides whether to log it and then flushes the
//! periodic diagnostic channel.
//!
//! While the live window is on (the robot entered the test phase) a snapshot is logged every
//! cycle, otherwise one is logged every `telemetry_interval_cycles` cycles.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use comms_if::ds::OperatorState;
use crate::{
    cargo_guide::{CargoGuide, GuidePosition},
    drive::{Drive, DriveMode},
    hook::{Hook, HookState},
    launcher::{Launcher, LauncherState},
    modes::ModeId,
    peripherals::Peripherals};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Log target used for telemetry snapshots.
pub const TELEMETRY_TARGET: &str = "telemetry";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiagnosticsParams {
    /// Number of cycles between telemetry snapshots while the live window is off.
    pub telemetry_interval_cycles: u32,

    /// Number of cycles between emissions of the periodic diagnostic channel.
    pub periodic_log_interval_cycles: u32,
}

pub struct Diagnostics {
    params: DiagnosticsParams,
    live_window: bool,
    cycles_since_telemetry: u32,
}

/// A snapshot of the robot's state at the end of a cycle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Telemetry {
    pub cycle: u64,
    pub state: OperatorState,
    pub mode: ModeId,
    pub drive_mode: DriveMode,
    pub hook: HookState,
    pub launcher: LauncherState,
    pub cargo_guide: GuidePosition,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for DiagnosticsParams {
    fn default() -> Self {
        Self {
            telemetry_interval_cycles: 50,
            periodic_log_interval_cycles: 1,
        }
    }
}

impl Diagnostics {
    pub fn new(params: DiagnosticsParams) -> Self {
        util::logger::set_periodic_flush_interval(params.periodic_log_interval_cycles);

        Self {
            params,
            live_window: false,
            cycles_since_telemetry: 0,
        }
    }

    /// Turn the live window on or off.
    pub fn set_live_window(&mut self, enabled: bool) {
        if self.live_window != enabled {
            debug!("Live window {}", if enabled { "enabled" } else { "disabled" });
        }
        self.live_window = enabled;
    }

    pub fn is_live_window(&self) -> bool {
        self.live_window
    }

    /// Flush the output accumulated during the cycle.
    ///
    /// Returns `true` if the telemetry snapshot was logged.
    pub fn flush(&mut self, telemetry: &Telemetry) -> bool {
        self.cycles_since_telemetry += 1;

        let emit = self.live_window
            || self.cycles_since_telemetry >= self.params.telemetry_interval_cycles.max(1);

        if emit {
            self.cycles_since_telemetry = 0;

            match serde_json::to_string(telemetry) {
                Ok(s) => info!(target: TELEMETRY_TARGET, "{}", s),
                Err(e) => warn!("Could not serialise telemetry: {}", e)
            }
        }

        util::logger::flush_periodic();

        emit
    }
}

impl Telemetry {
    /// Take a snapshot of the peripherals.
    pub fn capture(
        cycle: u64,
        state: OperatorState,
        mode: ModeId,
        periph: &Peripherals
    ) -> Self {
        Self {
            cycle,
            state,
            mode,
            drive_mode: periph.drive.current_drive_mode(),
            hook: periph.hook.state(),
            launcher: periph.launcher.state(),
            cargo_guide: periph.cargo_guide.position(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn telemetry() -> Telemetry {
        Telemetry {
            cycle: 0,
            state: OperatorState::Disabled,
            mode: ModeId::Disabled,
            drive_mode: DriveMode::DriverControl,
            hook: HookState::Closed,
            launcher: LauncherState::Idle,
            cargo_guide: GuidePosition::Raised,
        }
    }

    #[test]
    fn test_telemetry_interval() {
        let mut diag = Diagnostics::new(DiagnosticsParams {
            telemetry_interval_cycles: 3,
            periodic_log_interval_cycles: 1,
        });
        let t = telemetry();

        let emitted: Vec<bool> = (0..6).map(|_| diag.flush(&t)).collect();
        assert_eq!(emitted, vec![false, false, true, false, false, true]);

        diag.set_live_window(true);
        assert!(diag.is_live_window());
        assert!((0..4).all(|_| diag.flush(&t)));
    }

    #[test]
    fn test_telemetry_serialises() {
        let s = serde_json::to_string(&telemetry()).unwrap();
        assert!(s.contains("\"mode\":\"Disabled\""));
        assert!(s.contains("\"launcher\":\"Idle\""));
    }
}
