//! # Drive module
//!
//! This module defines the [`Drive`] capability contract, which every drive train implementation
//! must honour, along with the implementations themselves:
//!
//! - [`MecanumDrive`] - a holonomic drive with gyroscope heading control.
//! - [`NullDrive`] - a null object which accepts every command and does nothing, used for bench
//!   testing without hardware.
//!
//! # Scripted motions
//!
//! Distance and rotation moves are scripted motions. Issuing one returns a [`MotionTicket`], and
//! the drive keeps a record of the pending motion which it advances on every `periodic()` call.
//! When the motion's threshold is crossed the drive marks the ticket as complete. The issuer polls
//! [`Drive::take_completion`], which returns `true` exactly once for a completed ticket. A
//! completion is never visible before the first `periodic()` following the command.
//!
//! Re-initialising the drive cancels the pending motion, its ticket will never complete.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod mecanum;
mod motion;
mod null;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use util::module::Peripheral;

pub use mecanum::*;
pub use motion::*;
pub use null::*;
pub use params::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The motion strategy the drive is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DriveMode {
    /// No scripted motion is running, the drive follows manual commands.
    DriverControl,

    /// A scripted distance or rotation motion is running.
    AutonomousMotion,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Drive train capability contract.
///
/// No operation returns an error. Out of range speeds and distances are clamped to the drive's
/// safe operating bounds.
pub trait Drive: Peripheral {
    /// Report which motion strategy is executing.
    ///
    /// Callers must check this before issuing manual commands so they don't fight a scripted
    /// motion.
    fn current_drive_mode(&self) -> DriveMode;

    /// Drive in a straight line for the given distance, without tracking completion.
    fn drive_distance(&mut self, distance_in: f64, x_speed: f64, y_speed: f64) {
        let _ = self.drive_distance_tracked(distance_in, x_speed, y_speed);
    }

    /// Drive in a straight line for the given distance.
    ///
    /// The returned ticket completes on the `periodic()` call in which the distance travelled
    /// since this command reaches `distance_in`. Any motion already pending is cancelled.
    fn drive_distance_tracked(
        &mut self,
        distance_in: f64,
        x_speed: f64,
        y_speed: f64
    ) -> MotionTicket;

    /// Rotate by the given relative angle, without tracking completion.
    fn rotate_degrees(&mut self, angle_deg: f64, angular_speed: f64) {
        let _ = self.rotate_degrees_tracked(angle_deg, angular_speed);
    }

    /// Rotate by the given relative angle.
    ///
    /// The returned ticket completes on the `periodic()` call in which the heading reaches (or
    /// crosses) the target. Any motion already pending is cancelled.
    fn rotate_degrees_tracked(&mut self, relative_angle_deg: f64, angular_speed: f64)
        -> MotionTicket;

    /// Returns `true` if the given motion has completed, and consumes the completion.
    ///
    /// A completed ticket is reported exactly once, later calls return `false`.
    fn take_completion(&mut self, ticket: MotionTicket) -> bool;

    /// Set the translation output directly from the operator's axes.
    ///
    /// Safe to call every cycle. Cancels any scripted motion in progress.
    fn drive_manual(&mut self, x_speed: f64, y_speed: f64);

    /// Rotate towards an absolute heading, limiting the rotation rate to `speed`.
    fn look_at(&mut self, angle_deg: f64, speed: f64);

    /// Hold the current heading while no rotation is being demanded.
    fn maintain_heading(&mut self);
}
