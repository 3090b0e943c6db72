//! Parameters structure for the drive

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the drive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DriveParams {

    // ---- LIMITS ----

    /// Maximum translation output magnitude per axis, between 0 and 1.
    pub max_speed: f64,

    /// Maximum rotation output magnitude, between 0 and 1.
    pub max_rotation_speed: f64,

    /// Longest distance a single scripted move may request.
    ///
    /// Units: inches
    pub max_distance_in: f64,

    /// Largest relative angle a single scripted rotation may request.
    ///
    /// Units: degrees
    pub max_rotation_deg: f64,

    // ---- ROTATION ----

    /// Proportional gain from heading error to rotation output in scripted rotations.
    ///
    /// Units: 1/degrees
    pub rotate_kp: f64,

    /// Smallest rotation output used by scripted rotations, so they don't stall near the target.
    pub min_rotate_speed: f64,

    /// Heading error within which a rotation is complete and heading hold is satisfied.
    ///
    /// Units: degrees
    pub angle_tolerance_deg: f64,

    // ---- HEADING HOLD ----

    /// Proportional gain from heading error to rotation output while holding a heading.
    ///
    /// Units: 1/degrees
    pub heading_kp: f64,

    /// Maximum rotation output used to correct heading during a scripted distance move.
    pub max_heading_correction: f64,

    /// Maximum rotation output used by `maintain_heading`.
    pub heading_hold_speed: f64,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            max_speed: 1.0,
            max_rotation_speed: 1.0,
            max_distance_in: 600.0,
            max_rotation_deg: 720.0,
            rotate_kp: 0.02,
            min_rotate_speed: 0.1,
            angle_tolerance_deg: 2.0,
            heading_kp: 0.02,
            max_heading_correction: 0.3,
            heading_hold_speed: 0.5,
        }
    }
}
