//! Pending motion records

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Handle to a scripted motion.
#[must_use = "a motion ticket is the only way to observe the motion's completion"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MotionTicket(u64);

/// Issues unique motion tickets.
///
/// Tickets are never reused, so a ticket from a cancelled motion can't be confused with a newer
/// one.
#[derive(Debug, Default)]
pub struct TicketDispenser {
    next_id: u64,
}

/// A scripted motion in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMotion {
    /// The ticket which completes with this motion
    pub ticket: MotionTicket,

    /// What the motion is doing
    pub kind: MotionKind,

    /// Progress towards the target so far.
    ///
    /// Units: inches for distance motions, degrees for rotations.
    pub progress: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionKind {
    Distance {
        /// Distance to travel
        ///
        /// Units: inches
        target_in: f64,

        /// Odometry reading when the motion started
        ///
        /// Units: inches
        start_in: f64,

        x_speed: f64,
        y_speed: f64,

        /// Heading to hold while driving, captured from the first valid gyroscope reading.
        hold_heading_deg: Option<f64>,
    },
    Rotation {
        /// Requested rotation relative to the heading at the start of the motion.
        relative_deg: f64,

        /// Maximum rotation output
        speed: f64,

        /// Heading at the start of the motion, captured from the first valid gyroscope reading.
        start_heading_deg: Option<f64>,

        /// Heading error seen when the last output was computed
        last_error_deg: Option<f64>,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TicketDispenser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket.
    pub fn issue(&mut self) -> MotionTicket {
        let ticket = MotionTicket(self.next_id);
        self.next_id += 1;
        ticket
    }
}

impl PendingMotion {
    pub fn new(ticket: MotionTicket, kind: MotionKind) -> Self {
        Self {
            ticket,
            kind,
            progress: 0.0,
        }
    }
}

impl MotionKind {
    /// The absolute target heading of a rotation, once its start heading is known.
    pub fn target_heading_deg(&self) -> Option<f64> {
        match *self {
            MotionKind::Rotation {
                relative_deg,
                start_heading_deg: Some(start),
                ..
            } => Some(start + relative_deg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tickets_are_unique() {
        let mut dispenser = TicketDispenser::new();
        let a = dispenser.issue();
        let b = dispenser.issue();
        assert_ne!(a, b);
    }
}
