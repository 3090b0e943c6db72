//! Null drive implementation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use super::{Drive, DriveMode, MotionTicket, TicketDispenser};
use util::{logger::log_periodic, module::Peripheral};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A drive which accepts every command and does nothing.
///
/// Used for bench testing without a drive train. The drive is always under driver control and its
/// scripted motions never complete.
#[derive(Debug, Default)]
pub struct NullDrive {
    tickets: TicketDispenser,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl NullDrive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Peripheral for NullDrive {
    fn name(&self) -> &'static str {
        "null_drive"
    }

    fn init(&mut self) {}

    fn periodic(&mut self) {}
}

impl Drive for NullDrive {
    fn current_drive_mode(&self) -> DriveMode {
        DriveMode::DriverControl
    }

    fn drive_distance_tracked(
        &mut self,
        distance_in: f64,
        x_speed: f64,
        y_speed: f64
    ) -> MotionTicket {
        debug!(
            "NullDrive: drive {:.1} in at ({:.2}, {:.2}) ignored",
            distance_in, x_speed, y_speed
        );
        self.tickets.issue()
    }

    fn rotate_degrees_tracked(&mut self, relative_angle_deg: f64, angular_speed: f64)
        -> MotionTicket
    {
        debug!(
            "NullDrive: rotate {:.1} deg at {:.2} ignored",
            relative_angle_deg, angular_speed
        );
        self.tickets.issue()
    }

    fn take_completion(&mut self, _ticket: MotionTicket) -> bool {
        false
    }

    fn drive_manual(&mut self, _x_speed: f64, _y_speed: f64) {}

    fn look_at(&mut self, angle_deg: f64, speed: f64) {
        log_periodic(format!("NullDrive: look at {:.1} deg at {:.2}", angle_deg, speed));
    }

    fn maintain_heading(&mut self) {}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_null_drive_never_completes() {
        let mut drive = NullDrive::new();
        drive.init();

        let a = drive.drive_distance_tracked(24.0, 0.5, 0.0);
        let b = drive.rotate_degrees_tracked(90.0, 0.5);
        assert_ne!(a, b);

        for _ in 0..50 {
            drive.drive_manual(1.0, 1.0);
            drive.periodic();
            assert!(!drive.take_completion(a));
            assert!(!drive.take_completion(b));
            assert_eq!(drive.current_drive_mode(), DriveMode::DriverControl);
        }
    }
}
