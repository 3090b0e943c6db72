//! Implementation of the mecanum drive

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{
    Drive, DriveMode, DriveParams,
    MotionKind, MotionTicket, PendingMotion, TicketDispenser};
use crate::gyro::Gyroscope;
use crate::hal::{DriveOutput, DriveTrain};
use util::{
    logger::log_periodic,
    maths::{clamp, get_ang_dist_deg, saturate},
    module::Peripheral};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Holonomic drive train with gyroscope heading control.
///
/// The drive owns its gyroscope, so it cannot be constructed before the gyroscope exists.
pub struct MecanumDrive<T: DriveTrain, G: Gyroscope> {
    train: T,
    gyro: G,

    params: DriveParams,

    mode: DriveMode,

    tickets: TicketDispenser,

    /// The scripted motion in progress, if any
    motion: Option<PendingMotion>,

    /// Tickets whose motion has completed but which haven't been taken yet
    completed: Vec<MotionTicket>,

    /// Translation demanded by the operator
    manual_x: f64,
    manual_y: f64,

    /// Rotation behaviour while under driver control
    rotation: RotationDemand,

    /// Heading the drive is turning towards while under driver control
    heading_target_deg: Option<f64>,

    /// Output sent to the drive train on the last cycle
    output: DriveOutput,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum RotationDemand {
    /// No rotation
    None,

    /// Turn towards the heading target limiting the rate to the given speed
    LookAt(f64),

    /// Hold the heading target
    Hold,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T: DriveTrain, G: Gyroscope> MecanumDrive<T, G> {

    /// Create a new drive from its drive train and gyroscope.
    pub fn new(train: T, gyro: G, params: DriveParams) -> Self {
        Self {
            train,
            gyro,
            params,
            mode: DriveMode::DriverControl,
            tickets: TicketDispenser::new(),
            motion: None,
            completed: Vec::new(),
            manual_x: 0.0,
            manual_y: 0.0,
            rotation: RotationDemand::None,
            heading_target_deg: None,
            output: DriveOutput::zero(),
        }
    }

    /// The output sent to the drive train on the last cycle.
    pub fn output(&self) -> DriveOutput {
        self.output
    }

    /// The heading the drive is turning towards under driver control, if any.
    pub fn heading_target_deg(&self) -> Option<f64> {
        self.heading_target_deg
    }

    pub fn pending_motion(&self) -> Option<&PendingMotion> {
        self.motion.as_ref()
    }

    /// Start a new scripted motion, replacing any motion already in progress.
    fn start_motion(&mut self, kind: MotionKind) -> MotionTicket {
        let ticket = self.tickets.issue();

        if let Some(old) = self.motion.take() {
            debug!("Motion {:?} replaced by {:?} before completing", old.ticket, ticket);
        }

        self.motion = Some(PendingMotion::new(ticket, kind));
        self.mode = DriveMode::AutonomousMotion;
        self.rotation = RotationDemand::None;
        self.heading_target_deg = None;

        debug!("Motion {:?} started: {:?}", ticket, kind);

        ticket
    }

    /// Drop the motion in progress, its ticket will never complete.
    fn cancel_motion(&mut self) {
        if let Some(m) = self.motion.take() {
            debug!("Motion {:?} cancelled", m.ticket);
        }
        self.mode = DriveMode::DriverControl;
    }

    /// Rotation output which turns from `heading_deg` towards `target_deg` using the heading hold
    /// gain, limited to `limit`.
    fn heading_correction(&self, heading_deg: f64, target_deg: f64, limit: f64) -> f64 {
        let err = get_ang_dist_deg(heading_deg, target_deg);

        if err.abs() <= self.params.angle_tolerance_deg {
            0.0
        }
        else {
            saturate(err * self.params.heading_kp, limit)
        }
    }

    /// Calculate the output for the motion in progress.
    fn calc_motion_output(&mut self, heading: Option<f64>) -> DriveOutput {
        let params = self.params;

        let motion = match self.motion.as_mut() {
            Some(m) => m,
            None => return DriveOutput::zero()
        };

        match motion.kind {
            MotionKind::Distance {
                x_speed,
                y_speed,
                ref mut hold_heading_deg,
                ..
            } => {
                // Capture the heading to hold on the first valid reading
                if hold_heading_deg.is_none() {
                    *hold_heading_deg = heading;
                }

                let rotation = match (heading, *hold_heading_deg) {
                    (Some(h), Some(t)) => {
                        let err = get_ang_dist_deg(h, t);
                        if err.abs() <= params.angle_tolerance_deg {
                            0.0
                        }
                        else {
                            saturate(err * params.heading_kp, params.max_heading_correction)
                        }
                    },
                    _ => {
                        log_periodic("Drive: no heading during distance motion, correction off");
                        0.0
                    }
                };

                DriveOutput {
                    x: x_speed,
                    y: y_speed,
                    rotation,
                }
            },
            MotionKind::Rotation { speed, ref mut start_heading_deg, .. } => {
                let h = match heading {
                    Some(h) => h,
                    None => {
                        log_periodic("Drive: no heading during rotation, holding still");
                        return DriveOutput::zero()
                    }
                };

                if start_heading_deg.is_none() {
                    *start_heading_deg = Some(h);
                }

                let err = match motion.kind.target_heading_deg() {
                    Some(t) => t - h,
                    None => return DriveOutput::zero()
                };

                let magnitude = (err.abs() * params.rotate_kp)
                    .max(params.min_rotate_speed)
                    .min(speed);

                DriveOutput {
                    x: 0.0,
                    y: 0.0,
                    rotation: magnitude.copysign(err),
                }
            }
        }
    }

    /// Calculate the output while under driver control.
    fn calc_manual_output(&mut self, heading: Option<f64>) -> DriveOutput {
        let rotation = match self.rotation {
            RotationDemand::None => 0.0,
            demand => {
                // Capture the current heading if holding and nothing was captured yet
                if demand == RotationDemand::Hold && self.heading_target_deg.is_none() {
                    self.heading_target_deg = heading;
                }

                let limit = match demand {
                    RotationDemand::LookAt(speed) => speed,
                    _ => self.params.heading_hold_speed
                };

                match (heading, self.heading_target_deg) {
                    (Some(h), Some(t)) => self.heading_correction(h, t, limit),
                    (None, _) => {
                        log_periodic("Drive: no heading, heading control off");
                        0.0
                    },
                    _ => 0.0
                }
            }
        };

        DriveOutput {
            x: self.manual_x,
            y: self.manual_y,
            rotation,
        }
    }

    /// Check the motion in progress against fresh sensor readings and update its progress.
    ///
    /// Returns `true` if the motion has reached its target.
    fn check_motion_complete(&mut self) -> bool {
        let travelled_in = self.train.distance_travelled_in();
        let heading = self.gyro.heading_deg();
        let tolerance = self.params.angle_tolerance_deg;

        let motion = match self.motion.as_mut() {
            Some(m) => m,
            None => return false
        };

        match motion.kind {
            MotionKind::Distance { target_in, start_in, .. } => {
                motion.progress = travelled_in - start_in;
                motion.progress >= target_in
            },
            MotionKind::Rotation { .. } => {
                let (h, target) = match (heading, motion.kind.target_heading_deg()) {
                    (Some(h), Some(t)) => (h, t),
                    _ => return false
                };

                let err = target - h;

                if let MotionKind::Rotation {
                    start_heading_deg: Some(start),
                    ref mut last_error_deg,
                    ..
                } = motion.kind {
                    motion.progress = h - start;

                    let crossed = match *last_error_deg {
                        Some(last) => last != 0.0 && last.signum() != err.signum(),
                        None => false
                    };
                    *last_error_deg = Some(err);

                    err.abs() <= tolerance || crossed
                }
                else {
                    false
                }
            }
        }
    }

    /// Finish the motion in progress and stop the drive train.
    fn complete_motion(&mut self) {
        if let Some(m) = self.motion.take() {
            debug!("Motion {:?} complete (progress {:.2})", m.ticket, m.progress);
            self.completed.push(m.ticket);
        }

        self.mode = DriveMode::DriverControl;
        self.rotation = RotationDemand::None;
        self.heading_target_deg = None;
        self.output = DriveOutput::zero();
        self.train.set_output(self.output);
    }
}

impl<T: DriveTrain, G: Gyroscope> Peripheral for MecanumDrive<T, G> {
    fn name(&self) -> &'static str {
        "mecanum_drive"
    }

    fn init(&mut self) {
        self.cancel_motion();
        self.completed.clear();
        self.manual_x = 0.0;
        self.manual_y = 0.0;
        self.rotation = RotationDemand::None;
        self.heading_target_deg = None;
        self.output = DriveOutput::zero();
        self.train.set_output(self.output);
        self.gyro.init();
    }

    fn periodic(&mut self) {
        self.gyro.periodic();
        let heading = self.gyro.heading_deg();

        let output = match self.mode {
            DriveMode::AutonomousMotion => self.calc_motion_output(heading),
            DriveMode::DriverControl => self.calc_manual_output(heading)
        }.saturated();

        trace!("Drive output: {:?}", output);

        self.output = output;
        self.train.set_output(output);

        if self.check_motion_complete() {
            self.complete_motion();
        }
    }
}

impl<T: DriveTrain, G: Gyroscope> Drive for MecanumDrive<T, G> {
    fn current_drive_mode(&self) -> DriveMode {
        self.mode
    }

    fn drive_distance_tracked(
        &mut self,
        distance_in: f64,
        x_speed: f64,
        y_speed: f64
    ) -> MotionTicket {
        let target_in = if distance_in.is_nan() {
            0.0
        }
        else {
            clamp(&distance_in, &0.0, &self.params.max_distance_in)
        };

        let kind = MotionKind::Distance {
            target_in,
            start_in: self.train.distance_travelled_in(),
            x_speed: saturate(x_speed, self.params.max_speed),
            y_speed: saturate(y_speed, self.params.max_speed),
            hold_heading_deg: self.gyro.heading_deg(),
        };

        self.start_motion(kind)
    }

    fn rotate_degrees_tracked(&mut self, relative_angle_deg: f64, angular_speed: f64)
        -> MotionTicket
    {
        let kind = MotionKind::Rotation {
            relative_deg: saturate(relative_angle_deg, self.params.max_rotation_deg),
            speed: saturate(angular_speed, self.params.max_rotation_speed).abs(),
            start_heading_deg: self.gyro.heading_deg(),
            last_error_deg: None,
        };

        self.start_motion(kind)
    }

    fn take_completion(&mut self, ticket: MotionTicket) -> bool {
        match self.completed.iter().position(|t| *t == ticket) {
            Some(i) => {
                self.completed.swap_remove(i);
                true
            },
            None => false
        }
    }

    fn drive_manual(&mut self, x_speed: f64, y_speed: f64) {
        if self.motion.is_some() {
            self.cancel_motion();
        }

        self.manual_x = saturate(x_speed, self.params.max_speed);
        self.manual_y = saturate(y_speed, self.params.max_speed);
    }

    fn look_at(&mut self, angle_deg: f64, speed: f64) {
        if !angle_deg.is_finite() {
            log_periodic("Drive: ignoring look at a non-finite heading");
            return
        }

        if self.motion.is_some() {
            self.cancel_motion();
        }

        self.heading_target_deg = Some(angle_deg);
        self.rotation = RotationDemand::LookAt(
            saturate(speed, self.params.max_rotation_speed).abs()
        );
    }

    fn maintain_heading(&mut self) {
        if self.mode != DriveMode::DriverControl {
            return
        }

        if self.rotation != RotationDemand::Hold {
            self.rotation = RotationDemand::Hold;
            self.heading_target_deg = self.gyro.heading_deg();
        }
    }
}
