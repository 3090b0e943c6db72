//! Peripheral wrappers which count lifecycle calls, for tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::{
    cargo_guide::{CargoGuide, GuidePosition},
    drive::{Drive, DriveMode, MotionTicket},
    hook::{Hook, HookState},
    launcher::{Launcher, LauncherState}};
use util::module::Peripheral;

/// Shared counts of the lifecycle calls made on a peripheral.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    inits: Rc<Cell<u32>>,
    periodics: Rc<Cell<u32>>,
}

/// Wraps a peripheral, counting its `init` and `periodic` calls.
pub struct Counted<P> {
    inner: P,
    counter: CallCounter,
}

impl CallCounter {
    pub fn inits(&self) -> u32 {
        self.inits.get()
    }

    pub fn periodics(&self) -> u32 {
        self.periodics.get()
    }
}

impl<P> Counted<P> {
    pub fn new(inner: P, counter: CallCounter) -> Self {
        Self { inner, counter }
    }
}

impl<P: Peripheral> Peripheral for Counted<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn init(&mut self) {
        self.counter.inits.set(self.counter.inits.get() + 1);
        self.inner.init();
    }

    fn periodic(&mut self) {
        self.counter.periodics.set(self.counter.periodics.get() + 1);
        self.inner.periodic();
    }
}

impl<P: Drive> Drive for Counted<P> {
    fn current_drive_mode(&self) -> DriveMode {
        self.inner.current_drive_mode()
    }

    fn drive_distance_tracked(
        &mut self,
        distance_in: f64,
        x_speed: f64,
        y_speed: f64
    ) -> MotionTicket {
        self.inner.drive_distance_tracked(distance_in, x_speed, y_speed)
    }

    fn rotate_degrees_tracked(&mut self, relative_angle_deg: f64, angular_speed: f64)
        -> MotionTicket
    {
        self.inner.rotate_degrees_tracked(relative_angle_deg, angular_speed)
    }

    fn take_completion(&mut self, ticket: MotionTicket) -> bool {
        self.inner.take_completion(ticket)
    }

    fn drive_manual(&mut self, x_speed: f64, y_speed: f64) {
        self.inner.drive_manual(x_speed, y_speed)
    }

    fn look_at(&mut self, angle_deg: f64, speed: f64) {
        self.inner.look_at(angle_deg, speed)
    }

    fn maintain_heading(&mut self) {
        self.inner.maintain_heading()
    }
}

impl<P: Hook> Hook for Counted<P> {
    fn open(&mut self) {
        self.inner.open()
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn state(&self) -> HookState {
        self.inner.state()
    }
}

impl<P: Launcher> Launcher for Counted<P> {
    fn spin_up(&mut self) {
        self.inner.spin_up()
    }

    fn launch(&mut self) {
        self.inner.launch()
    }

    fn stop(&mut self) {
        self.inner.stop()
    }

    fn state(&self) -> LauncherState {
        self.inner.state()
    }
}

impl<P: CargoGuide> CargoGuide for Counted<P> {
    fn raise(&mut self) {
        self.inner.raise()
    }

    fn lower(&mut self) {
        self.inner.lower()
    }

    fn position(&self) -> GuidePosition {
        self.inner.position()
    }
}
