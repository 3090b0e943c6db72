//! # Gyroscope interface

use util::module::Peripheral;

/// A heading sensor.
///
/// Headings are continuous (they do not wrap at 360), positive clockwise, in degrees.
pub trait Gyroscope: Peripheral {
    /// The current heading, or `None` if the sensor cannot provide a valid reading right now.
    ///
    /// A missing reading is a transient fault, callers shall hold a safe output until readings
    /// return.
    fn heading_deg(&self) -> Option<f64>;
}
