//! Module interfaces
//!
//! Each peripheral subsystem driven by the control loop shall implement all the items in this
//! module.

// ---------------------------------------------------------------------------
// PERIPHERAL LIFECYCLE
// ---------------------------------------------------------------------------

/// The lifecycle of a peripheral subsystem.
///
/// A peripheral is constructed once and lives for the whole process. It is initialised on every
/// mode transition and stepped once per control cycle.
pub trait Peripheral {
    /// Name of the peripheral, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Reset the peripheral to a safe starting state.
    ///
    /// This is called on every mode transition, possibly while the peripheral is mid-way through
    /// an operation. It must abort any such operation, and calling it several times in a row must
    /// leave the peripheral in the same state as calling it once.
    fn init(&mut self);

    /// Advance the peripheral by one control step.
    ///
    /// Faults detected during the step are absorbed here, the peripheral shall command a safe
    /// output and carry on rather than report an error.
    fn periodic(&mut self);
}
