//! Utility library for the robot control software
//!
//! Support shared by every crate in the workspace: logging and the periodic diagnostic channel,
//! sessions, parameter loading, driver station script replay and a few maths helpers.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod host;
#[macro_use]
pub mod logger;
pub mod maths;
pub mod module;
pub mod params;
pub mod script_interpreter;
pub mod session;
pub mod time;

// ---------------------------------------------------------------------------
// MACROS
// ---------------------------------------------------------------------------

/// Log an unrecoverable error and panic.
///
/// Only for conditions the control loop cannot continue from. Anything a caller could handle
/// should be returned as an error instead.
#[macro_export]
macro_rules! raise_error {
    () => ({
        log::error!("Unrecoverable error raised");
        std::panic!("Unrecoverable error");
    });
    ($msg:expr) => ({
        log::error!("{}", $msg);
        std::panic!("{}", $msg);
    });
    ($fmt:expr, $($arg:tt)+) => ({
        log::error!($fmt, $($arg)+);
        std::panic!($fmt, $($arg)+);
    });
}
