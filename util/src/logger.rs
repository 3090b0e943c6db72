//! Generic logger utility functions
//!
//! As well as the main logger this module provides the periodic diagnostic channel. Messages
//! logged with [`log_periodic`] are not emitted straight away, instead they are batched and
//! emitted together once per control cycle by [`flush_periodic`]. This keeps code that runs every
//! cycle from flooding the log.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info, warn};
use fern;
use colored::{ColoredString, Colorize};
use conquer_once::Lazy;
use std::sync::Mutex;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum number of messages held by a [`PeriodicLog`] between flushes.
pub const PERIODIC_LOG_CAPACITY: usize = 256;

/// Log target used when emitting the periodic messages.
pub const PERIODIC_LOG_TARGET: &str = "periodic";

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static PERIODIC_LOG: Lazy<Mutex<PeriodicLog>> = Lazy::new(new_periodic_log);

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A buffer of diagnostic messages emitted in batches.
#[derive(Debug)]
pub struct PeriodicLog {
    pending: Vec<String>,

    /// Number of messages dropped since the last flush because the buffer was full
    num_dropped: usize,

    flush_interval_cycles: u32,
    cycles_since_flush: u32,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level less than `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PeriodicLog {
    /// Create a new log which emits its messages every `flush_interval_cycles` flushes.
    ///
    /// An interval of zero is treated as one.
    pub fn new(flush_interval_cycles: u32) -> Self {
        Self {
            pending: Vec::new(),
            num_dropped: 0,
            flush_interval_cycles: flush_interval_cycles.max(1),
            cycles_since_flush: 0,
        }
    }

    /// Change the number of cycles between emissions.
    pub fn set_flush_interval(&mut self, flush_interval_cycles: u32) {
        self.flush_interval_cycles = flush_interval_cycles.max(1);
    }

    /// Queue a message for the next emission.
    ///
    /// If the buffer is full the message is dropped and counted.
    pub fn push(&mut self, msg: String) {
        if self.pending.len() >= PERIODIC_LOG_CAPACITY {
            self.num_dropped += 1;
        }
        else {
            self.pending.push(msg);
        }
    }

    /// Number of messages waiting to be emitted.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Perform the once-per-cycle flush.
    ///
    /// Returns the lines to emit, which is empty unless the flush interval has elapsed. Runs of
    /// identical consecutive messages are collapsed into a single line with a repeat count.
    pub fn flush(&mut self) -> Vec<String> {
        self.cycles_since_flush += 1;
        if self.cycles_since_flush < self.flush_interval_cycles {
            return Vec::new();
        }
        self.cycles_since_flush = 0;

        let mut lines = Vec::new();
        let mut last: Option<(String, usize)> = None;

        for msg in self.pending.drain(..) {
            if let Some((ref last_msg, ref mut count)) = last {
                if *last_msg == msg {
                    *count += 1;
                    continue;
                }
            }

            if let Some(entry) = last.take() {
                lines.push(format_entry(entry));
            }
            last = Some((msg, 1));
        }

        if let Some(entry) = last {
            lines.push(format_entry(entry));
        }

        if self.num_dropped > 0 {
            lines.push(format!("{} diagnostic messages dropped", self.num_dropped));
            self.num_dropped = 0;
        }

        lines
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - `min_level` must be greater than `log::Level::Info`.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level))
    }

    // Setup the logger using fern's builder pattern
    match fern::Dispatch::new()
        .format(|out, message, record| {

            // If debug or trace include the target, otherwise don't include it
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            }
            else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    message
                ))
            }

        })
        .level(min_level)
        .chain(std::io::stdout())
        .chain(match fern::log_file(session.log_file_path.clone()) {
            Ok(f) => f,
            Err(e) => return Err(LoggerInitError::LogFileInitError(e))
        })
        .apply() {
            Ok(_) => (),
            Err(e) => return Err(LoggerInitError::FernInitError(e))
        };

    info!("Logging initialised");
    info!("    Session epoch: {}", session.epoch);
    info!("    Log level: {:?}", min_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

/// Queue a message on the periodic diagnostic channel.
pub fn log_periodic<S: Into<String>>(msg: S) {
    match PERIODIC_LOG.lock() {
        Ok(mut l) => l.push(msg.into()),
        Err(_) => warn!("Couldn't get lock on the periodic log")
    }
}

/// Set the number of cycles between emissions of the periodic diagnostic channel.
pub fn set_periodic_flush_interval(flush_interval_cycles: u32) {
    match PERIODIC_LOG.lock() {
        Ok(mut l) => l.set_flush_interval(flush_interval_cycles),
        Err(_) => warn!("Couldn't get lock on the periodic log")
    }
}

/// Flush the periodic diagnostic channel, must be called once per cycle.
pub fn flush_periodic() {
    // Take the lines out before logging so the lock isn't held while writing
    let lines = match PERIODIC_LOG.lock() {
        Ok(mut l) => l.flush(),
        Err(_) => {
            warn!("Couldn't get lock on the periodic log");
            return
        }
    };

    for line in lines {
        info!(target: PERIODIC_LOG_TARGET, "{}", line);
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info  => "INF".normal(),
        log::Level::Warn  => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold()
    }
}

fn format_entry((msg, count): (String, usize)) -> String {
    if count > 1 {
        format!("{} (x{})", msg, count)
    }
    else {
        msg
    }
}

fn new_periodic_log() -> Mutex<PeriodicLog> {
    Mutex::new(PeriodicLog::new(1))
}
