//! Session management
//!
//! A session is one run of an executable. Each session gets its own directory under the sessions
//! directory of the software root, holding the session's log file. The session start time is the
//! epoch for every timestamp in the log.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

// Internal imports
use crate::{host, time};

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Format of the timestamp in session directory names, see
/// https://docs.rs/chrono/0.4/chrono/format/strftime/index.html.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Information about the current session.
#[derive(Clone, Debug)]
pub struct Session {
    /// Name of the executable which started the session
    pub exec_name: String,

    /// Time the session started
    pub epoch: DateTime<Utc>,

    /// The root directory for this session
    pub session_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot find the software root directory: {0}")]
    CannotFindRoot(std::io::Error),

    #[error("Cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error("A session has already been started in this process")]
    AlreadyStarted,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start the session for this process.
    ///
    /// Creates the directory `<root>/<sessions_dir>/<exec_name>_<timestamp>`. Only one session
    /// may be started per process.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        SESSION_EPOCH.try_init_once(Utc::now)
            .map_err(|_| SessionError::AlreadyStarted)?;

        let epoch = *SESSION_EPOCH.get().ok_or(SessionError::AlreadyStarted)?;

        let mut session_root = host::get_robot_sw_root()
            .map_err(SessionError::CannotFindRoot)?;
        session_root.push(sessions_dir);
        session_root.push(session_dir_name(exec_name, &epoch));

        fs::create_dir_all(&session_root).map_err(SessionError::CannotCreateDir)?;

        let log_file_path = session_root.join(format!("{}.log", exec_name));

        Ok(Session {
            exec_name: String::from(exec_name),
            epoch,
            session_root,
            log_file_path,
        })
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the number of seconds elapsed since the start of the session.
///
/// If no session has been started zero is returned, so that logging from tests and other
/// session-less contexts still works.
pub fn get_elapsed_seconds() -> f64 {
    match SESSION_EPOCH.get() {
        Some(e) => time::duration_to_seconds(Utc::now() - *e).unwrap_or(std::f64::NAN),
        None => 0.0,
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn session_dir_name(exec_name: &str, epoch: &DateTime<Utc>) -> String {
    format!("{}_{}", exec_name, epoch.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_dir_name() {
        let epoch = Utc.ymd(2019, 3, 15).and_hms(20, 5, 9);
        assert_eq!(session_dir_name("robot_exec", &epoch), "robot_exec_20190315_200509");
    }
}
