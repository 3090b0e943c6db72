//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Environment variable pointing at the root of the software tree.
pub const SW_ROOT_ENV_VAR: &str = "ROBOT_SW_ROOT";

/// Get the root directory of the software tree.
///
/// This is the value of `ROBOT_SW_ROOT` if it is set, otherwise the current working directory.
pub fn get_robot_sw_root() -> std::io::Result<PathBuf> {
    match env::var_os(SW_ROOT_ENV_VAR) {
        Some(root) => Ok(PathBuf::from(root)),
        None => env::current_dir()
    }
}
