//! # Communications interface crate.
//!
//! Provides the types which cross the boundary between the robot core and the host environment
//! (the driver station).

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Driver station interface: operator state, control word and operator input
pub mod ds;
