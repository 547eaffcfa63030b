//! Drive control module
//!
//! Converts the driver's stick positions (and, for field-relative drive, the
//! robot's heading) into a velocity demand for every wheel group of the
//! drivetrain.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_field_rel;
mod calc_robot_rel;
mod mixer;
mod params;
mod shaping;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use calc_field_rel::FieldRelMixer;
pub use calc_robot_rel::RobotRelMixer;
pub use mixer::*;
pub use params::*;
pub use shaping::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during DriveCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum DriveCtrlError {
    #[error("DriveCtrl has not been initialised")]
    NotInitialised,

    #[error("Invalid DriveCtrl parameter `{0}`: {1}")]
    InvalidParam(&'static str, String),
}
