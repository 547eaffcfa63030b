//! # Intake control module
//!
//! This module implements the [`IntakeCtrl`] state machine, which drives the
//! intake motors through a set of mutually exclusive modes:
//!
//! - `Off` - All intake motors stopped.
//! - `Intake` - Pull game elements into the robot.
//! - `ScoreLow`, `ScoreMid`, `ScoreHigh` - Feed elements out to the low, mid
//!   and high goals.
//!
//! Each non-off mode is bound to a trigger button. Pressing the trigger of
//! the active mode turns the intake off, pressing any other trigger switches
//! straight to that trigger's mode.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod mode;
mod params;
mod state;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use mode::IntakeMode;
pub use params::*;
pub use state::*;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::ctrl::ButtonId;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in intake control.
#[derive(Debug, thiserror::Error)]
pub enum IntakeCtrlError {
    #[error("IntakeCtrl has not been initialised")]
    NotInitialised,

    #[error("No buttons are bound to intake modes")]
    NoBindings,

    #[error("Button {0:?} is bound to more than one intake mode")]
    DuplicateBinding(ButtonId),

    #[error("Button {0:?} is bound to the off mode, only active modes can be bound")]
    BoundToOff(ButtonId),

    #[error("The intake profiles must contain at least one motor")]
    NoMotors,

    #[error("The {mode:?} profile has {found} motors, expected {expected}")]
    ProfileLength {
        mode: IntakeMode,
        expected: usize,
        found: usize,
    },

    #[error("The {0:?} profile contains a non-finite velocity")]
    NonFiniteVelocity(IntakeMode),
}
