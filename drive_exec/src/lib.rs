//! # Drive library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the drive crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Control loop - ties input, drive control, intake control and actuation together each tick
pub mod ctrl_loop;

/// Global data store for the control loop
pub mod data_store;

/// Drive control module - converts stick positions into wheel group demands
pub mod drive_ctrl;

/// Equipment - traits for the input, actuation and pacing devices, and their host implementations
pub mod eqpt;

/// Intake control module - selects the intake mode from trigger presses
pub mod intake_ctrl;

/// Executable parameters
pub mod params;
