//! # Equipment interface crate.
//!
//! Provides the interface types passed between the driver control loop and the equipment around
//! it: the handheld controller and orientation sensor on the input side, and the motors on the
//! output side.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Controller and orientation sensor inputs
pub mod ctrl;

/// Motor demands
pub mod mech;
