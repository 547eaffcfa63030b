//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use eqpt_if::ctrl::AxisId;
use serde::{Deserialize, Serialize};

use super::{DriveCtrlError, DriveStrategy};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Drive control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- INPUT ----

    /// Full scale magnitude of the controller's analog axes.
    pub axis_full_scale: f64,

    /// Which controller axes drive the strafe, forward and turn inputs.
    pub axis_map: AxisMap,

    // ---- MIXING ----

    /// The mixing strategy used for this robot's drivetrain.
    pub strategy: DriveStrategy,

    /// How wheel group rates beyond ±1 are handled.
    #[serde(default)]
    pub saturation: Saturation,

    /// Gain of the heading hold applied while the driver isn't turning.
    ///
    /// Only used by field-relative drive. Zero disables heading hold.
    ///
    /// Units: turn rate per 180 degrees of heading error
    #[serde(default)]
    pub heading_hold_gain: f64,

    // ---- CAPABILITIES ----

    /// Rated top speed of the drive motors. A normalised rate of 1 is
    /// demanded as this velocity.
    ///
    /// Units: rpm
    pub gear_mult_rpm: f64,
}

/// Assignment of controller axes to the drive inputs.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AxisMap {
    pub strafe: AxisBinding,
    pub forward: AxisBinding,
    pub turn: AxisBinding,
}

/// A single controller axis feeding one drive input.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AxisBinding {
    /// The controller axis to read.
    pub axis: AxisId,

    /// If true the axis reading is negated before use.
    #[serde(default)]
    pub invert: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Handling of mixed wheel group rates outside of ±1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Saturation {
    /// Rates are passed through unchanged, leaving the motor driver to limit
    /// them.
    Off,

    /// Each rate is clipped to ±1 on its own.
    Clip,

    /// If any rate exceeds ±1 all rates are scaled down together, keeping the
    /// direction of motion.
    Desaturate,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Saturation {
    fn default() -> Self {
        Saturation::Clip
    }
}

impl Params {
    /// Check that the parameters describe a usable configuration.
    pub fn validate(&self) -> Result<(), DriveCtrlError> {
        if !(self.axis_full_scale.is_finite() && self.axis_full_scale > 0.0) {
            return Err(DriveCtrlError::InvalidParam(
                "axis_full_scale",
                format!("expected a positive value, found {}", self.axis_full_scale)
            ));
        }

        if !(self.gear_mult_rpm.is_finite() && self.gear_mult_rpm > 0.0) {
            return Err(DriveCtrlError::InvalidParam(
                "gear_mult_rpm",
                format!("expected a positive value, found {}", self.gear_mult_rpm)
            ));
        }

        if !(self.heading_hold_gain.is_finite() && self.heading_hold_gain >= 0.0) {
            return Err(DriveCtrlError::InvalidParam(
                "heading_hold_gain",
                format!("expected zero or a positive value, found {}", self.heading_hold_gain)
            ));
        }

        Ok(())
    }
}

impl AxisBinding {
    /// Apply the binding's inversion to a raw axis reading.
    pub fn apply(&self, raw: f64) -> f64 {
        if self.invert { -raw } else { raw }
    }
}
