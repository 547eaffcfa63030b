//! Input shaping of the raw controller axes

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Raw axis readings for one cycle, in controller units.
///
/// Each value is expected to lie within `[-full_scale, full_scale]` of the
/// controller the reading came from.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct AxisReading {
    /// Lateral (strafe) axis, positive to the right
    pub x: f64,

    /// Forward axis, positive forwards
    pub y: f64,

    /// Rotation axis, positive clockwise
    pub turn: f64,
}

/// Axes after shaping, each between -1 and +1.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct ShapedAxes {
    pub x: f64,
    pub y: f64,
    pub turn: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Shape a single raw axis value.
///
/// The value is normalised by the axis full scale and cubed. This keeps the
/// sign and the end points (±full scale maps to ±1) while giving finer
/// control close to the centre of the stick.
pub fn shape_axis(raw: f64, full_scale: f64) -> f64 {
    (raw / full_scale).powi(3)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ShapedAxes {
    /// Shape every axis of a reading.
    pub fn from_reading(reading: &AxisReading, full_scale: f64) -> Self {
        Self {
            x: shape_axis(reading.x, full_scale),
            y: shape_axis(reading.y, full_scale),
            turn: shape_axis(reading.turn, full_scale),
        }
    }
}
