//! # Controller Equipment Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Full scale magnitude of a controller analog axis.
pub const AXIS_FULL_SCALE: f64 = 127.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The state of the controller and orientation sensor at one instant.
///
/// Fields missing from a serialised frame take their default (centred sticks, zero heading, no
/// buttons held).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InputFrame {
    /// Left stick horizontal axis, between `-AXIS_FULL_SCALE` and `AXIS_FULL_SCALE`.
    pub left_x: f64,

    /// Left stick vertical axis.
    pub left_y: f64,

    /// Right stick horizontal axis.
    pub right_x: f64,

    /// Right stick vertical axis.
    pub right_y: f64,

    /// Heading reported by the orientation sensor.
    ///
    /// Units: degrees
    pub heading_deg: f64,

    /// Buttons held down in this frame.
    pub held: Vec<ButtonId>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Analog axes available on the controller.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum AxisId {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

/// Digital buttons available on the controller.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum ButtonId {
    L1,
    L2,
    R1,
    R2,
    A,
    B,
    X,
    Y,
    Up,
    Down,
    Left,
    Right,
}

/// Errors which can occur while parsing an [`InputFrame`].
#[derive(Debug, Error)]
pub enum FrameParseError {
    #[error("Could not parse the input frame from JSON: {0}")]
    JsonError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl InputFrame {
    /// Parse a frame from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, FrameParseError> {
        serde_json::from_str(json_str).map_err(FrameParseError::JsonError)
    }

    /// Get the value of one of the frame's axes.
    pub fn axis(&self, id: AxisId) -> f64 {
        match id {
            AxisId::LeftX => self.left_x,
            AxisId::LeftY => self.left_y,
            AxisId::RightX => self.right_x,
            AxisId::RightY => self.right_y,
        }
    }

    /// Returns true if the given button is held in this frame.
    pub fn is_held(&self, button: ButtonId) -> bool {
        self.held.contains(&button)
    }
}
