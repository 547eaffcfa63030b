//! # Mechanisms Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A batch of demands sent to the motors.
///
/// A batch is applied by the receiving driver as a single unit, so no partial update of the
/// actuators it names is ever visible.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MechDems {
    /// The demanded velocity of each actuator.
    ///
    /// Units: rpm
    pub speed_rpm: BTreeMap<ActId, f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Logical wheel groups of a drivetrain.
///
/// All motors in a group are ganged together and commanded with one velocity.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum WheelGroup {
    FrontLeft,
    FrontRight,
    MidLeft,
    MidRight,
    BackLeft,
    BackRight,
}

/// IDs of all actuators driven by the control loop.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum ActId {
    /// A drivetrain wheel group.
    Drv(WheelGroup),

    /// An intake motor, by its index in the intake profiles.
    Intake(usize),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MechDems {
    /// Build a batch of zero demands for the given actuators.
    pub fn zeroed<I: IntoIterator<Item = ActId>>(ids: I) -> Self {
        Self {
            speed_rpm: ids.into_iter().map(|id| (id, 0.0)).collect(),
        }
    }

    /// Get the demand for an actuator, or `None` if it isn't part of this batch.
    pub fn get(&self, id: ActId) -> Option<f64> {
        self.speed_rpm.get(&id).copied()
    }

    /// Set the demand for an actuator.
    pub fn set(&mut self, id: ActId, speed_rpm: f64) {
        self.speed_rpm.insert(id, speed_rpm);
    }

    /// Number of actuators in this batch.
    pub fn len(&self) -> usize {
        self.speed_rpm.len()
    }

    /// Returns true if the batch contains no demands.
    pub fn is_empty(&self) -> bool {
        self.speed_rpm.is_empty()
    }
}
