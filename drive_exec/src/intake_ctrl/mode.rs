//! Intake modes

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Operating mode of the intake. Exactly one mode is active at a time.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum IntakeMode {
    Off,
    Intake,
    ScoreLow,
    ScoreMid,
    ScoreHigh,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for IntakeMode {
    fn default() -> Self {
        IntakeMode::Off
    }
}

impl IntakeMode {
    /// All active (non-off) modes.
    pub const ACTIVE: [IntakeMode; 4] = [
        IntakeMode::Intake,
        IntakeMode::ScoreLow,
        IntakeMode::ScoreMid,
        IntakeMode::ScoreHigh,
    ];

    /// The mode entered when the trigger bound to `bound` is pressed in this
    /// mode.
    ///
    /// Pressing the trigger of the active mode toggles it off, any other
    /// trigger replaces the active mode.
    pub fn on_trigger(self, bound: IntakeMode) -> IntakeMode {
        if self == bound {
            IntakeMode::Off
        }
        else {
            bound
        }
    }
}
