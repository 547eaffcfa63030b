//! # Intake control parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::ctrl::ButtonId;
use serde::Deserialize;
use std::collections::HashSet;

use super::{IntakeCtrlError, IntakeMode};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for intake control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Trigger buttons and the mode each one selects.
    ///
    /// When several triggers are pressed in the same cycle they are applied
    /// in this order.
    pub bindings: Vec<Binding>,

    /// Motor velocities for each active mode.
    pub profiles: Profiles,
}

/// A trigger button bound to an intake mode.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Binding {
    pub button: ButtonId,
    pub mode: IntakeMode,
}

/// Velocity of each intake motor in each active mode. The off mode always
/// stops every motor.
///
/// Units: rpm
#[derive(Debug, Clone, Deserialize)]
pub struct Profiles {
    pub intake: Vec<f64>,
    pub score_low: Vec<f64>,
    pub score_mid: Vec<f64>,
    pub score_high: Vec<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Params {
    /// Check the bindings and profiles are consistent.
    pub fn validate(&self) -> Result<(), IntakeCtrlError> {
        if self.bindings.is_empty() {
            return Err(IntakeCtrlError::NoBindings);
        }

        let mut seen = HashSet::new();
        for b in self.bindings.iter() {
            if b.mode == IntakeMode::Off {
                return Err(IntakeCtrlError::BoundToOff(b.button));
            }
            if !seen.insert(b.button) {
                return Err(IntakeCtrlError::DuplicateBinding(b.button));
            }
        }

        let num_motors = self.profiles.intake.len();
        if num_motors == 0 {
            return Err(IntakeCtrlError::NoMotors);
        }

        for mode in IntakeMode::ACTIVE.iter() {
            let profile = self.profiles.get(*mode).unwrap_or(&[]);

            if profile.len() != num_motors {
                return Err(IntakeCtrlError::ProfileLength {
                    mode: *mode,
                    expected: num_motors,
                    found: profile.len(),
                });
            }
            if profile.iter().any(|v| !v.is_finite()) {
                return Err(IntakeCtrlError::NonFiniteVelocity(*mode));
            }
        }

        Ok(())
    }
}

impl Profiles {
    /// Get the profile of an active mode, or `None` for `Off`.
    pub fn get(&self, mode: IntakeMode) -> Option<&[f64]> {
        match mode {
            IntakeMode::Off => None,
            IntakeMode::Intake => Some(self.intake.as_slice()),
            IntakeMode::ScoreLow => Some(self.score_low.as_slice()),
            IntakeMode::ScoreMid => Some(self.score_mid.as_slice()),
            IntakeMode::ScoreHigh => Some(self.score_high.as_slice()),
        }
    }

    /// Number of intake motors.
    pub fn num_motors(&self) -> usize {
        self.intake.len()
    }
}
