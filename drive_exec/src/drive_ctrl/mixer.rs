//! Drive mixer interface
//!
//! A mixer turns shaped axes into a normalised rate for each wheel group of a
//! particular drivetrain layout. Which mixer is used is fixed by parameters
//! when DriveCtrl is initialised.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use eqpt_if::mech::WheelGroup;
use serde::{Deserialize, Serialize};

// Internal
use super::{FieldRelMixer, RobotRelMixer, ShapedAxes};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Normalised rate of each wheel group, in the order given by the mixer's
/// `groups()`.
pub type GroupRates = Vec<(WheelGroup, f64)>;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Common interface of all drive mixing strategies.
pub trait DriveMixer {
    /// The wheel groups driven by this mixer.
    ///
    /// Every call to `mix` produces exactly one rate for each of these groups.
    fn groups(&self) -> &'static [WheelGroup];

    /// Mix the shaped axes into a rate for each wheel group.
    ///
    /// `heading_deg` is the robot's current heading, if one is available.
    /// Mixers which do not depend on the heading ignore it.
    fn mix(&self, axes: &ShapedAxes, heading_deg: Option<f64>) -> GroupRates;
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The available drive mixing strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveStrategy {
    /// Holonomic drive relative to the robot's own facing, four corner
    /// groups.
    RobotRelative,

    /// Drive relative to the field using the live heading, front and middle
    /// groups.
    FieldRelative,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveStrategy {
    /// Build the mixer implementing this strategy.
    pub fn build_mixer(&self) -> Box<dyn DriveMixer + Send> {
        match self {
            DriveStrategy::RobotRelative => Box::new(RobotRelMixer),
            DriveStrategy::FieldRelative => Box::new(FieldRelMixer),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_mixer_groups() {
        let robot_rel = DriveStrategy::RobotRelative.build_mixer();
        let field_rel = DriveStrategy::FieldRelative.build_mixer();

        assert!(robot_rel.groups().contains(&WheelGroup::BackLeft));
        assert!(!robot_rel.groups().contains(&WheelGroup::MidLeft));
        assert!(field_rel.groups().contains(&WheelGroup::MidLeft));
        assert!(!field_rel.groups().contains(&WheelGroup::BackLeft));
    }

    #[test]
    fn test_mix_covers_every_group_once() {
        let axes = ShapedAxes { x: 0.3, y: -0.2, turn: 0.1 };

        for strategy in &[DriveStrategy::RobotRelative, DriveStrategy::FieldRelative] {
            let mixer = strategy.build_mixer();
            let rates = mixer.mix(&axes, Some(30.0));

            let groups: Vec<WheelGroup> = rates.iter().map(|(g, _)| *g).collect();
            assert_eq!(groups.as_slice(), mixer.groups());
        }
    }
}
