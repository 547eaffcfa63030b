//! Robot-relative holonomic mixing

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use eqpt_if::mech::WheelGroup;

// Internal imports
use super::{DriveMixer, GroupRates, ShapedAxes};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const GROUPS: [WheelGroup; 4] = [
    WheelGroup::FrontLeft,
    WheelGroup::FrontRight,
    WheelGroup::BackLeft,
    WheelGroup::BackRight,
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Holonomic mixer for a four corner drivetrain, driven relative to the
/// robot's own facing.
///
/// `y` translates along the robot's forward axis, `x` along its lateral axis,
/// and `turn` adds a rotation whose sign depends on the side of the robot.
#[derive(Clone, Copy, Debug, Default)]
pub struct RobotRelMixer;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveMixer for RobotRelMixer {
    fn groups(&self) -> &'static [WheelGroup] {
        &GROUPS
    }

    fn mix(&self, axes: &ShapedAxes, _heading_deg: Option<f64>) -> GroupRates {
        let ShapedAxes { x, y, turn } = *axes;

        vec![
            (WheelGroup::FrontLeft, y - x + turn),
            (WheelGroup::FrontRight, y - x - turn),
            (WheelGroup::BackLeft, y + x + turn),
            (WheelGroup::BackRight, y + x - turn),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rates(x: f64, y: f64, turn: f64) -> [f64; 4] {
        let r = RobotRelMixer.mix(&ShapedAxes { x, y, turn }, None);
        [r[0].1, r[1].1, r[2].1, r[3].1]
    }

    #[test]
    fn test_zero() {
        assert_eq!(rates(0.0, 0.0, 0.0), [0.0; 4]);
    }

    #[test]
    fn test_pure_forward() {
        assert_eq!(rates(0.0, 1.0, 0.0), [1.0; 4]);
        assert_eq!(rates(0.0, -0.5, 0.0), [-0.5; 4]);
    }

    #[test]
    fn test_pure_rotation() {
        // FL, FR, BL, BR
        assert_eq!(rates(0.0, 0.0, 1.0), [1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_pure_strafe() {
        assert_eq!(rates(1.0, 0.0, 0.0), [-1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_heading_ignored() {
        let axes = ShapedAxes { x: 0.2, y: 0.4, turn: -0.1 };

        assert_eq!(
            RobotRelMixer.mix(&axes, Some(90.0)),
            RobotRelMixer.mix(&axes, None)
        );
    }

    #[test]
    fn test_combined_exceeds_unity() {
        // The mixing law itself is unbounded, saturation is applied by
        // DriveCtrl.
        assert_eq!(rates(0.0, 1.0, 1.0), [2.0, 0.0, 2.0, 0.0]);
    }
}
