//! Field-relative mixing

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use eqpt_if::mech::WheelGroup;
use nalgebra::{Rotation2, Vector2};

// Internal imports
use super::{DriveMixer, GroupRates, ShapedAxes};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const GROUPS: [WheelGroup; 4] = [
    WheelGroup::FrontLeft,
    WheelGroup::FrontRight,
    WheelGroup::MidLeft,
    WheelGroup::MidRight,
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Mixer for a front and middle row drivetrain, driven relative to the field.
///
/// The stick vector is rotated by the negative of the robot's heading so that
/// pushing the stick forward always drives away from the driver, whichever
/// way the robot is facing.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldRelMixer;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FieldRelMixer {
    /// Rotate the stick vector into the field frame.
    ///
    /// With no heading the vector is returned unchanged.
    pub fn to_field_frame(axes: &ShapedAxes, heading_deg: Option<f64>) -> Vector2<f64> {
        let stick = Vector2::new(axes.x, axes.y);

        match heading_deg {
            Some(h) => Rotation2::new(-h.to_radians()) * stick,
            None => stick
        }
    }
}

impl DriveMixer for FieldRelMixer {
    fn groups(&self) -> &'static [WheelGroup] {
        &GROUPS
    }

    fn mix(&self, axes: &ShapedAxes, heading_deg: Option<f64>) -> GroupRates {
        let field = Self::to_field_frame(axes, heading_deg);
        let (field_x, field_y) = (field.x, field.y);
        let turn = axes.turn;

        vec![
            (WheelGroup::FrontLeft, field_y + field_x + turn),
            (WheelGroup::FrontRight, field_y - field_x - turn),
            (WheelGroup::MidLeft, field_y + turn),
            (WheelGroup::MidRight, field_y - turn),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-12;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_zero_heading_is_identity() {
        let axes = ShapedAxes { x: 0.3, y: -0.7, turn: 0.0 };
        let field = FieldRelMixer::to_field_frame(&axes, Some(0.0));

        assert_eq!(field.x, 0.3);
        assert_eq!(field.y, -0.7);
    }

    #[test]
    fn test_no_heading_is_identity() {
        let axes = ShapedAxes { x: 0.3, y: -0.7, turn: 0.2 };

        assert_eq!(
            FieldRelMixer.mix(&axes, None),
            FieldRelMixer.mix(&axes, Some(0.0))
        );
    }

    #[test]
    fn test_quarter_turn() {
        // Pure forward push while the robot faces 90 degrees clockwise of the
        // field's forward direction becomes a pure +x field vector.
        let field = FieldRelMixer::to_field_frame(
            &ShapedAxes { x: 0.0, y: 1.0, turn: 0.0 },
            Some(90.0)
        );
        assert!(approx(field.x, 1.0), "field_x = {}", field.x);
        assert!(approx(field.y, 0.0), "field_y = {}", field.y);

        // And a pure +x push becomes -y.
        let field = FieldRelMixer::to_field_frame(
            &ShapedAxes { x: 1.0, y: 0.0, turn: 0.0 },
            Some(90.0)
        );
        assert!(approx(field.x, 0.0));
        assert!(approx(field.y, -1.0));
    }

    #[test]
    fn test_rotation_matches_matrix() {
        let (x, y) = (0.4, -0.25);

        for heading in &[-270.0, -45.0, 10.0, 135.0, 359.0] {
            let t = -(*heading as f64).to_radians();
            let field = FieldRelMixer::to_field_frame(
                &ShapedAxes { x, y, turn: 0.0 },
                Some(*heading)
            );

            assert!(approx(field.x, x * t.cos() - y * t.sin()));
            assert!(approx(field.y, x * t.sin() + y * t.cos()));
        }
    }

    #[test]
    fn test_mixing_law() {
        let r = FieldRelMixer.mix(&ShapedAxes { x: 0.5, y: 0.25, turn: 0.125 }, Some(0.0));

        assert_eq!(r[0], (WheelGroup::FrontLeft, 0.875));
        assert_eq!(r[1], (WheelGroup::FrontRight, -0.375));
        assert_eq!(r[2], (WheelGroup::MidLeft, 0.375));
        assert_eq!(r[3], (WheelGroup::MidRight, 0.125));
    }

    #[test]
    fn test_pure_forward_and_rotation() {
        let fwd = FieldRelMixer.mix(&ShapedAxes { x: 0.0, y: 1.0, turn: 0.0 }, Some(0.0));
        assert!(fwd.iter().all(|(_, r)| *r == 1.0));

        let rot = FieldRelMixer.mix(&ShapedAxes { x: 0.0, y: 0.0, turn: 1.0 }, Some(0.0));
        let rot: Vec<f64> = rot.iter().map(|(_, r)| *r).collect();
        assert_eq!(rot, vec![1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_nan_heading_is_degenerate() {
        let r = FieldRelMixer.mix(
            &ShapedAxes { x: 0.0, y: 0.5, turn: 0.0 },
            Some(std::f64::NAN)
        );

        assert!(r.iter().all(|(_, rate)| rate.is_nan()));
    }
}
