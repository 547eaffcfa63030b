//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use eqpt_if::mech::{ActId, MechDems, WheelGroup};
use log::{debug, trace, warn};
use serde::Serialize;

// Internal
use super::{
    AxisMap, AxisReading, DriveCtrlError, DriveMixer, DriveStrategy, GroupRates, Params,
    Saturation, ShapedAxes,
};
use util::{
    maths::{clamp, wrap_deg_180},
    module::State,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state
#[derive(Default)]
pub struct DriveCtrl {

    pub(crate) params: Option<Params>,

    mixer: Option<Box<dyn DriveMixer + Send>>,

    /// Heading the robot is held at while the driver isn't turning.
    ///
    /// Units: degrees
    heading_ref_deg: Option<f64>,

    pub(crate) report: StatusReport,

    pub(crate) output: Option<MechDems>,
}

/// Input data to Drive Control, sampled once per cycle.
#[derive(Clone, Copy, Default, Debug)]
pub struct InputData {
    /// Raw stick readings, already mapped onto the drive axes.
    pub axes: AxisReading,

    /// Current heading of the robot.
    ///
    /// Units: degrees
    pub heading_deg: f64,
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// The axes after shaping and heading hold.
    pub shaped: ShapedAxes,

    /// True if heading hold replaced the turn input this cycle.
    pub heading_hold_active: bool,

    /// Wheel groups whose rate was limited by saturation this cycle.
    pub saturated: Vec<WheelGroup>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DriveCtrl {
    type InitData = Params;
    type InitError = DriveCtrlError;

    type InputData = InputData;
    type OutputData = MechDems;
    type StatusReport = StatusReport;
    type ProcError = DriveCtrlError;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the loaded DriveCtrl parameters.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {

        init_data.validate()?;

        debug!(
            "DriveCtrl using {:?} mixing with {:?} saturation",
            init_data.strategy, init_data.saturation
        );

        self.mixer = Some(init_data.strategy.build_mixer());
        self.params = Some(init_data);
        self.heading_ref_deg = None;
        self.report = StatusReport::default();
        self.output = None;

        Ok(())
    }

    /// Perform cyclic processing of Drive Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        let (full_scale, strategy, saturation, hold_gain, gear_mult_rpm) = match self.params {
            Some(ref p) => (
                p.axis_full_scale,
                p.strategy,
                p.saturation,
                p.heading_hold_gain,
                p.gear_mult_rpm,
            ),
            None => return Err(DriveCtrlError::NotInitialised),
        };

        let mut shaped = ShapedAxes::from_reading(&input_data.axes, full_scale);

        if strategy == DriveStrategy::FieldRelative && hold_gain > 0.0 {
            shaped.turn = self.calc_heading_hold(shaped.turn, input_data.heading_deg, hold_gain);
        }

        let mut rates = match self.mixer {
            Some(ref m) => m.mix(&shaped, Some(input_data.heading_deg)),
            None => return Err(DriveCtrlError::NotInitialised),
        };

        // Limit the rates to the motor capabilities
        self.enforce_limits(&mut rates, saturation);

        let mut output = MechDems::default();
        for (group, rate) in rates {
            output.set(ActId::Drv(group), rate * gear_mult_rpm);
        }

        self.report.shaped = shaped;

        trace!("DriveCtrl output: {:?}", output.speed_rpm);

        self.output = Some(output.clone());

        Ok((output, self.report.clone()))
    }

    /// Stop every wheel group.
    fn make_safe(&mut self) -> Self::OutputData {
        let output = self.zero_dems();

        self.report = StatusReport::default();
        self.output = Some(output.clone());

        output
    }
}

impl DriveCtrl {

    /// Capture the heading the robot shall be held at.
    ///
    /// Called once when the control loop starts. After that the reference
    /// follows the robot's heading on every cycle in which the driver
    /// commands a turn, see `calc_heading_hold`. A non-finite heading leaves
    /// the reference unchanged.
    pub fn capture_heading_ref(&mut self, heading_deg: f64) {
        if !heading_deg.is_finite() {
            warn!("Heading reference not captured, heading is {}", heading_deg);
            return;
        }

        debug!("Heading reference captured at {:.2} deg", heading_deg);
        self.heading_ref_deg = Some(heading_deg);
    }

    /// The current heading hold reference, if one has been captured.
    pub fn heading_ref_deg(&self) -> Option<f64> {
        self.heading_ref_deg
    }

    /// The axis map in use, or `None` if the module isn't initialised.
    pub fn axis_map(&self) -> Option<AxisMap> {
        self.params.as_ref().map(|p| p.axis_map)
    }

    /// The wheel groups driven by the configured mixer.
    pub fn groups(&self) -> &'static [WheelGroup] {
        match self.mixer {
            Some(ref m) => m.groups(),
            None => &[],
        }
    }

    /// A batch of zero demands covering every configured wheel group.
    pub fn zero_dems(&self) -> MechDems {
        MechDems::zeroed(self.groups().iter().map(|g| ActId::Drv(*g)))
    }

    /// Calculate the turn input with heading hold applied.
    ///
    /// While the driver commands a turn the reference follows the robot's
    /// heading. When the turn input is released the robot is steered back
    /// to the reference. Non-finite headings never become the reference.
    fn calc_heading_hold(&mut self, turn: f64, heading_deg: f64, gain: f64) -> f64 {
        match self.heading_ref_deg {
            Some(ref_deg) if turn == 0.0 => {
                self.report.heading_hold_active = true;

                let error_deg = wrap_deg_180(ref_deg - heading_deg);
                clamp(&(gain * error_deg / 180.0), &-1.0, &1.0)
            },
            _ => {
                if turn != 0.0 && heading_deg.is_finite() {
                    self.heading_ref_deg = Some(heading_deg);
                }
                turn
            }
        }
    }

    /// Enforce the limits of the drive motors.
    ///
    /// If a group's rate is limited it is added to the status report.
    fn enforce_limits(&mut self, rates: &mut GroupRates, saturation: Saturation) {
        match saturation {
            Saturation::Off => (),
            Saturation::Clip => {
                for (group, rate) in rates.iter_mut() {
                    if rate.abs() > 1.0 {
                        *rate = clamp(rate, &-1.0, &1.0);
                        self.report.saturated.push(*group);
                    }
                }
            },
            Saturation::Desaturate => {
                // NaN rates are skipped by max
                let max_abs = rates
                    .iter()
                    .map(|(_, r)| r.abs())
                    .fold(0.0, f64::max);

                if max_abs > 1.0 {
                    for (group, rate) in rates.iter_mut() {
                        if rate.abs() > 1.0 {
                            self.report.saturated.push(*group);
                        }
                        *rate /= max_abs;
                    }
                }
            }
        }
    }
}
