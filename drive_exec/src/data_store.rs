//! # Data Store

use eqpt_if::mech::MechDems;
use log::info;

use crate::{drive_ctrl, intake_ctrl};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the control loop.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    // DriveCtrl
    pub drive_ctrl: drive_ctrl::DriveCtrl,
    pub drive_ctrl_input: drive_ctrl::InputData,
    pub drive_ctrl_output: MechDems,
    pub drive_ctrl_status_rpt: drive_ctrl::StatusReport,

    // IntakeCtrl
    pub intake_ctrl: intake_ctrl::IntakeCtrl,
    pub intake_ctrl_input: intake_ctrl::InputData,
    pub intake_ctrl_output: Option<MechDems>,
    pub intake_ctrl_status_rpt: intake_ctrl::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Total number of cycle overruns
    pub num_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Stops all motion.
    ///
    /// The outputs are set to zero demands for every wheel group and every
    /// intake motor, and the intake is forced off.
    pub fn make_safe(&mut self) {
        info!("Make safe requested");

        self.drive_ctrl_output = self.drive_ctrl.make_safe();
        self.intake_ctrl_output = self.intake_ctrl.make_safe();
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears the previous cycle's inputs, outputs and reports.
    pub fn cycle_start(&mut self) {
        self.drive_ctrl_input = drive_ctrl::InputData::default();
        self.drive_ctrl_output = MechDems::default();
        self.drive_ctrl_status_rpt = drive_ctrl::StatusReport::default();

        self.intake_ctrl_input = intake_ctrl::InputData::default();
        self.intake_ctrl_output = None;
        self.intake_ctrl_status_rpt = intake_ctrl::StatusReport::default();
    }
}
