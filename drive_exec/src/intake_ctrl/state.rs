//! Implementations for the IntakeCtrl state machine

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{
    ctrl::ButtonId,
    mech::{ActId, MechDems},
};
use log::{info, trace};
use serde::Serialize;
use util::module::State;

use super::{IntakeCtrlError, IntakeMode, Params};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Intake control state machine.
///
/// The current mode is only changed by trigger presses passed into `proc`, or
/// forced off by `make_safe`.
#[derive(Default)]
pub struct IntakeCtrl {
    params: Option<Params>,

    mode: IntakeMode,

    pub(crate) report: StatusReport,
}

/// Input data to intake control.
#[derive(Clone, Default, Debug)]
pub struct InputData {
    /// Buttons newly pressed since the previous cycle.
    pub new_presses: Vec<ButtonId>,
}

/// Status report for intake control processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Mode at the start of the cycle.
    pub prev_mode: IntakeMode,

    /// Mode at the end of the cycle.
    pub mode: IntakeMode,

    /// Number of bound triggers pressed this cycle.
    pub num_triggers: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl State for IntakeCtrl {
    type InitData = Params;
    type InitError = IntakeCtrlError;

    type InputData = InputData;
    type OutputData = Option<MechDems>;
    type StatusReport = StatusReport;
    type ProcError = IntakeCtrlError;

    /// Initialise the intake in the `Off` mode.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        init_data.validate()?;

        self.params = Some(init_data);
        self.mode = IntakeMode::Off;
        self.report = StatusReport::default();

        Ok(())
    }

    /// Apply this cycle's trigger presses.
    ///
    /// Triggers are applied one after another in binding order, each from the
    /// mode left by the one before. If the mode at the end of the cycle
    /// differs from the mode at the start, the full profile of the new mode
    /// is output for every intake motor.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let prev_mode = self.mode;
        let mut mode = prev_mode;
        let mut num_triggers = 0;

        {
            let params = self.params.as_ref().ok_or(IntakeCtrlError::NotInitialised)?;

            for binding in params.bindings.iter() {
                if input_data.new_presses.contains(&binding.button) {
                    trace!("Intake trigger {:?} pressed", binding.button);
                    mode = mode.on_trigger(binding.mode);
                    num_triggers += 1;
                }
            }
        }

        self.report = StatusReport {
            prev_mode,
            mode,
            num_triggers,
        };

        if mode == prev_mode {
            return Ok((None, self.report));
        }

        info!("Intake mode {:?} -> {:?}", prev_mode, mode);
        self.mode = mode;

        Ok((Some(self.profile(mode)), self.report))
    }

    /// Force the intake off, returning the demands which stop every motor.
    fn make_safe(&mut self) -> Self::OutputData {
        if self.mode != IntakeMode::Off {
            info!("Intake made safe from {:?}", self.mode);
        }
        self.mode = IntakeMode::Off;

        Some(self.profile(IntakeMode::Off))
    }
}

impl IntakeCtrl {
    /// The currently active mode.
    pub fn mode(&self) -> IntakeMode {
        self.mode
    }

    /// The bound trigger buttons, in the order they are applied.
    pub fn bound_buttons(&self) -> Vec<ButtonId> {
        match self.params {
            Some(ref p) => p.bindings.iter().map(|b| b.button).collect(),
            None => vec![],
        }
    }

    /// Number of intake motors, zero if not initialised.
    pub fn num_motors(&self) -> usize {
        match self.params {
            Some(ref p) => p.profiles.num_motors(),
            None => 0,
        }
    }

    /// Demands setting every intake motor to the given mode's profile.
    pub fn profile(&self, mode: IntakeMode) -> MechDems {
        let profile = self.params
            .as_ref()
            .and_then(|p| p.profiles.get(mode));

        let mut dems = MechDems::zeroed((0..self.num_motors()).map(ActId::Intake));

        if let Some(speeds) = profile {
            for (i, speed) in speeds.iter().enumerate() {
                dems.set(ActId::Intake(i), *speed);
            }
        }

        dems
    }
}
