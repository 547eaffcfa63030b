//! Module interfaces
//!
//! Each control module run by the driver control loop implements [`State`].
//! The loop owns the module, initialises it once from its parameters, then
//! calls `proc` every tick with that tick's snapshot of the inputs.

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// A control module's internal state.
pub trait State {
    /// Data needed to initialise the module, usually its parameters.
    type InitData;
    type InitError;

    /// The snapshot of inputs processed each tick.
    type InputData;
    /// The actuator demands produced by a tick.
    type OutputData;
    /// Diagnostics on how the tick's output was reached.
    type StatusReport;
    type ProcError;

    /// Initialise the module, validating `init_data`.
    ///
    /// Any previous state is discarded. Calling `proc` before a successful
    /// `init` is an error.
    fn init(&mut self, init_data: Self::InitData)
        -> Result<(), Self::InitError>;

    /// Process one tick.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;

    /// Put the module into its safe state, returning the output which stops
    /// every actuator it drives.
    fn make_safe(&mut self) -> Self::OutputData;
}
