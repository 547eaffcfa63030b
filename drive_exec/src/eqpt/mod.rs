//! # Equipment module
//!
//! The control loop talks to the controller, the orientation sensor and the
//! motors only through the traits in this module. On the robot these are
//! backed by the device drivers, on a host by the implementations provided
//! here:
//!
//! - [`ScriptInput`] - replays an input script against wall-clock time.
//! - [`LogSink`] - fans demands out to motor ports and logs them.
//! - [`ThreadPacer`] - sleeps the current thread.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod button_latch;
mod log_sink;
mod script_input;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use button_latch::ButtonLatch;
pub use log_sink::*;
pub use script_input::ScriptInput;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::{
    ctrl::{AxisId, ButtonId},
    mech::MechDems,
};
use std::time::Duration;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of controller and orientation sensor readings.
pub trait InputSource {
    /// Sample the device. All reads until the next poll return values from
    /// this sample, and any edges not consumed since the last poll are
    /// discarded.
    fn poll(&mut self);

    /// Read an analog axis, between `-AXIS_FULL_SCALE` and `AXIS_FULL_SCALE`.
    fn read_axis(&self, axis: AxisId) -> f64;

    /// Read the robot's heading.
    ///
    /// Units: degrees
    fn read_heading(&self) -> f64;

    /// Returns true once for each released-to-pressed transition of the
    /// button, however long it is then held.
    fn consume_new_press(&mut self, button: ButtonId) -> bool;

    /// Returns true once the source has no more input to give. Live devices
    /// never finish.
    fn is_finished(&self) -> bool {
        false
    }
}

/// A consumer of motor demands.
pub trait ActuationSink {
    /// Apply a batch of demands. The whole batch is applied as one unit.
    fn send_demands(&mut self, dems: &MechDems);
}

/// Delays the control loop between ticks.
pub trait TickPacer {
    fn sleep_for(&mut self, dur: Duration);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Paces the loop by sleeping the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TickPacer for ThreadPacer {
    fn sleep_for(&mut self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_thread_pacer_sleeps() {
        let start = Instant::now();
        ThreadPacer.sleep_for(Duration::from_millis(5));

        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
