//! Scripted input source

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::ctrl::{AxisId, ButtonId, InputFrame};
use log::debug;
use std::time::Instant;
use util::script_interpreter::ScriptInterpreter;

use super::{ButtonLatch, InputSource};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Input source replaying an input script.
///
/// Script time starts at the first poll.
pub struct ScriptInput {
    interpreter: ScriptInterpreter,

    latch: ButtonLatch,

    start: Option<Instant>,

    /// Script time of the last poll.
    ///
    /// Units: seconds
    time_s: f64,

    frame: InputFrame,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ScriptInput {
    pub fn new(interpreter: ScriptInterpreter) -> Self {
        Self {
            interpreter,
            latch: ButtonLatch::default(),
            start: None,
            time_s: 0.0,
            frame: InputFrame::default(),
        }
    }

    /// Sample the script at the given time rather than the wall-clock time.
    pub fn poll_at(&mut self, time_s: f64) {
        let frame = self.interpreter
            .frame_at(time_s)
            .cloned()
            .unwrap_or_default();

        if frame != self.frame {
            debug!("Script frame at {:.3} s: {:?}", time_s, frame);
        }

        self.latch.update(&frame.held);
        self.frame = frame;
        self.time_s = time_s;
    }

    /// Script time of the last poll.
    pub fn time_s(&self) -> f64 {
        self.time_s
    }
}

impl InputSource for ScriptInput {
    fn poll(&mut self) {
        let start = *self.start.get_or_insert_with(Instant::now);
        self.poll_at(start.elapsed().as_secs_f64());
    }

    fn read_axis(&self, axis: AxisId) -> f64 {
        self.frame.axis(axis)
    }

    fn read_heading(&self) -> f64 {
        self.frame.heading_deg
    }

    fn consume_new_press(&mut self, button: ButtonId) -> bool {
        self.latch.consume(button)
    }

    fn is_finished(&self) -> bool {
        self.time_s >= self.interpreter.get_duration()
    }
}
