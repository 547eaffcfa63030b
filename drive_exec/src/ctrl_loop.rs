//! # Control loop
//!
//! Each tick of the loop:
//!
//!  1. Clears the previous tick's data
//!  2. Polls the input source, sampling the drive axes, the heading and the
//!     new presses of every intake trigger into one snapshot
//!  3. Runs drive control and sends the wheel demands
//!  4. Runs intake control and, if the intake mode changed, sends the intake
//!     demands
//!
//! Between ticks the loop is paced to a fixed period.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use eqpt_if::mech::WheelGroup;
use log::{debug, info, trace, warn};
use std::time::{Duration, Instant};

// Internal
use crate::{
    data_store::DataStore,
    drive_ctrl::{self, AxisReading, DriveCtrlError},
    eqpt::{ActuationSink, InputSource, TickPacer},
    intake_ctrl::{self, IntakeCtrlError},
};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The driver control loop.
pub struct CtrlLoop {
    pub ds: DataStore,

    tick_period: Duration,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CtrlLoopError {
    #[error("The tick period must be greater than zero")]
    ZeroTickPeriod,

    #[error("Failed to initialise DriveCtrl: {0}")]
    DriveCtrlInit(#[from] DriveCtrlError),

    #[error("Failed to initialise IntakeCtrl: {0}")]
    IntakeCtrlInit(#[from] IntakeCtrlError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CtrlLoop {
    /// Create the loop, initialising drive and intake control.
    pub fn new(
        tick_period: Duration,
        drive_params: drive_ctrl::Params,
        intake_params: intake_ctrl::Params,
    ) -> Result<Self, CtrlLoopError> {
        if tick_period == Duration::from_secs(0) {
            return Err(CtrlLoopError::ZeroTickPeriod);
        }

        let mut ds = DataStore::default();

        ds.drive_ctrl.init(drive_params)?;
        info!("DriveCtrl init complete");

        ds.intake_ctrl.init(intake_params)?;
        info!("IntakeCtrl init complete");

        Ok(Self { ds, tick_period })
    }

    /// Target period of one tick.
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// The wheel groups demanded by drive control.
    pub fn drive_groups(&self) -> &'static [WheelGroup] {
        self.ds.drive_ctrl.groups()
    }

    /// The number of intake motors demanded by intake control.
    pub fn num_intake_motors(&self) -> usize {
        self.ds.intake_ctrl.num_motors()
    }

    /// Prepare for the first tick, capturing the heading reference.
    pub fn start<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        input.poll();
        self.ds.drive_ctrl.capture_heading_ref(input.read_heading());
    }

    /// Execute one tick of the loop.
    pub fn tick<I, S>(&mut self, input: &mut I, sink: &mut S)
    where
        I: InputSource + ?Sized,
        S: ActuationSink + ?Sized,
    {
        // Clear items that need wiping at the start of the cycle
        self.ds.cycle_start();

        // ---- DATA INPUT ----

        input.poll();

        if let Some(map) = self.ds.drive_ctrl.axis_map() {
            self.ds.drive_ctrl_input = drive_ctrl::InputData {
                axes: AxisReading {
                    x: map.strafe.apply(input.read_axis(map.strafe.axis)),
                    y: map.forward.apply(input.read_axis(map.forward.axis)),
                    turn: map.turn.apply(input.read_axis(map.turn.axis)),
                },
                heading_deg: input.read_heading(),
            };
        }

        for button in self.ds.intake_ctrl.bound_buttons() {
            if input.consume_new_press(button) {
                self.ds.intake_ctrl_input.new_presses.push(button);
            }
        }

        // ---- DRIVE CONTROL ----

        match self.ds.drive_ctrl.proc(&self.ds.drive_ctrl_input) {
            Ok((o, r)) => {
                self.ds.drive_ctrl_output = o;
                self.ds.drive_ctrl_status_rpt = r;
            }
            Err(e) => {
                warn!("Error during DriveCtrl processing: {}", e);
                self.ds.drive_ctrl_output = self.ds.drive_ctrl.zero_dems();
            }
        };

        if !self.ds.drive_ctrl_status_rpt.saturated.is_empty() {
            trace!("Saturated wheel groups: {:?}", self.ds.drive_ctrl_status_rpt.saturated);
        }

        sink.send_demands(&self.ds.drive_ctrl_output);

        // ---- INTAKE CONTROL ----

        match self.ds.intake_ctrl.proc(&self.ds.intake_ctrl_input) {
            Ok((o, r)) => {
                self.ds.intake_ctrl_output = o;
                self.ds.intake_ctrl_status_rpt = r;
            }
            Err(e) => warn!("Error during IntakeCtrl processing: {}", e),
        };

        if let Some(ref dems) = self.ds.intake_ctrl_output {
            sink.send_demands(dems);
        }

        self.ds.num_cycles += 1;
    }

    /// Run the loop until the input source is finished, then stop.
    pub fn run<I, S, P>(&mut self, input: &mut I, sink: &mut S, pacer: &mut P)
    where
        I: InputSource + ?Sized,
        S: ActuationSink + ?Sized,
        P: TickPacer + ?Sized,
    {
        self.start(input);

        info!("Beginning main loop");

        while !input.is_finished() {
            // Get cycle start time
            let tick_start_instant = Instant::now();

            self.tick(input, sink);

            let tick_dur = tick_start_instant.elapsed();

            match self.tick_period.checked_sub(tick_dur) {
                Some(d) => {
                    self.ds.num_consec_cycle_overruns = 0;
                    pacer.sleep_for(d);
                }
                None => {
                    warn!(
                        "Cycle overran by {:.06} s",
                        tick_dur.as_secs_f64() - self.tick_period.as_secs_f64()
                    );
                    self.ds.num_consec_cycle_overruns += 1;
                    self.ds.num_cycle_overruns += 1;
                }
            }
        }

        info!("Input finished after {} cycles", self.ds.num_cycles);
        if self.ds.num_cycle_overruns > 0 {
            debug!("{} cycles overran", self.ds.num_cycle_overruns);
        }

        self.stop(sink);
    }

    /// Stop all motors.
    pub fn stop<S: ActuationSink + ?Sized>(&mut self, sink: &mut S) {
        self.ds.make_safe();

        sink.send_demands(&self.ds.drive_ctrl_output);
        if let Some(ref dems) = self.ds.intake_ctrl_output {
            sink.send_demands(dems);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{eqpt::ButtonLatch, intake_ctrl::IntakeMode};
    use eqpt_if::{
        ctrl::{AxisId, ButtonId, InputFrame},
        mech::{ActId, MechDems},
    };
    use std::thread;

    const DRIVE_PARAMS: &str = include_str!("../../params/drive_ctrl.toml");
    const INTAKE_PARAMS: &str = include_str!("../../params/intake_ctrl.toml");

    /// Input source stepping through a list of frames, one per poll.
    struct MockInput {
        frames: Vec<InputFrame>,
        num_polls: usize,
        frame: InputFrame,
        latch: ButtonLatch,
        poll_delay: Duration,
    }

    impl MockInput {
        fn new(frames: Vec<InputFrame>) -> Self {
            Self {
                frames,
                num_polls: 0,
                frame: InputFrame::default(),
                latch: ButtonLatch::default(),
                poll_delay: Duration::from_secs(0),
            }
        }
    }

    impl InputSource for MockInput {
        fn poll(&mut self) {
            thread::sleep(self.poll_delay);

            let idx = self.num_polls.min(self.frames.len() - 1);
            self.frame = self.frames[idx].clone();
            self.latch.update(&self.frame.held);
            self.num_polls += 1;
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
            self.num_polls >= self.frames.len()
        }
    }

    #[derive(Default)]
    struct MockSink {
        batches: Vec<MechDems>,
    }

    impl ActuationSink for MockSink {
        fn send_demands(&mut self, dems: &MechDems) {
            self.batches.push(dems.clone());
        }
    }

    #[derive(Default)]
    struct MockPacer {
        sleeps: Vec<Duration>,
    }

    impl TickPacer for MockPacer {
        fn sleep_for(&mut self, dur: Duration) {
            self.sleeps.push(dur);
        }
    }

    fn ctrl_loop(period: Duration) -> CtrlLoop {
        CtrlLoop::new(
            period,
            util::params::from_str(DRIVE_PARAMS).unwrap(),
            util::params::from_str(INTAKE_PARAMS).unwrap(),
        ).unwrap()
    }

    fn frame(left_y: f64, held: &[ButtonId]) -> InputFrame {
        InputFrame {
            left_y,
            held: held.to_vec(),
            ..Default::default()
        }
    }

    fn is_intake(dems: &MechDems) -> bool {
        dems.speed_rpm.keys().all(|id| matches!(id, ActId::Intake(_)))
    }

    #[test]
    fn test_shipped_params_initialise() {
        let cl = ctrl_loop(Duration::from_millis(20));

        assert_eq!(cl.drive_groups().len(), 4);
        assert_eq!(cl.num_intake_motors(), 5);
    }

    #[test]
    fn test_zero_tick_period_rejected() {
        assert!(matches!(
            CtrlLoop::new(
                Duration::from_secs(0),
                util::params::from_str(DRIVE_PARAMS).unwrap(),
                util::params::from_str(INTAKE_PARAMS).unwrap(),
            ),
            Err(CtrlLoopError::ZeroTickPeriod)
        ));
    }

    #[test]
    fn test_tick_half_stick_forward() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![frame(-63.5, &[])]);
        let mut sink = MockSink::default();

        cl.tick(&mut input, &mut sink);

        // One wheel batch, no intake batch
        assert_eq!(sink.batches.len(), 1);
        assert_eq!(sink.batches[0].len(), 4);
        assert!(sink.batches[0].speed_rpm.values().all(|v| *v == 75.0));
        assert_eq!(cl.ds.drive_ctrl_status_rpt.shaped.y, 0.125);
        assert_eq!(cl.ds.num_cycles, 1);
    }

    #[test]
    fn test_tick_intake_toggle() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![
            frame(0.0, &[ButtonId::L2]),
            frame(0.0, &[ButtonId::L2]),
            frame(0.0, &[]),
            frame(0.0, &[ButtonId::L2]),
        ]);
        let mut sink = MockSink::default();

        // Press enters intake mode
        cl.tick(&mut input, &mut sink);
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Intake);
        assert_eq!(sink.batches.len(), 2);
        assert!(is_intake(&sink.batches[1]));
        assert_eq!(sink.batches[1].get(ActId::Intake(4)), Some(-600.0));

        // Held and released, no change
        cl.tick(&mut input, &mut sink);
        cl.tick(&mut input, &mut sink);
        assert_eq!(sink.batches.len(), 4);
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Intake);

        // Pressed again turns off
        cl.tick(&mut input, &mut sink);
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Off);
        assert_eq!(sink.batches.len(), 6);
        assert!(sink.batches[5].speed_rpm.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_repeated_ticks_identical() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![InputFrame {
            left_x: 30.0,
            left_y: -90.0,
            right_x: -12.0,
            heading_deg: 15.0,
            ..Default::default()
        }]);
        let mut sink = MockSink::default();

        for _ in 0..5 {
            cl.tick(&mut input, &mut sink);
        }

        assert_eq!(sink.batches.len(), 5);
        assert!(sink.batches.iter().all(|b| *b == sink.batches[0]));
    }

    #[test]
    fn test_run_until_finished() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![
            frame(0.0, &[]),
            frame(-127.0, &[ButtonId::R1]),
            frame(-127.0, &[ButtonId::R1]),
            frame(0.0, &[]),
        ]);
        let mut sink = MockSink::default();
        let mut pacer = MockPacer::default();

        cl.run(&mut input, &mut sink, &mut pacer);

        // Start polls the first frame, then one tick per remaining frame
        assert_eq!(cl.ds.num_cycles, 3);
        assert_eq!(pacer.sleeps.len(), 3);
        assert!(pacer.sleeps.iter().all(|d| *d <= Duration::from_millis(20)));
        assert_eq!(cl.ds.num_consec_cycle_overruns, 0);

        // 3 wheel batches, 1 intake batch, then the stop batches
        assert_eq!(sink.batches.len(), 6);
        assert!(sink.batches[4].speed_rpm.values().all(|v| *v == 0.0));
        assert!(is_intake(&sink.batches[5]));
        assert!(sink.batches[5].speed_rpm.values().all(|v| *v == 0.0));
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Off);
    }

    #[test]
    fn test_run_counts_overruns() {
        let mut cl = ctrl_loop(Duration::from_millis(1));
        let mut input = MockInput::new(vec![frame(0.0, &[]); 4]);
        input.poll_delay = Duration::from_millis(3);
        let mut sink = MockSink::default();
        let mut pacer = MockPacer::default();

        cl.run(&mut input, &mut sink, &mut pacer);

        assert!(pacer.sleeps.is_empty());
        assert_eq!(cl.ds.num_cycle_overruns, 3);
        assert_eq!(cl.ds.num_consec_cycle_overruns, 3);
    }

    #[test]
    fn test_heading_reference_captured_at_start() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![InputFrame {
            heading_deg: 42.0,
            ..Default::default()
        }]);

        cl.start(&mut input);

        assert_eq!(cl.ds.drive_ctrl.heading_ref_deg(), Some(42.0));
    }

    #[test]
    fn test_button_held_at_start_does_not_trigger() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![frame(0.0, &[ButtonId::L2]); 3]);
        let mut sink = MockSink::default();

        cl.start(&mut input);
        cl.tick(&mut input, &mut sink);
        cl.tick(&mut input, &mut sink);

        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Off);
        assert_eq!(sink.batches.len(), 2);
        assert!(!sink.batches.iter().any(is_intake));

        // Released and pressed again does trigger
        let mut input = MockInput::new(vec![frame(0.0, &[]), frame(0.0, &[ButtonId::L2])]);
        cl.tick(&mut input, &mut sink);
        cl.tick(&mut input, &mut sink);
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Intake);
    }

    #[test]
    fn test_run_ignores_button_held_at_start() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![frame(0.0, &[ButtonId::R1]); 4]);
        let mut sink = MockSink::default();
        let mut pacer = MockPacer::default();

        cl.run(&mut input, &mut sink, &mut pacer);

        assert_eq!(cl.ds.num_cycles, 3);
        assert_eq!(cl.ds.intake_ctrl_status_rpt.num_triggers, 0);
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Off);

        // 3 wheel batches, then the stop batches
        assert_eq!(sink.batches.len(), 5);
        assert!(!sink.batches[..3].iter().any(is_intake));
    }

    #[test]
    fn test_stop_sends_zeros() {
        let mut cl = ctrl_loop(Duration::from_millis(20));
        let mut input = MockInput::new(vec![frame(-127.0, &[ButtonId::R2])]);
        let mut sink = MockSink::default();

        cl.tick(&mut input, &mut sink);
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::ScoreMid);

        sink.batches.clear();
        cl.stop(&mut sink);

        assert_eq!(sink.batches.len(), 2);
        assert_eq!(sink.batches[0], cl.ds.drive_ctrl.zero_dems());
        assert_eq!(sink.batches[1].len(), 5);
        assert!(sink.batches[1].speed_rpm.values().all(|v| *v == 0.0));
        assert_eq!(cl.ds.intake_ctrl.mode(), IntakeMode::Off);
    }
}
