//! # Control Loop Tick Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drive_lib::{
    ctrl_loop::CtrlLoop,
    eqpt::{ActuationSink, InputSource},
};
use eqpt_if::{
    ctrl::{AxisId, ButtonId},
    mech::MechDems,
};
use std::time::Duration;

/// Input holding the sticks in a fixed position and pressing nothing.
struct FixedInput;

impl InputSource for FixedInput {
    fn poll(&mut self) {}

    fn read_axis(&self, axis: AxisId) -> f64 {
        match axis {
            AxisId::LeftX => 40.0,
            AxisId::LeftY => -90.0,
            AxisId::RightX => 25.0,
            AxisId::RightY => 0.0,
        }
    }

    fn read_heading(&self) -> f64 {
        30.0
    }

    fn consume_new_press(&mut self, _button: ButtonId) -> bool {
        false
    }
}

struct NullSink;

impl ActuationSink for NullSink {
    fn send_demands(&mut self, dems: &MechDems) {
        black_box(dems);
    }
}

fn tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ctrl_loop_tick");

    for strategy in &["robot_relative", "field_relative"] {
        // Shipped drive params with the strategy swapped
        let drive_toml = include_str!("../../params/drive_ctrl.toml")
            .replace("\"robot_relative\"", &format!("\"{}\"", strategy));

        let mut ctrl_loop = CtrlLoop::new(
            Duration::from_millis(20),
            util::params::from_str(&drive_toml).unwrap(),
            util::params::from_str(include_str!("../../params/intake_ctrl.toml")).unwrap(),
        ).unwrap();

        let mut input = FixedInput;
        let mut sink = NullSink;
        ctrl_loop.start(&mut input);

        group.bench_function(*strategy, |b| b.iter(|| ctrl_loop.tick(&mut input, &mut sink)));
    }

    group.finish();
}

criterion_group!(benches, tick_benchmark);
criterion_main!(benches);
