//! # Gait Benchmark
//!
//! Measures the cost of the work done between control ticks. Runs against the simulated clock so
//! the sleeps take no time.

use criterion::{criterion_group, criterion_main, Criterion};

use biped_lib::{
    gait_lib::{Direction, GaitCmd, Side},
    motion_ctrl::{MotionCtrl, Params},
    oscillator::{Oscillator, OscillatorParams},
    sim::{SimClock, SimDriver},
};

fn oscillator_benchmark(c: &mut Criterion) {
    let mut osc = Oscillator::default();
    osc.configure(OscillatorParams::new(30.0, 4.0, -std::f64::consts::FRAC_PI_2), 1000.0);
    osc.start(0);

    c.bench_function("Oscillator::sample", |b| {
        let mut t = 0;
        b.iter(|| {
            t += 10;
            osc.sample(t)
        })
    });
}

fn gait_benchmark(c: &mut Criterion) {
    let presets = [
        GaitCmd::Walk { steps: 4.0, period_ms: 1000, dir: Direction::Forward },
        GaitCmd::Moonwalker { steps: 2.0, period_ms: 900, height_deg: 25.0, side: Side::Left },
        GaitCmd::ShakeLeg { steps: 1, period_ms: 2000, side: Side::Right },
    ];

    c.bench_function("GaitCmd::plan", |b| {
        b.iter(|| {
            for cmd in presets.iter() {
                cmd.plan().unwrap();
            }
        })
    });

    // Full run of a gait, dominated by sampling and commanding the bank
    c.bench_function("MotionCtrl::perform::walk", |b| {
        b.iter(|| {
            let clock = SimClock::new();
            let mut ctrl =
                MotionCtrl::new(Params::default(), SimDriver::new(clock.clone()), clock).unwrap();
            ctrl.perform(&presets[0]).unwrap();
        })
    });
}

criterion_group!(benches, oscillator_benchmark, gait_benchmark);
criterion_main!(benches);
