//! Integration tests for AGC convergence behavior
//!
//! A constant-magnitude input of energy `E` must drive the gain toward
//! `sqrt(T / E)` for a unit target, for every strategy.

mod helpers;

use approx::assert_relative_eq;
use rs_agc::{Agc, GainStrategy};

fn settle(strategy: GainStrategy, bandwidth: f64, amplitude: f64, target: f64) -> Agc<f64> {
    let mut agc = Agc::<f64>::new();
    agc.set_strategy(strategy);
    agc.set_bandwidth(bandwidth).expect("valid bandwidth");
    agc.set_target(target).expect("valid target");

    for x in helpers::tone(amplitude, 0.013, 5000) {
        agc.execute(x);
    }
    agc
}

#[test]
fn test_default_strategy_converges() {
    for bandwidth in [0.01, 0.1, 0.5, 1.0] {
        for amplitude in [0.05, 0.8, 3.0] {
            let agc = settle(GainStrategy::Default, bandwidth, amplitude, 1.0);
            let energy = amplitude * amplitude;
            assert_relative_eq!(agc.get_gain(), (1.0 / energy).sqrt(), max_relative = 1e-3);
        }
    }
}

#[test]
fn test_logarithmic_strategy_converges() {
    for bandwidth in [0.01, 0.1, 0.5, 1.0] {
        for amplitude in [0.05, 0.8, 3.0] {
            let agc = settle(GainStrategy::Logarithmic, bandwidth, amplitude, 1.0);
            let energy = amplitude * amplitude;
            assert_relative_eq!(agc.get_gain(), (1.0 / energy).sqrt(), max_relative = 1e-3);
        }
    }
}

#[test]
fn test_exponential_strategy_converges() {
    // beta = 1 - sqrt(BT) vanishes at BT = 1, which freezes this law
    for bandwidth in [0.01, 0.1, 0.5] {
        for amplitude in [0.05, 0.8, 3.0] {
            let agc = settle(GainStrategy::Exponential, bandwidth, amplitude, 1.0);
            let energy = amplitude * amplitude;
            assert_relative_eq!(agc.get_gain(), (1.0 / energy).sqrt(), max_relative = 1e-3);
        }
    }
}

#[test]
fn test_exponential_full_bandwidth_is_frozen() {
    let agc = settle(GainStrategy::Exponential, 1.0, 0.05, 1.0);
    assert_eq!(agc.get_gain(), 1.0);
}

#[test]
fn test_output_magnitude_tracks_target() {
    for strategy in GainStrategy::ALL {
        let mut agc = settle(strategy, 0.05, 0.02, 4.0);
        assert_relative_eq!(agc.get_gain(), 4.0 / 0.02, max_relative = 1e-3);

        let y = agc.execute(helpers::tone(0.02, 0.0, 1)[0]);
        assert_relative_eq!(y.norm(), 4.0, max_relative = 1e-3);
    }
}

#[test]
fn test_signal_level_after_convergence() {
    for strategy in GainStrategy::ALL {
        let agc = settle(strategy, 0.1, 0.25, 1.0);
        assert_relative_eq!(agc.get_signal_level(), 0.25, max_relative = 1e-3);
        assert_relative_eq!(
            agc.get_signal_level_db(),
            10.0 * 0.25f64.log10(),
            epsilon = 1e-2
        );
    }
}

#[test]
fn test_single_precision_converges() {
    for strategy in GainStrategy::ALL {
        let mut agc = Agc::<f32>::new();
        agc.set_strategy(strategy);
        agc.set_bandwidth(0.05).expect("valid bandwidth");

        let output = agc.execute_block(&helpers::tone_f32(0.1, 0.02, 4000));
        assert_relative_eq!(agc.get_gain(), 10.0, max_relative = 1e-3);

        let settled = &output[3000..];
        assert!(settled.iter().all(|y| (y.norm() - 1.0).abs() < 1e-2));
    }
}

#[test]
fn test_reacquires_after_level_step() {
    for strategy in GainStrategy::ALL {
        let mut agc = Agc::<f64>::new();
        agc.set_strategy(strategy);
        agc.set_bandwidth(0.05).expect("valid bandwidth");

        agc.execute_block(&helpers::tone(0.1, 0.01, 3000));
        assert_relative_eq!(agc.get_gain(), 10.0, max_relative = 1e-3);

        // 40 dB jump
        agc.execute_block(&helpers::tone(10.0, 0.01, 3000));
        assert_relative_eq!(agc.get_gain(), 0.1, max_relative = 1e-3);
    }
}

#[test]
fn test_noisy_input_stays_near_target() {
    for strategy in [GainStrategy::Default, GainStrategy::Logarithmic] {
        let mut agc = Agc::<f64>::new();
        agc.set_strategy(strategy);
        agc.set_bandwidth(0.01).expect("valid bandwidth");

        let input = helpers::noisy_tone(0.5, 0.05, 8000, 11);
        agc.execute_block(&input);

        // E|x|² = a² + 2σ²
        let energy: f64 = 0.25 + 2.0 * 0.05 * 0.05;
        assert_relative_eq!(agc.get_gain(), (1.0 / energy).sqrt(), max_relative = 0.05);
    }
}
