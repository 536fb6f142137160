//! Test helper utilities for generating synthetic I/Q signals

#![allow(dead_code)]

use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Generate a complex tone of constant magnitude
///
/// # Arguments
/// * `amplitude` - Magnitude of every sample
/// * `frequency` - Frequency in cycles per sample
/// * `num_samples` - Number of samples to generate
pub fn tone(amplitude: f64, frequency: f64, num_samples: usize) -> Vec<Complex<f64>> {
    (0..num_samples)
        .map(|n| Complex::from_polar(amplitude, 2.0 * PI * frequency * n as f64))
        .collect()
}

/// Same as [`tone`], at single precision
pub fn tone_f32(amplitude: f32, frequency: f32, num_samples: usize) -> Vec<Complex<f32>> {
    tone(amplitude as f64, frequency as f64, num_samples)
        .into_iter()
        .map(|c| Complex::new(c.re as f32, c.im as f32))
        .collect()
}

/// Circular complex Gaussian noise, `sigma` per component
pub fn gaussian_noise(rng: &mut StdRng, sigma: f64) -> Complex<f64> {
    let normal = Normal::new(0.0, sigma).unwrap();
    Complex::new(normal.sample(rng), normal.sample(rng))
}

/// Tone plus complex Gaussian noise (`sigma` per component)
pub fn noisy_tone(amplitude: f64, sigma: f64, num_samples: usize, seed: u64) -> Vec<Complex<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    tone(amplitude, 0.01, num_samples)
        .into_iter()
        .map(|x| x + gaussian_noise(&mut rng, sigma))
        .collect()
}

/// Gaussian noise whose level jumps over several decades, in blocks of `block` samples
pub fn wild_signal(num_samples: usize, block: usize, seed: u64) -> Vec<Complex<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = 1.0;
    (0..num_samples)
        .map(|n| {
            if n % block == 0 {
                // 10^[-4, 4)
                level = 10f64.powf(rng.gen_range(-4.0..4.0));
            }
            gaussian_noise(&mut rng, level)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_constant_magnitude() {
        for x in tone(0.3, 0.05, 100) {
            assert!((x.norm() - 0.3).abs() < 1e-12);
        }
    }

    #[test]
    fn test_wild_signal_spans_decades() {
        let signal = wild_signal(4000, 100, 7);
        let max = signal.iter().map(|x| x.norm()).fold(0.0, f64::max);
        let min = signal.iter().map(|x| x.norm()).fold(f64::INFINITY, f64::min);
        assert!(max / min > 1e4);
    }

    #[test]
    fn test_noise_is_deterministic() {
        assert_eq!(noisy_tone(1.0, 0.1, 64, 3), noisy_tone(1.0, 0.1, 64, 3));
    }
}
