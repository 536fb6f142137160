//! Signal energy estimation.
//!
//! The AGC measures the energy of each incoming sample as `Re(x · x*)` and
//! either feeds it through a one-pole low-pass filter (smoothed estimate) or
//! uses it as is (instantaneous estimate). The smoothing factor is fixed and
//! does not depend on the loop bandwidth.
//!
//! Energies that overflow the working precision saturate at its largest
//! finite value, so the filter memory never holds infinity and recovers once
//! the input returns to normal levels.

use num_complex::Complex;
use num_traits::Float;

use crate::dsp::constant;

/// Smoothing factor of the energy low-pass filter.
pub const ENERGY_SMOOTHING: f64 = 0.1;

/// How the energy estimate is derived from each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyEstimate {
    /// Exponential moving average of `|x|²`
    Smoothed,
    /// `|x|²` of the current sample only
    Instantaneous,
}

/// Energy estimator state (IIR filter memory).
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyEstimator<T> {
    /// Energy of the most recent sample
    instant: T,
    /// Low-pass filtered energy
    smoothed_squared: T,
    /// Square root of the filtered energy, fed to the gain strategies
    smoothed: T,
}

impl<T: Float> EnergyEstimator<T> {
    /// Create an estimator at its neutral (unit) state.
    pub fn new() -> Self {
        Self {
            instant: T::zero(),
            smoothed_squared: T::one(),
            smoothed: T::one(),
        }
    }

    /// Return the filter memory to its neutral (unit) state.
    pub fn reset(&mut self) {
        self.smoothed_squared = T::one();
        self.smoothed = T::one();
    }

    /// Feed one sample and return the updated estimate.
    pub fn update(&mut self, x: Complex<T>, mode: EnergyEstimate) -> T {
        // x·conj(x) is real; taking `.re` discards the round-off imaginary part
        self.instant = (x * x.conj()).re.min(T::max_value());

        match mode {
            EnergyEstimate::Smoothed => {
                let zeta: T = constant(ENERGY_SMOOTHING);
                self.smoothed_squared = (zeta * self.instant
                    + (T::one() - zeta) * self.smoothed_squared)
                    .min(T::max_value());
                self.smoothed = self.smoothed_squared.sqrt();
            }
            EnergyEstimate::Instantaneous => {
                self.smoothed = self.instant.sqrt();
            }
        }

        self.smoothed
    }

    /// Energy of the most recent sample.
    pub fn instant(&self) -> T {
        self.instant
    }

    /// Filtered squared-magnitude estimate.
    pub fn smoothed_squared(&self) -> T {
        self.smoothed_squared
    }

    /// Current estimate used by the gain strategies.
    pub fn smoothed(&self) -> T {
        self.smoothed
    }
}

impl<T: Float> Default for EnergyEstimator<T> {
    fn default() -> Self {
        Self::new()
    }
}
