//! Gain update laws.
//!
//! Three interchangeable feedback laws drive the AGC gain toward the value
//! that brings the output to the target energy:
//!
//! - [`GainStrategy::Default`]: first-order IIR blend of the current gain
//!   with the ideal gain `target / energy`.
//! - [`GainStrategy::Logarithmic`]: the same loop run on `ln(gain)`, so the
//!   convergence rate is constant in dB regardless of the signal level.
//! - [`GainStrategy::Exponential`]: proportional control on the output energy
//!   error, using the unsmoothed per-sample energy. Fastest reaction to large
//!   deviations, noisiest in steady state.
//!
//! Loop responsiveness comes from [`LoopFilter`], derived from the
//! bandwidth-time product `BT`: `alpha = sqrt(BT)`, `beta = 1 - alpha`.
//!
//! The energy and output energy are saturated at the largest finite value,
//! and the multiplicative laws floor the gain at the smallest positive
//! normal value, so neither `inf / inf` nor `ln(0)` can enter the loop.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::dsp::energy::EnergyEstimate;
use crate::error::{Error, Result};

/// Selects the gain update law of an AGC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainStrategy {
    /// Linear blend toward the ideal gain
    Default,
    /// Multiplicative update on the log-domain gain error
    #[default]
    #[serde(alias = "log")]
    Logarithmic,
    /// Proportional update on the output energy error
    #[serde(alias = "exp")]
    Exponential,
}

impl GainStrategy {
    /// All strategies, in selector order.
    pub const ALL: [GainStrategy; 3] = [
        GainStrategy::Default,
        GainStrategy::Logarithmic,
        GainStrategy::Exponential,
    ];

    /// Lowercase name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            GainStrategy::Default => "default",
            GainStrategy::Logarithmic => "logarithmic",
            GainStrategy::Exponential => "exponential",
        }
    }

    /// Energy estimate this strategy consumes.
    pub fn energy_estimate(self) -> EnergyEstimate {
        match self {
            GainStrategy::Default | GainStrategy::Logarithmic => EnergyEstimate::Smoothed,
            GainStrategy::Exponential => EnergyEstimate::Instantaneous,
        }
    }

    /// Compute the next (unlimited) gain.
    ///
    /// # Arguments
    ///
    /// * `gain` - Current gain
    /// * `target` - Target output energy (> 0)
    /// * `energy` - Energy estimate from [`energy_estimate`](Self::energy_estimate)
    /// * `filter` - Loop filter coefficients
    pub fn update<T: Float>(self, gain: T, target: T, energy: T, filter: &LoopFilter<T>) -> T {
        let energy = energy.min(T::max_value());
        match self {
            GainStrategy::Default => {
                let ideal = target / energy;
                filter.beta * gain + filter.alpha * ideal
            }
            GainStrategy::Logarithmic => {
                let gain = gain.max(T::min_positive_value());
                let ideal = target / energy;
                let log_error = ideal.ln() - gain.ln();
                gain * (filter.alpha * log_error).exp()
            }
            GainStrategy::Exponential => {
                let gain = gain.max(T::min_positive_value());
                let e_out = (energy * gain).min(T::max_value());
                if e_out > target {
                    gain * (T::one() - filter.beta * (e_out - target) / e_out)
                } else {
                    gain * (T::one() + filter.beta * (target - e_out) / target)
                }
            }
        }
    }
}

impl fmt::Display for GainStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GainStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "linear" => Ok(GainStrategy::Default),
            "logarithmic" | "log" => Ok(GainStrategy::Logarithmic),
            "exponential" | "exp" => Ok(GainStrategy::Exponential),
            other => Err(Error::invalid_argument(format!(
                "unknown gain strategy '{}'",
                other
            ))),
        }
    }
}

/// Raw selector codes: 0 = default, 1 = logarithmic, 2 = exponential.
impl TryFrom<u8> for GainStrategy {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        GainStrategy::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| Error::invalid_state(format!("unrecognized strategy selector {}", value)))
    }
}

impl From<GainStrategy> for u8 {
    fn from(strategy: GainStrategy) -> u8 {
        match strategy {
            GainStrategy::Default => 0,
            GainStrategy::Logarithmic => 1,
            GainStrategy::Exponential => 2,
        }
    }
}

/// Gain control loop filter coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopFilter<T> {
    /// Bandwidth-time product in [0, 1]
    bandwidth: T,
    /// Feed-forward gain, `sqrt(bandwidth)`
    alpha: T,
    /// Feed-back gain, `1 - alpha`
    beta: T,
}

impl<T: Float> LoopFilter<T> {
    /// Derive the coefficients from a bandwidth-time product.
    ///
    /// Fails with [`Error::InvalidArgument`] outside `[0, 1]` (NaN included).
    pub fn new(bandwidth: T) -> Result<Self> {
        if !(bandwidth >= T::zero() && bandwidth <= T::one()) {
            return Err(Error::invalid_argument(
                "bandwidth must be in the range [0, 1]",
            ));
        }
        let alpha = bandwidth.sqrt();
        Ok(Self {
            bandwidth,
            alpha,
            beta: T::one() - alpha,
        })
    }

    /// Bandwidth-time product.
    pub fn bandwidth(&self) -> T {
        self.bandwidth
    }

    pub fn alpha(&self) -> T {
        self.alpha
    }

    pub fn beta(&self) -> T {
        self.beta
    }
}

impl<T: Float> Default for LoopFilter<T> {
    /// Zero bandwidth: `alpha = 0`, `beta = 1`.
    fn default() -> Self {
        Self {
            bandwidth: T::zero(),
            alpha: T::zero(),
            beta: T::one(),
        }
    }
}
