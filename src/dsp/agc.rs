//! Automatic Gain Control (AGC)
//!
//! This module provides a liquid-dsp compatible AGC for normalizing the
//! amplitude of complex baseband samples toward a target energy.
//!
//! # Overview
//!
//! The AGC measures the energy of each input sample, computes a new gain with
//! one of three feedback laws ([`GainStrategy`]), clamps it into
//! `[gain_min, gain_max]` and applies it to the sample. Once the loop has
//! settled it can be locked, after which the frozen gain is applied to every
//! sample without further adaptation.
//!
//! # Design
//!
//! The implementation follows liquid-dsp's `agc_crcf` design:
//! - Energy measured as `Re(x · x*)`, smoothed with a fixed one-pole filter
//!   for the default and logarithmic laws
//! - Loop filter coefficients `alpha = sqrt(BT)`, `beta = 1 - alpha`
//! - Gain clamped after every update, before it is applied or reported
//!
//! Configuration errors are returned as [`Error::InvalidArgument`] and leave
//! the AGC untouched.
//!
//! # Example
//!
//! ```
//! use rs_agc::dsp::agc::Agc;
//! use rs_agc::dsp::strategy::GainStrategy;
//! use num_complex::Complex;
//!
//! let mut agc = Agc::<f32>::new();
//! agc.set_strategy(GainStrategy::Logarithmic);
//! agc.set_bandwidth(0.01)?;
//!
//! // Process samples
//! let mut samples = vec![Complex::new(0.05, 0.02); 4000];
//! agc.execute_in_place(&mut samples);
//!
//! // Weak input: the loop amplifies
//! assert!(agc.get_gain() > 1.0);
//! # Ok::<(), rs_agc::Error>(())
//! ```
//!
//! # Reference
//!
//! This implementation is based on liquid-dsp's `agc_crcf` object.
//! See: <https://github.com/jgaeddert/liquid-dsp>

use std::fmt;

use num_complex::Complex;
use tracing::debug;

use crate::config::AgcConfig;
use crate::dsp::energy::EnergyEstimator;
use crate::dsp::limiter::GainLimits;
use crate::dsp::strategy::{GainStrategy, LoopFilter};
use crate::dsp::{constant, DspBlock, Sample};
use crate::error::{Error, Result};

/// Automatic Gain Control for complex signals.
///
/// One instance drives one sample stream. It provides no internal locking;
/// share it across threads only behind the caller's own synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct Agc<T = f32> {
    /// Active gain update law
    strategy: GainStrategy,

    /// Target output energy (> 0)
    target: T,

    /// Current gain value, always within `limits`
    gain: T,

    /// Hard bounds on the gain
    limits: GainLimits<T>,

    /// Loop filter coefficients derived from the bandwidth
    filter: LoopFilter<T>,

    /// Signal energy estimator state
    energy: EnergyEstimator<T>,

    /// AGC locked flag
    is_locked: bool,
}

impl<T: Sample> Agc<T> {
    /// Create a new AGC with default settings.
    ///
    /// Target 1.0, gain 1.0, limits `[1e-6, 1e6]`, zero bandwidth, unlocked,
    /// logarithmic strategy. With zero bandwidth the default and logarithmic
    /// laws hold the gain still; call [`set_bandwidth`](Self::set_bandwidth)
    /// before use.
    pub fn new() -> Self {
        Self {
            strategy: GainStrategy::default(),
            target: T::one(),
            gain: T::one(),
            limits: GainLimits::default(),
            filter: LoopFilter::default(),
            energy: EnergyEstimator::new(),
            is_locked: false,
        }
    }

    /// Create an AGC from a configuration.
    ///
    /// Fails with [`Error::InvalidArgument`] on the first invalid field.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_agc::{Agc, AgcConfig, GainStrategy};
    ///
    /// let config = AgcConfig {
    ///     strategy: GainStrategy::Exponential,
    ///     bandwidth: 0.01,
    ///     ..Default::default()
    /// };
    /// let agc = Agc::<f64>::from_config(&config)?;
    /// assert_eq!(agc.get_strategy(), GainStrategy::Exponential);
    /// # Ok::<(), rs_agc::Error>(())
    /// ```
    pub fn from_config(config: &AgcConfig) -> Result<Self> {
        let mut agc = Self::new();
        agc.set_strategy(config.strategy);
        agc.set_target(constant(config.target))?;
        agc.set_gain_limits(constant(config.gain_min), constant(config.gain_max))?;
        agc.set_bandwidth(constant(config.bandwidth))?;
        agc.set_gain(constant(config.gain))?;
        Ok(agc)
    }

    /// Snapshot the current configuration.
    pub fn config(&self) -> AgcConfig {
        let to_f64 = |v: T| v.to_f64().unwrap_or(f64::NAN);
        AgcConfig {
            strategy: self.strategy,
            target: to_f64(self.target),
            gain: to_f64(self.gain),
            gain_min: to_f64(self.limits.min()),
            gain_max: to_f64(self.limits.max()),
            bandwidth: to_f64(self.filter.bandwidth()),
        }
    }

    /// Select the gain update law.
    pub fn set_strategy(&mut self, strategy: GainStrategy) {
        debug!(%strategy, "agc strategy set");
        self.strategy = strategy;
    }

    /// Get the active gain update law.
    pub fn get_strategy(&self) -> GainStrategy {
        self.strategy
    }

    /// Set the target output energy.
    ///
    /// Fails with [`Error::InvalidArgument`] unless `target` is finite and
    /// strictly positive.
    pub fn set_target(&mut self, target: T) -> Result<()> {
        if !(target > T::zero() && target.is_finite()) {
            debug!(%target, "rejected agc target");
            return Err(Error::invalid_argument(format!(
                "target energy must be greater than 0 (got {})",
                target
            )));
        }
        debug!(%target, "agc target set");
        self.target = target;
        Ok(())
    }

    /// Get the target output energy.
    pub fn get_target(&self) -> T {
        self.target
    }

    /// Set gain limits.
    ///
    /// The current gain is clamped into the new range.
    ///
    /// # Arguments
    ///
    /// * `min` - Minimum gain value
    /// * `max` - Maximum gain value, not less than `min`
    pub fn set_gain_limits(&mut self, min: T, max: T) -> Result<()> {
        let limits = GainLimits::new(min, max).inspect_err(|_| {
            debug!(%min, %max, "rejected agc gain limits");
        })?;
        debug!(%min, %max, "agc gain limits set");
        self.limits = limits;
        self.gain = self.limits.limit(self.gain);
        Ok(())
    }

    /// Get the `(min, max)` gain limits.
    pub fn get_gain_limits(&self) -> (T, T) {
        (self.limits.min(), self.limits.max())
    }

    /// Set the loop bandwidth-time product.
    ///
    /// # Arguments
    ///
    /// * `bandwidth` - Loop bandwidth in [0, 1]. Lower values provide
    ///   smoother gain adjustment but slower response to level changes.
    pub fn set_bandwidth(&mut self, bandwidth: T) -> Result<()> {
        let filter = LoopFilter::new(bandwidth).inspect_err(|_| {
            debug!(%bandwidth, "rejected agc bandwidth");
        })?;
        debug!(
            %bandwidth,
            alpha = %filter.alpha(),
            beta = %filter.beta(),
            "agc bandwidth set"
        );
        self.filter = filter;
        Ok(())
    }

    /// Get the current bandwidth.
    pub fn get_bandwidth(&self) -> T {
        self.filter.bandwidth()
    }

    /// Set the gain directly (useful for initialization).
    ///
    /// Fails with [`Error::InvalidArgument`] unless `gain` is finite and
    /// strictly positive. The stored gain is clamped into the limits.
    pub fn set_gain(&mut self, gain: T) -> Result<()> {
        if !(gain > T::zero() && gain.is_finite()) {
            debug!(%gain, "rejected agc gain");
            return Err(Error::invalid_argument(format!(
                "gain must be finite and greater than 0 (got {})",
                gain
            )));
        }
        self.gain = self.limits.limit(gain);
        Ok(())
    }

    /// Get the current gain value.
    pub fn get_gain(&self) -> T {
        self.gain
    }

    /// Get the current gain in dB.
    pub fn get_gain_db(&self) -> T {
        constant::<T>(20.0) * self.gain.log10()
    }

    /// Estimated input signal level, `target / gain`.
    pub fn get_signal_level(&self) -> T {
        self.target / self.gain
    }

    /// Estimated input signal level in dB.
    ///
    /// This is useful for monitoring AGC operation.
    pub fn get_signal_level_db(&self) -> T {
        constant::<T>(10.0) * self.get_signal_level().log10()
    }

    /// Get the current energy estimate fed to the gain strategy.
    pub fn get_energy_estimate(&self) -> T {
        self.energy.smoothed()
    }

    /// Get the energy estimator state.
    pub fn energy(&self) -> &EnergyEstimator<T> {
        &self.energy
    }

    /// Lock the AGC.
    ///
    /// When locked, the gain is not updated (useful for stable operation
    /// after acquisition).
    pub fn lock(&mut self) {
        debug!(gain = %self.gain, "agc locked");
        self.is_locked = true;
    }

    /// Unlock the AGC.
    pub fn unlock(&mut self) {
        debug!("agc unlocked");
        self.is_locked = false;
    }

    /// Check if the AGC is locked.
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Reset the AGC state.
    ///
    /// Returns the energy estimator to its unit state and unlocks. Gain,
    /// limits, target, bandwidth and strategy are kept.
    pub fn reset(&mut self) {
        debug!("agc reset");
        self.energy.reset();
        self.unlock();
    }

    /// Process a complex sample through the AGC.
    ///
    /// # Arguments
    ///
    /// * `x` - Input sample
    ///
    /// # Returns
    ///
    /// The input scaled by the updated gain (or by the frozen gain when locked).
    ///
    /// # Example
    ///
    /// ```
    /// use rs_agc::dsp::agc::Agc;
    /// use num_complex::Complex;
    ///
    /// let mut agc = Agc::<f32>::new();
    /// agc.set_bandwidth(0.01)?;
    /// let y = agc.execute(Complex::new(0.5, 0.3));
    /// # Ok::<(), rs_agc::Error>(())
    /// ```
    pub fn execute(&mut self, x: Complex<T>) -> Complex<T> {
        if self.is_locked {
            return x.scale(self.gain);
        }

        let energy = self.energy.update(x, self.strategy.energy_estimate());
        let gain = self
            .strategy
            .update(self.gain, self.target, energy, &self.filter);

        // A frozen loop (alpha = 0) meeting the infinite ideal gain of a silent
        // input gives 0 * inf; hold the gain then
        if !gain.is_nan() {
            self.gain = self.limits.limit(gain);
        }

        x.scale(self.gain)
    }

    /// Process a batch of complex samples.
    ///
    /// # Arguments
    ///
    /// * `input` - Input samples, in stream order
    ///
    /// # Returns
    ///
    /// Vector of normalized samples.
    pub fn execute_block(&mut self, input: &[Complex<T>]) -> Vec<Complex<T>> {
        input.iter().map(|&x| self.execute(x)).collect()
    }

    /// Process samples in place.
    pub fn execute_in_place(&mut self, samples: &mut [Complex<T>]) {
        for s in samples.iter_mut() {
            *s = self.execute(*s);
        }
    }
}

impl<T: Sample> Default for Agc<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> DspBlock<T> for Agc<T> {
    fn process(&mut self, data: &[Complex<T>]) -> Vec<Complex<T>> {
        self.execute_block(data)
    }
}

impl<T: Sample> fmt::Display for Agc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agc [rssi: {:12.4}dB]", self.get_signal_level_db())
    }
}
