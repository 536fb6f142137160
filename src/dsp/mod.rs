/// Digital Signal Processing (DSP) module.
///
/// This module holds the automatic gain control loop and the small building
/// blocks it is assembled from. Every block operates on complex baseband
/// samples and is generic over the floating-point precision of those samples
/// (`f32` or `f64`).
///
/// # Overview
///
/// Per sample, the AGC runs its blocks in a fixed order:
///
/// ```text
/// x ──► Energy Estimator ──► Gain Strategy ──► Gain Limiter ──► y = x · gain
///            │                     │                 │
///       smoothed |x|²        Default / Log / Exp   [gain_min, gain_max]
/// ```
///
/// When the loop is locked, the first three stages are skipped and the frozen
/// gain is applied directly.
///
/// # Modules
///
/// - [`agc`]: The [`Agc`](agc::Agc) driver, configuration, lock control and queries
/// - [`energy`]: Instantaneous and exponentially smoothed energy estimation
/// - [`strategy`]: The three interchangeable gain update laws
/// - [`limiter`]: Hard gain bounds
///
/// # Traits
///
/// - [`DspBlock`]: A generic DSP processing block that operates on slices of
///   complex samples and produces complex output.
///
/// # Examples
///
/// ```
/// use rs_agc::dsp::{DspBlock, agc::Agc};
/// use num_complex::Complex;
///
/// let mut agc = Agc::<f32>::new();
/// agc.set_bandwidth(0.01).unwrap();
///
/// let samples = vec![Complex::new(0.1, 0.0); 4096];
/// let normalized = agc.process(&samples);
/// assert_eq!(normalized.len(), samples.len());
/// ```
///
/// # Thread Safety
///
/// DSP blocks maintain internal state and provide no internal locking. Each
/// stream should own its instance; callers sharing one across threads must
/// serialize access themselves.
use std::fmt;

use num_complex::Complex;
use num_traits::Float;

pub mod agc;
pub mod energy;
pub mod limiter;
pub mod strategy;

/// Trait for DSP blocks that process complex-valued signals.
///
/// This trait represents a generic DSP processing block that takes a slice
/// of complex samples and produces a vector of complex samples. DSP blocks
/// typically maintain internal state between calls to `process()`.
///
/// # Examples
///
/// ```
/// use rs_agc::dsp::{DspBlock, agc::Agc};
/// use num_complex::Complex;
///
/// let mut agc = Agc::<f64>::new();
/// let input = vec![Complex::new(1.0, 0.0); 10];
/// let output = agc.process(&input);
/// assert_eq!(output.len(), 10);
/// ```
pub trait DspBlock<T = f32> {
    /// Process a block of complex samples.
    ///
    /// # Arguments
    ///
    /// * `data` - Input complex samples
    ///
    /// # Returns
    ///
    /// A vector of processed complex samples
    fn process(&mut self, data: &[Complex<T>]) -> Vec<Complex<T>>;
}

/// Floating-point precision a DSP block can run at.
///
/// Implemented for every `Float` that can also be printed, which in practice
/// means `f32` and `f64`.
pub trait Sample: Float + fmt::Debug + fmt::Display + Send + Sync + Unpin + 'static {}

impl<T> Sample for T where T: Float + fmt::Debug + fmt::Display + Send + Sync + Unpin + 'static {}

/// Converts an `f64` literal into the working precision.
///
/// Every `Float` implementor can represent an `f64` value (possibly rounded),
/// so the fallback is never taken for `f32`/`f64`.
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
