//! Hard gain bounds.

use num_traits::Float;

use crate::error::{Error, Result};

/// Default lower gain bound.
pub const DEFAULT_GAIN_MIN: f64 = 1e-6;

/// Default upper gain bound.
pub const DEFAULT_GAIN_MAX: f64 = 1e6;

/// Inclusive `[min, max]` range the AGC gain is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainLimits<T> {
    min: T,
    max: T,
}

impl<T: Float> GainLimits<T> {
    /// Create gain limits.
    ///
    /// Fails with [`Error::InvalidArgument`] if `min > max` or either bound
    /// is NaN.
    pub fn new(min: T, max: T) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(Error::invalid_argument("gain limits must not be NaN"));
        }
        if min > max {
            return Err(Error::invalid_argument(
                "minimum gain must not exceed maximum gain",
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    /// Clamp a gain into the range.
    ///
    /// The upper bound is checked first, so a degenerate `min == max` range
    /// pins every gain to that value.
    pub fn limit(&self, gain: T) -> T {
        if gain > self.max {
            self.max
        } else if gain < self.min {
            self.min
        } else {
            gain
        }
    }
}

impl<T: Float> Default for GainLimits<T> {
    fn default() -> Self {
        Self {
            min: crate::dsp::constant(DEFAULT_GAIN_MIN),
            max: crate::dsp::constant(DEFAULT_GAIN_MAX),
        }
    }
}
