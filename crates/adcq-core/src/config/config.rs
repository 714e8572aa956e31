// crates/adcq-core/src/config/config.rs

use serde::{Deserialize, Serialize};

use crate::signal::sample::SamplerParams;

/// Range bounds plus bit depth for one quantization pass.
///
/// Replaced wholesale on every edit and handed around by value; nothing in the
/// kernel keeps a mutable reference to a shared instance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantConfig {
    /// Highest voltage the converter can represent (V).
    pub max_range: f64,
    /// Lowest voltage the converter can represent (V).
    pub min_range: f64,
    /// Number of bits used to index the quantization levels.
    pub bit_depth: i32,
}

impl QuantConfig {
    pub fn new(max_range: f64, min_range: f64, bit_depth: i32) -> Self {
        Self {
            max_range,
            min_range,
            bit_depth,
        }
    }

    /// `max <= min`: no meaningful grid can be built.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        // NaN bounds also land here.
        !(self.max_range > self.min_range)
    }

    /// Width of the voltage range. Not clamped; negative for inverted ranges.
    /// Overflows to `inf` for ranges wider than `f64::MAX`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max_range - self.min_range
    }

    /// Half the width, computed from halved bounds so it stays finite for
    /// any finite bounds.
    #[inline]
    pub fn half_span(&self) -> f64 {
        self.max_range / 2.0 - self.min_range / 2.0
    }

    /// Range midpoint, overflow-free for finite bounds.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.max_range / 2.0 + self.min_range / 2.0
    }

    /// Inclusive range test used for out-of-range reporting.
    #[inline]
    pub fn contains(&self, voltage: f64) -> bool {
        self.min_range <= voltage && voltage <= self.max_range
    }
}

/// Everything the presentation layer edits: the quantization config, the
/// single tracked input voltage and the reference waveform parameters.
///
/// This is also the payload of a `.adq` config file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub version: u16,
    pub quant: QuantConfig,
    pub analog_voltage: f64,
    pub sampler: SamplerParams,
}
