// crates/adcq-core/src/signal/sample.rs

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::config::QuantConfig;
use crate::error::{QuantError, Result};

/// Reference waveform parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplerParams {
    /// Samples per second, >= 1.
    pub sample_rate: u32,
    /// Length of the rendered window in seconds.
    pub duration_s: f64,
    /// Sine frequency in Hz.
    pub frequency_hz: f64,
}

impl SamplerParams {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(QuantError::InvalidSampleRate);
        }
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(QuantError::InvalidDuration(self.duration_s));
        }
        if !self.frequency_hz.is_finite() {
            return Err(QuantError::InvalidFrequency(self.frequency_hz));
        }
        Ok(())
    }

    /// `max(2, floor(sample_rate * duration))`.
    pub fn sample_count(&self) -> usize {
        let n = (self.sample_rate as f64 * self.duration_s).floor();
        if n.is_finite() && n > 2.0 {
            n as usize
        } else {
            2
        }
    }
}

/// One unquantized point of the reference sine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalogSample {
    pub time: f64,
    pub voltage: f64,
}

/// A fully processed point: produced in bulk, never edited afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub analog_voltage: f64,
    pub quantized_voltage: f64,
}

/// Sine spanning the config range, sampled over `[0, duration)`.
///
/// `v(t) = (max-min)/2 * sin(2*pi*f*t) + (max+min)/2`
///
/// The iterator is a pure function of its inputs; clone it to restart.
pub fn sample(cfg: &QuantConfig, params: &SamplerParams) -> Result<SampleIter> {
    params.validate()?;
    let count = params.sample_count();
    Ok(SampleIter {
        amplitude: cfg.half_span(),
        offset: cfg.midpoint(),
        omega: TAU * params.frequency_hz,
        spacing: params.duration_s / count as f64,
        next: 0,
        count,
    })
}

#[derive(Clone, Debug)]
pub struct SampleIter {
    amplitude: f64,
    offset: f64,
    omega: f64,
    spacing: f64,
    next: usize,
    count: usize,
}

impl SampleIter {
    fn at(&self, i: usize) -> AnalogSample {
        let time = i as f64 * self.spacing;
        AnalogSample {
            time,
            voltage: self.amplitude * (self.omega * time).sin() + self.offset,
        }
    }
}

impl Iterator for SampleIter {
    type Item = AnalogSample;

    fn next(&mut self) -> Option<AnalogSample> {
        if self.next >= self.count {
            return None;
        }
        let s = self.at(self.next);
        self.next += 1;
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SampleIter {}
