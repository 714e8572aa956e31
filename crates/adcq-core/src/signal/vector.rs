// crates/adcq-core/src/signal/vector.rs

use serde::Serialize;

use crate::config::config::QuantConfig;
use crate::error::Result;
use crate::signal::quantize::Quantizer;
use crate::signal::sample::{sample, Sample, SamplerParams};

/// Quantize a whole sequence.
///
/// Element `i` of the output equals `quantize(cfg, voltages[i])`: the plan is
/// built once and the same per-element kernel is applied.
pub fn quantize_all(cfg: &QuantConfig, voltages: &[f64]) -> Result<Vec<f64>> {
    let q = Quantizer::new(cfg)?;
    Ok(voltages.iter().map(|&v| q.apply(v)).collect())
}

/// In-place variant of `quantize_all`.
pub fn quantize_in_place(cfg: &QuantConfig, voltages: &mut [f64]) -> Result<()> {
    let q = Quantizer::new(cfg)?;
    for v in voltages.iter_mut() {
        *v = q.apply(*v);
    }
    Ok(())
}

/// Three equal-length columns ready for plotting.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Waveform {
    pub time: Vec<f64>,
    pub analog_voltage: Vec<f64>,
    pub quantized_voltage: Vec<f64>,
}

impl Waveform {
    /// Sample the reference sine for `cfg` and quantize it.
    pub fn render(cfg: &QuantConfig, params: &SamplerParams) -> Result<Self> {
        let q = Quantizer::new(cfg)?;
        let points = sample(cfg, params)?;

        let n = points.len();
        let mut w = Waveform {
            time: Vec::with_capacity(n),
            analog_voltage: Vec::with_capacity(n),
            quantized_voltage: Vec::with_capacity(n),
        };
        for p in points {
            w.time.push(p.time);
            w.analog_voltage.push(p.voltage);
        }
        w.quantized_voltage = w.analog_voltage.iter().map(|&v| q.apply(v)).collect();
        Ok(w)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Row view over the three columns.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.time
            .iter()
            .zip(&self.analog_voltage)
            .zip(&self.quantized_voltage)
            .map(|((&time, &analog_voltage), &quantized_voltage)| Sample {
                time,
                analog_voltage,
                quantized_voltage,
            })
    }

    /// Largest absolute difference between analog and quantized traces.
    pub fn max_error(&self) -> f64 {
        self.samples()
            .map(|s| (s.analog_voltage - s.quantized_voltage).abs())
            .fold(0.0, f64::max)
    }
}
