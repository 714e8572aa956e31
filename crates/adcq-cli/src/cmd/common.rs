// crates/adcq-cli/src/cmd/common.rs

use clap::Args;
use adcq_core::config::config::Settings;
use adcq_core::config::defaults::default_settings;

use crate::io::settings_file;

/// Settings source shared by every subcommand: an optional `.adq` file, then
/// per-field overrides on top.
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Settings path (.adq). If omitted, uses built-in defaults.
    #[arg(long)]
    pub config: Option<String>,

    /// Maximum range (V)
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Minimum range (V)
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Bit depth (number of quantization bits)
    #[arg(long, allow_hyphen_values = true)]
    pub bits: Option<i32>,

    /// Analog input voltage (V)
    #[arg(long, allow_hyphen_values = true)]
    pub voltage: Option<f64>,

    /// Sample rate of the reference waveform (Hz)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Waveform window length (s)
    #[arg(long)]
    pub duration: Option<f64>,

    /// Reference sine frequency (Hz)
    #[arg(long)]
    pub frequency: Option<f64>,
}

impl SettingsArgs {
    pub fn resolve(&self) -> anyhow::Result<Settings> {
        let mut s = match self.config.as_deref() {
            Some(p) => settings_file::load_adq(p)?,
            None => default_settings(),
        };

        if let Some(v) = self.max {
            s.quant.max_range = v;
        }
        if let Some(v) = self.min {
            s.quant.min_range = v;
        }
        if let Some(v) = self.bits {
            s.quant.bit_depth = v;
        }
        if let Some(v) = self.voltage {
            s.analog_voltage = v;
        }
        if let Some(v) = self.sample_rate {
            s.sampler.sample_rate = v;
        }
        if let Some(v) = self.duration {
            s.sampler.duration_s = v;
        }
        if let Some(v) = self.frequency {
            s.sampler.frequency_hz = v;
        }
        Ok(s)
    }
}
