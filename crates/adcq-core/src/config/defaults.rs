// crates/adcq-core/src/config/defaults.rs

use std::time::Duration;

use crate::config::config::{QuantConfig, Settings};
use crate::signal::sample::SamplerParams;

/// Current `.adq` layout version.
pub const SETTINGS_VERSION: u16 = 1;

pub const DEFAULT_MAX_RANGE: f64 = 10.0;
pub const DEFAULT_MIN_RANGE: f64 = -10.0;
pub const DEFAULT_BIT_DEPTH: i32 = 8;
pub const DEFAULT_ANALOG_VOLTAGE: f64 = 5.0;

pub const DEFAULT_SAMPLE_RATE: u32 = 1_000;
pub const DEFAULT_DURATION_S: f64 = 1.0;
pub const DEFAULT_FREQUENCY_HZ: f64 = 1.0;

/// Quiet period that closes a burst of edits.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(50);

/// Largest accepted bit depth. Level indices stay far inside f64 integer
/// precision, so `quantize` remains a fixed point on its own output.
pub const MAX_BIT_DEPTH: i32 = 32;

/// Decimal places used when a single quantized voltage is shown.
pub const DISPLAY_PRECISION: usize = 4;

impl Default for QuantConfig {
    fn default() -> Self {
        Self {
            max_range: DEFAULT_MAX_RANGE,
            min_range: DEFAULT_MIN_RANGE,
            bit_depth: DEFAULT_BIT_DEPTH,
        }
    }
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_s: DEFAULT_DURATION_S,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

pub fn default_settings() -> Settings {
    Settings {
        version: SETTINGS_VERSION,
        quant: QuantConfig::default(),
        analog_voltage: DEFAULT_ANALOG_VOLTAGE,
        sampler: SamplerParams::default(),
    }
}

impl Default for Settings {
    fn default() -> Self {
        default_settings()
    }
}
