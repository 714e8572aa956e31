// crates/adcq-core/src/session.rs

use std::time::Instant;

use log::{debug, warn};
use serde::Serialize;

use crate::analysis::{analyze, Analysis};
use crate::config::config::{QuantConfig, Settings};
use crate::config::defaults::{default_settings, DISPLAY_PRECISION};
use crate::error::{QuantError, Result};
use crate::schedule::{Fired, UpdateScheduler};
use crate::signal::quantize::{LevelGrid, Quantizer};
use crate::signal::sample::SamplerParams;
use crate::signal::vector::Waveform;
use crate::validate::{check_voltage, validate, validate_live, Checked, Notice};

/// Result of an explicit compute, kept until the next compute or a clear.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CalculationSnapshot {
    pub config: QuantConfig,
    pub analog_voltage: f64,
    pub quantized_voltage: f64,
    pub sample_rate: u32,
}

/// Explicit compute output: the snapshot plus an optional out-of-range warning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputeOutcome {
    pub snapshot: CalculationSnapshot,
    pub warning: Option<Notice>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrackedPoint {
    pub analog_voltage: f64,
    pub quantized_voltage: f64,
}

/// Everything one live refresh hands to the display.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveFrame {
    pub config: QuantConfig,
    pub waveform: Waveform,
    /// Every level, ascending, generated on demand. Yields only `min_range`
    /// when the range is degenerate.
    pub level_grid: LevelGrid,
    pub tracked: TrackedPoint,
    pub notices: Vec<Notice>,
}

/// Display collaborator fed by `Session::drive`.
pub trait FrameSink {
    fn show(&mut self, frame: &LiveFrame, fired: Fired);
    fn show_error(&mut self, err: &QuantError);
}

/// Editable field, for step adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    MaxRange,
    MinRange,
    BitDepth,
    AnalogVoltage,
    SampleRate,
}

/// The kernel as the presentation layer sees it.
///
/// Holds the current settings, debounces edits into live refreshes and runs
/// explicit computes on demand. Every recompute starts from a copy of the
/// full current settings, so an edit landing between cycles never sees
/// partial state.
#[derive(Clone, Debug)]
pub struct Session {
    settings: Settings,
    scheduler: UpdateScheduler,
    snapshot: Option<CalculationSnapshot>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(default_settings())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self::with_scheduler(settings, UpdateScheduler::default())
    }

    pub fn with_scheduler(settings: Settings, scheduler: UpdateScheduler) -> Self {
        Self {
            settings,
            scheduler,
            snapshot: None,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn config(&self) -> QuantConfig {
        self.settings.quant
    }

    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Option<&CalculationSnapshot> {
        self.snapshot.as_ref()
    }

    // --- configuration-change events (all debounced) ---

    pub fn replace_settings(&mut self, settings: Settings, now: Instant) {
        self.settings = settings;
        self.scheduler.notify(now);
    }

    pub fn set_config(&mut self, cfg: QuantConfig, now: Instant) {
        self.settings.quant = cfg;
        self.scheduler.notify(now);
    }

    pub fn set_analog_voltage(&mut self, voltage: f64, now: Instant) {
        self.settings.analog_voltage = voltage;
        self.scheduler.notify(now);
    }

    pub fn set_sampler(&mut self, params: SamplerParams, now: Instant) {
        self.settings.sampler = params;
        self.scheduler.notify(now);
    }

    /// Set one field from a raw number. Bit depth and sample rate are truncated
    /// toward zero; sample rate saturates into `u32`.
    pub fn set_field(&mut self, field: Field, value: f64, now: Instant) {
        let s = &mut self.settings;
        match field {
            Field::MaxRange => s.quant.max_range = value,
            Field::MinRange => s.quant.min_range = value,
            Field::BitDepth => s.quant.bit_depth = value as i32,
            Field::AnalogVoltage => s.analog_voltage = value,
            Field::SampleRate => s.sampler.sample_rate = value as u32,
        }
        self.scheduler.notify(now);
    }

    /// Nudge one field by `delta`.
    ///
    /// Integer fields move by whole steps and never drop below 1. Voltage
    /// fields are rounded to one decimal place afterwards.
    pub fn adjust(&mut self, field: Field, delta: f64, now: Instant) {
        let s = &mut self.settings;
        match field {
            Field::MaxRange => s.quant.max_range = round_tenth(s.quant.max_range + delta),
            Field::MinRange => s.quant.min_range = round_tenth(s.quant.min_range + delta),
            Field::AnalogVoltage => s.analog_voltage = round_tenth(s.analog_voltage + delta),
            Field::BitDepth => {
                let next = (s.quant.bit_depth as f64 + delta.round()).max(1.0);
                s.quant.bit_depth = next as i32;
            }
            Field::SampleRate => {
                let next = (s.sampler.sample_rate as f64 + delta.round()).max(1.0);
                s.sampler.sample_rate = next as u32;
            }
        }
        self.scheduler.notify(now);
    }

    /// Back to start-up defaults; the last result is dropped.
    pub fn clear(&mut self, now: Instant) {
        self.settings = default_settings();
        self.snapshot = None;
        self.scheduler.notify(now);
    }

    // --- recompute paths ---

    /// Run the live refresh if the debounce deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<(Fired, Result<LiveFrame>)> {
        let fired = self.scheduler.poll(now)?;
        Some((fired, self.recompute_live()))
    }

    /// `tick`, routed into a display collaborator. Returns whether a refresh ran.
    pub fn drive<S: FrameSink>(&mut self, now: Instant, sink: &mut S) -> bool {
        match self.tick(now) {
            Some((fired, Ok(frame))) => {
                sink.show(&frame, fired);
                true
            }
            Some((_, Err(e))) => {
                sink.show_error(&e);
                true
            }
            None => false,
        }
    }

    /// Live refresh from the current settings.
    ///
    /// A collapsed range is tolerated: the waveform flattens to `min_range`
    /// and a `RangeDegeneracy` notice is attached. A bad bit depth is fatal.
    pub fn recompute_live(&self) -> Result<LiveFrame> {
        let settings = self.settings;
        let checked = validate_live(&settings.quant)?;
        let voltage = finite(settings.analog_voltage, "analog_voltage")?;

        let cfg = checked.config();
        let waveform = Waveform::render(&cfg, &settings.sampler)?;

        // Collapsed ranges and a normal grid share one plan.
        let q = match checked {
            Checked::Valid(valid) => valid.quantizer(),
            Checked::Degenerate(..) => Quantizer::new(&cfg)?,
        };

        let mut notices = Vec::new();
        if q.is_collapsed() {
            notices.extend(checked.notice());
        } else if let Some(n) = check_voltage(&cfg, voltage) {
            notices.push(n);
        }
        let tracked = TrackedPoint {
            analog_voltage: voltage,
            quantized_voltage: q.apply(voltage),
        };
        let level_grid = q.levels();

        for n in &notices {
            warn!("{n}");
        }
        debug!(
            "live recompute: {} samples, {} levels",
            waveform.len(),
            level_grid.len()
        );

        Ok(LiveFrame {
            config: cfg,
            waveform,
            level_grid,
            tracked,
            notices,
        })
    }

    /// Explicit compute: bypasses the debounce and runs immediately.
    ///
    /// Strict validation applies; on failure the previous snapshot is dropped.
    pub fn compute(&mut self) -> Result<ComputeOutcome> {
        match self.compute_inner() {
            Ok(outcome) => {
                self.snapshot = Some(outcome.snapshot);
                Ok(outcome)
            }
            Err(e) => {
                self.snapshot = None;
                Err(e)
            }
        }
    }

    fn compute_inner(&self) -> Result<ComputeOutcome> {
        let settings = self.settings;
        let valid = validate(&settings.quant)?;
        let voltage = finite(settings.analog_voltage, "analog_voltage")?;
        if settings.sampler.sample_rate == 0 {
            return Err(QuantError::InvalidSampleRate);
        }

        let cfg = valid.config();
        let quantized = valid.quantizer().apply(voltage);
        let warning = check_voltage(&cfg, voltage);
        if let Some(n) = &warning {
            warn!("{n}");
        }
        debug!("compute: {voltage} V -> {quantized} V");

        Ok(ComputeOutcome {
            snapshot: CalculationSnapshot {
                config: cfg,
                analog_voltage: voltage,
                quantized_voltage: quantized,
                sample_rate: settings.sampler.sample_rate,
            },
            warning,
        })
    }

    /// What the result label shows: `"4.9804 V"`, or `"N/A"` without a result.
    pub fn display_value(&self) -> String {
        match &self.snapshot {
            Some(s) => format_voltage(s.quantized_voltage),
            None => "N/A".to_string(),
        }
    }

    pub fn analysis(&self) -> Option<Analysis> {
        self.snapshot.as_ref().map(analyze)
    }
}

/// Fixed-precision voltage label.
pub fn format_voltage(v: f64) -> String {
    format!("{v:.prec$} V", prec = DISPLAY_PRECISION)
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn finite(v: f64, field: &'static str) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QuantError::NonFinite { field })
    }
}
