use std::fmt;

use serde::Serialize;

use crate::config::config::QuantConfig;
use crate::error::{QuantError, Result};
use crate::signal::quantize::{level_count, Quantizer};

/// A config with `max > min`, finite bounds and a supported bit depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidConfig {
    cfg: QuantConfig,
    q: Quantizer,
}

impl ValidConfig {
    fn new(cfg: &QuantConfig) -> Result<Self> {
        Ok(Self {
            cfg: *cfg,
            q: Quantizer::new(cfg)?,
        })
    }

    pub fn config(&self) -> QuantConfig {
        self.cfg
    }

    pub fn level_count(&self) -> u64 {
        self.q.level_count()
    }

    pub fn step(&self) -> f64 {
        self.q.step().unwrap_or_default()
    }

    pub fn quantizer(&self) -> Quantizer {
        self.q
    }
}

/// Non-fatal conditions reported next to a valid result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// `max <= min` during live refresh; output is the constant `min`.
    RangeDegeneracy { min: f64, max: f64 },
    /// The tracked input was clamped into the range before quantizing.
    OutOfRange { voltage: f64, min: f64, max: f64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Notice::RangeDegeneracy { min, max } => write!(
                f,
                "maximum range ({max} V) must be greater than minimum range ({min} V); output held at {min} V"
            ),
            Notice::OutOfRange { voltage, min, max } => write!(
                f,
                "analog voltage ({voltage} V) is outside the specified range ({min} V to {max} V); quantized the clamped value"
            ),
        }
    }
}

/// Outcome of a live-mode check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Checked {
    Valid(ValidConfig),
    /// Range collapsed; callers render the constant `min_range`.
    Degenerate(QuantConfig, Notice),
}

impl Checked {
    pub fn config(&self) -> QuantConfig {
        match self {
            Checked::Valid(v) => v.config(),
            Checked::Degenerate(c, _) => *c,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        match self {
            Checked::Valid(_) => None,
            Checked::Degenerate(_, n) => Some(*n),
        }
    }
}

/// Strict validation used by explicit compute.
///
/// Bit depth is checked first: it is fatal in every mode.
pub fn validate(cfg: &QuantConfig) -> Result<ValidConfig> {
    check_structure(cfg)?;
    if cfg.is_degenerate() {
        return Err(QuantError::InvalidRange {
            min: cfg.min_range,
            max: cfg.max_range,
        });
    }
    ValidConfig::new(cfg)
}

/// Lenient validation used by live refresh: a collapsed range is reported,
/// not rejected.
pub fn validate_live(cfg: &QuantConfig) -> Result<Checked> {
    check_structure(cfg)?;
    if cfg.is_degenerate() {
        let notice = Notice::RangeDegeneracy {
            min: cfg.min_range,
            max: cfg.max_range,
        };
        return Ok(Checked::Degenerate(*cfg, notice));
    }
    ValidConfig::new(cfg).map(Checked::Valid)
}

/// `Some(OutOfRange)` when `voltage` lies outside `[min, max]`.
pub fn check_voltage(cfg: &QuantConfig, voltage: f64) -> Option<Notice> {
    if cfg.contains(voltage) {
        None
    } else {
        Some(Notice::OutOfRange {
            voltage,
            min: cfg.min_range,
            max: cfg.max_range,
        })
    }
}

fn check_structure(cfg: &QuantConfig) -> Result<()> {
    level_count(cfg.bit_depth)?;
    if !cfg.max_range.is_finite() {
        return Err(QuantError::NonFinite { field: "max_range" });
    }
    if !cfg.min_range.is_finite() {
        return Err(QuantError::NonFinite { field: "min_range" });
    }
    Ok(())
}
