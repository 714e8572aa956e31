// crates/adcq-core/src/analysis.rs

use std::fmt;

use serde::Serialize;

use crate::session::CalculationSnapshot;

/// Rough listening-quality band for a bit depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FidelityTier {
    /// 1..=7 bits
    LoFi,
    /// 8..=11 bits
    Speech,
    /// 12..=15 bits
    Balanced,
    /// 16+ bits
    HiFi,
}

impl FidelityTier {
    pub fn for_bit_depth(bit_depth: i32) -> Self {
        match bit_depth {
            i32::MIN..=7 => FidelityTier::LoFi,
            8..=11 => FidelityTier::Speech,
            12..=15 => FidelityTier::Balanced,
            _ => FidelityTier::HiFi,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FidelityTier::LoFi => {
                "very large steps: heavy quantization noise and a grainy, lo-fi result with little dynamic range"
            }
            FidelityTier::Speech => {
                "noise still audible on quiet passages; adequate for speech or size-constrained audio"
            }
            FidelityTier::Balanced => {
                "noise well reduced; clear for most listening, minor flaws under critical listening"
            }
            FidelityTier::HiFi => {
                "noise below the hearing threshold; CD-quality dynamic range and detail"
            }
        }
    }
}

impl fmt::Display for FidelityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FidelityTier::LoFi => "lo-fi",
            FidelityTier::Speech => "speech",
            FidelityTier::Balanced => "balanced",
            FidelityTier::HiFi => "hi-fi",
        };
        f.write_str(name)
    }
}

/// Feedback about the last explicit compute.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Analysis {
    Detailed {
        bit_depth: i32,
        level_count: u64,
        step: f64,
        tier: FidelityTier,
        /// Input was outside the range and got clamped.
        clipped: bool,
    },
    /// Too few levels or a non-positive range; the output is effectively constant.
    Unusable,
}

pub fn analyze(snap: &CalculationSnapshot) -> Analysis {
    let cfg = snap.config;
    let half_span = cfg.half_span();
    let levels = match u32::try_from(cfg.bit_depth) {
        Ok(b) if b < 64 => 1u64 << b,
        _ => 0,
    };

    if levels <= 1 || !(half_span > 0.0) {
        return Analysis::Unusable;
    }

    Analysis::Detailed {
        bit_depth: cfg.bit_depth,
        level_count: levels,
        step: half_span / (levels - 1) as f64 * 2.0,
        tier: FidelityTier::for_bit_depth(cfg.bit_depth),
        clipped: !cfg.contains(snap.analog_voltage),
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Analysis::Detailed {
                bit_depth,
                level_count,
                step,
                tier,
                clipped,
            } => {
                writeln!(f, "bit_depth      = {bit_depth} ({level_count} levels)")?;
                writeln!(f, "step_size      = {step:.4} V")?;
                writeln!(f, "fidelity       = {tier}: {}", tier.description())?;
                if clipped {
                    writeln!(
                        f,
                        "clipping       = input outside range; peaks would flatten into harsh distortion"
                    )?;
                }
                Ok(())
            }
            Analysis::Unusable => writeln!(
                f,
                "too few levels or an invalid range: the output collapses to a constant"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_edges() {
        assert_eq!(FidelityTier::for_bit_depth(1), FidelityTier::LoFi);
        assert_eq!(FidelityTier::for_bit_depth(7), FidelityTier::LoFi);
        assert_eq!(FidelityTier::for_bit_depth(8), FidelityTier::Speech);
        assert_eq!(FidelityTier::for_bit_depth(11), FidelityTier::Speech);
        assert_eq!(FidelityTier::for_bit_depth(12), FidelityTier::Balanced);
        assert_eq!(FidelityTier::for_bit_depth(15), FidelityTier::Balanced);
        assert_eq!(FidelityTier::for_bit_depth(16), FidelityTier::HiFi);
        assert_eq!(FidelityTier::for_bit_depth(24), FidelityTier::HiFi);
    }

    #[test]
    fn step_is_finite_across_full_width() {
        let snap = CalculationSnapshot {
            config: crate::QuantConfig::new(f64::MAX, -f64::MAX, 8),
            analog_voltage: 0.0,
            quantized_voltage: 0.0,
            sample_rate: 1000,
        };
        match analyze(&snap) {
            Analysis::Detailed { step, .. } => {
                assert!(step.is_finite() && step > 0.0);
                assert!((step / (f64::MAX / 255.0) - 2.0).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
