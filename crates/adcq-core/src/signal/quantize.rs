// crates/adcq-core/src/signal/quantize.rs

use crate::config::config::QuantConfig;
use crate::config::defaults::MAX_BIT_DEPTH;
use crate::error::{QuantError, Result};

/// Number of quantization levels for a bit depth: `2^bit_depth`.
pub fn level_count(bit_depth: i32) -> Result<u64> {
    if bit_depth <= 0 {
        return Err(QuantError::InvalidBitDepth { bit_depth });
    }
    if bit_depth > MAX_BIT_DEPTH {
        return Err(QuantError::BitDepthTooLarge {
            bit_depth,
            max: MAX_BIT_DEPTH,
        });
    }
    Ok(1u64 << bit_depth)
}

/// Voltage spacing between adjacent levels.
///
/// `None` for the collapse cases (degenerate range, or fewer than two levels).
pub fn step_size(cfg: &QuantConfig) -> Result<Option<f64>> {
    Ok(Quantizer::new(cfg)?.step())
}

/// Quantize a single voltage (round-to-nearest, ties away from zero).
///
/// - `max <= min` returns `min` for every input, without looking at the bit depth
/// - inputs outside the range are clamped first
/// - `quantize(min) == min` and `quantize(max) == max` exactly
///
/// Validation of the range is left to the caller; see `validate`.
pub fn quantize(cfg: &QuantConfig, voltage: f64) -> Result<f64> {
    Ok(Quantizer::new(cfg)?.apply(voltage))
}

/// Precomputed per-config quantization plan.
///
/// Both the scalar entry point and the batch path go through `apply`, so
/// they agree bit for bit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantizer {
    min: f64,
    max: f64,
    grid: Option<Grid>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Grid {
    levels: u64,
    /// `levels - 1` as f64: the largest index.
    top: f64,
    /// Half-width of the range. Finite for any finite bounds, where the full
    /// width can overflow.
    half_span: f64,
    /// Half the distance between adjacent levels.
    half_step: f64,
}

impl Quantizer {
    pub fn new(cfg: &QuantConfig) -> Result<Self> {
        let (min, max) = (cfg.min_range, cfg.max_range);

        // Degenerate range wins over a bad bit depth.
        if cfg.is_degenerate() {
            return Ok(Self::collapsed(min, max));
        }

        let levels = level_count(cfg.bit_depth)?;
        if levels <= 1 {
            return Ok(Self::collapsed(min, max));
        }

        let top = (levels - 1) as f64;
        let half_span = cfg.half_span();
        Ok(Self {
            min,
            max,
            grid: Some(Grid {
                levels,
                top,
                half_span,
                half_step: half_span / top,
            }),
        })
    }

    fn collapsed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            grid: None,
        }
    }

    /// True when every input maps to `min_range`.
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.grid.is_none()
    }

    /// Levels the output can take (1 when collapsed).
    #[inline]
    pub fn level_count(&self) -> u64 {
        self.grid.map_or(1, |g| g.levels)
    }

    /// Spacing between levels. Can be `inf` when a single step is wider
    /// than `f64::MAX` (1 bit over a near-maximal range).
    #[inline]
    pub fn step(&self) -> Option<f64> {
        self.grid.map(|g| g.half_step * 2.0)
    }

    #[inline]
    pub fn min_range(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max_range(&self) -> f64 {
        self.max
    }

    /// Level index a voltage lands on, in `0..level_count()`.
    pub fn index(&self, voltage: f64) -> u64 {
        let Some(g) = self.grid else {
            return 0;
        };
        if voltage.is_nan() {
            return 0;
        }

        let clamped = voltage.clamp(self.min, self.max);
        let normalized = (clamped / 2.0 - self.min / 2.0) / g.half_span;

        // f64::round is ties-away-from-zero; `normalized` is never negative
        // here so ties always go up.
        let idx = (normalized * g.top).round().clamp(0.0, g.top);
        idx as u64
    }

    /// Voltage of level `idx`. Indices past the top saturate to `max_range`.
    pub fn level(&self, idx: u64) -> f64 {
        let Some(g) = self.grid else {
            return self.min;
        };
        if idx == 0 {
            self.min
        } else if idx >= g.levels - 1 {
            // Pin the top level so the upper bound is a fixed point.
            self.max
        } else {
            // Two half-offsets: `idx * step` alone may overflow.
            let half = (idx as f64) * g.half_step;
            self.min + half + half
        }
    }

    /// Quantized voltage for one input.
    #[inline]
    pub fn apply(&self, voltage: f64) -> f64 {
        self.level(self.index(voltage))
    }

    /// All levels, ascending, from `min_range` to `max_range` inclusive.
    pub fn levels(&self) -> LevelGrid {
        LevelGrid {
            q: *self,
            next: 0,
            end: self.level_count(),
        }
    }
}

/// Iterator over the quantization levels of a `Quantizer`.
///
/// Lazy: a 32-bit grid is never materialised unless the caller collects it.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelGrid {
    q: Quantizer,
    next: u64,
    end: u64,
}

impl Iterator for LevelGrid {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.end {
            return None;
        }
        let v = self.q.level(self.next);
        self.next += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<f64> {
        self.next = self.next.saturating_add(n as u64).min(self.end);
        self.next()
    }

    fn last(self) -> Option<f64> {
        if self.next >= self.end {
            None
        } else {
            Some(self.q.level(self.end - 1))
        }
    }
}

impl ExactSizeIterator for LevelGrid {}

/// Full level grid for a config, collected.
pub fn level_grid(cfg: &QuantConfig) -> Result<Vec<f64>> {
    Ok(Quantizer::new(cfg)?.levels().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_up() {
        // 1 bit over [0, 1]: 0.5 sits exactly between the two levels.
        let q = Quantizer::new(&QuantConfig::new(1.0, 0.0, 1)).unwrap();
        assert_eq!(q.index(0.5), 1);
        assert_eq!(q.apply(0.5), 1.0);
        assert_eq!(q.apply(0.4999), 0.0);
    }

    #[test]
    fn nan_maps_to_bottom() {
        let q = Quantizer::new(&QuantConfig::default()).unwrap();
        assert_eq!(q.apply(f64::NAN), -10.0);
    }

    #[test]
    fn level_past_top_saturates() {
        let q = Quantizer::new(&QuantConfig::new(1.0, -1.0, 2)).unwrap();
        assert_eq!(q.level(3), 1.0);
        assert_eq!(q.level(99), 1.0);
    }

    #[test]
    fn last_jumps_to_top() {
        let q = Quantizer::new(&QuantConfig::new(10.0, -10.0, 32)).unwrap();
        assert_eq!(q.levels().last(), Some(10.0));
        let mut done = Quantizer::new(&QuantConfig::new(1.0, 0.0, 1)).unwrap().levels();
        done.nth(5);
        assert_eq!(done.last(), None);
    }

    #[test]
    fn nth_skips_ahead() {
        let q = Quantizer::new(&QuantConfig::new(3.0, 0.0, 2)).unwrap();
        let mut it = q.levels();
        assert_eq!(it.nth(2), Some(2.0));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next(), Some(3.0));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn full_width_range_stays_finite() {
        let q = Quantizer::new(&QuantConfig::new(f64::MAX, -f64::MAX, 3)).unwrap();
        let grid: Vec<f64> = q.levels().collect();
        assert_eq!(grid.len(), 8);
        assert!(grid.iter().all(|v| v.is_finite()));
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(q.apply(-f64::MAX), -f64::MAX);
        assert_eq!(q.apply(f64::MAX), f64::MAX);
        assert_eq!(q.apply(f64::INFINITY), f64::MAX);
        for (i, &v) in grid.iter().enumerate() {
            assert_eq!(q.index(v), i as u64);
        }
    }
}
