// crates/adcq-core/src/config/format.rs

use crate::config::config::{QuantConfig, Settings};
use crate::config::defaults::SETTINGS_VERSION;
use crate::error::{QuantError, Result};
use crate::signal::sample::SamplerParams;

const MAGIC: &[u8; 4] = b"ADQ1";

/// Bytes covered by the crc32 (everything before it).
const BODY_LEN: usize = 4 + 2 + 8 + 8 + 4 + 8 + 4 + 8 + 8;
const ENCODED_LEN: usize = BODY_LEN + 4 + 16;

/// Fixed-size binary settings file (`.adq`).
/// Layout (little-endian):
/// MAGIC[4]
/// version:u16
/// max_range:f64 min_range:f64 bit_depth:i32
/// analog_voltage:f64
/// sample_rate:u32 duration_s:f64 frequency_hz:f64
/// crc32:u32          (over everything before crc32)
/// blake3_16:[16]     (over everything before blake3)
///
/// Ranges are stored as-is. A degenerate range still round-trips; it is
/// rejected or tolerated later depending on how the config is used.
pub fn encode(s: &Settings) -> Vec<u8> {
    let mut b = Vec::with_capacity(ENCODED_LEN);
    b.extend_from_slice(MAGIC);
    b.extend_from_slice(&s.version.to_le_bytes());

    b.extend_from_slice(&s.quant.max_range.to_le_bytes());
    b.extend_from_slice(&s.quant.min_range.to_le_bytes());
    b.extend_from_slice(&s.quant.bit_depth.to_le_bytes());

    b.extend_from_slice(&s.analog_voltage.to_le_bytes());

    b.extend_from_slice(&s.sampler.sample_rate.to_le_bytes());
    b.extend_from_slice(&s.sampler.duration_s.to_le_bytes());
    b.extend_from_slice(&s.sampler.frequency_hz.to_le_bytes());

    let c = crc32fast::hash(&b);
    b.extend_from_slice(&c.to_le_bytes());

    let h = digest16(&b);
    b.extend_from_slice(&h);

    b
}

pub fn decode(bytes: &[u8]) -> Result<Settings> {
    if bytes.len() < 4 || &bytes[0..4] != MAGIC {
        return Err(QuantError::ConfigFormat("bad magic".into()));
    }
    if bytes.len() != ENCODED_LEN {
        return Err(QuantError::ConfigFormat(format!(
            "expected {ENCODED_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let mut r = Reader { bytes, at: 4 };
    let version = r.u16()?;
    if version != SETTINGS_VERSION {
        return Err(QuantError::ConfigFormat(format!("unsupported version {version}")));
    }

    let max_range = r.f64()?;
    let min_range = r.f64()?;
    let bit_depth = r.i32()?;
    let analog_voltage = r.f64()?;
    let sample_rate = r.u32()?;
    let duration_s = r.f64()?;
    let frequency_hz = r.f64()?;

    let crc_expected = r.u32()?;
    if crc_expected != crc32fast::hash(&bytes[..BODY_LEN]) {
        return Err(QuantError::ConfigFormat("crc32 mismatch".into()));
    }

    let id_expected = &bytes[r.at..];
    if id_expected != digest16(&bytes[..BODY_LEN + 4]).as_slice() {
        return Err(QuantError::ConfigFormat("blake3 mismatch".into()));
    }

    Ok(Settings {
        version,
        quant: QuantConfig {
            max_range,
            min_range,
            bit_depth,
        },
        analog_voltage,
        sampler: SamplerParams {
            sample_rate,
            duration_s,
            frequency_hz,
        },
    })
}

/// Stable identifier for a settings value: the trailing blake3_16 of its encoding.
pub fn settings_id_16(s: &Settings) -> [u8; 16] {
    let enc = encode(s);
    let mut id = [0u8; 16];
    id.copy_from_slice(&enc[BODY_LEN + 4..]);
    id
}

pub fn settings_id_hex(s: &Settings) -> String {
    settings_id_16(s).iter().map(|b| format!("{b:02x}")).collect()
}

fn digest16(bytes: &[u8]) -> [u8; 16] {
    let hash = blake3::hash(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&hash.as_bytes()[..16]);
    out
}

struct Reader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.at + N;
        let chunk = self
            .bytes
            .get(self.at..end)
            .ok_or_else(|| QuantError::ConfigFormat("unexpected eof".into()))?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.at = end;
        Ok(out)
    }

    fn u16(&mut self) -> Result<u16> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn u32(&mut self) -> Result<u32> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    fn i32(&mut self) -> Result<i32> {
        self.take::<4>().map(i32::from_le_bytes)
    }

    fn f64(&mut self) -> Result<f64> {
        self.take::<8>().map(f64::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_settings;

    #[test]
    fn layout_length_is_fixed() {
        assert_eq!(encode(&default_settings()).len(), ENCODED_LEN);
    }

    #[test]
    fn flipped_body_byte_fails_crc() {
        let mut enc = encode(&default_settings());
        enc[10] ^= 0x01;
        let err = decode(&enc).unwrap_err();
        assert!(err.to_string().contains("crc32"), "{err}");
    }

    #[test]
    fn flipped_id_byte_fails_blake3() {
        let mut enc = encode(&default_settings());
        let last = enc.len() - 1;
        enc[last] ^= 0x80;
        let err = decode(&enc).unwrap_err();
        assert!(err.to_string().contains("blake3"), "{err}");
    }
}
