// crates/adcq-cli/src/io/jsonl.rs

use anyhow::Context;
use adcq_core::signal::vector::Waveform;
use serde::Serialize;

/// One JSON object per line.
pub fn to_jsonl<T: Serialize>(rows: impl IntoIterator<Item = T>) -> anyhow::Result<String> {
    let mut s = String::new();
    for row in rows {
        s.push_str(&serde_json::to_string(&row)?);
        s.push('\n');
    }
    Ok(s)
}

/// Waveform as JSONL.
/// Format: {"time":T,"analog_voltage":A,"quantized_voltage":Q}
pub fn write_waveform_file(path: &str, w: &Waveform) -> anyhow::Result<()> {
    let s = to_jsonl(w.samples())?;
    std::fs::write(path, s).with_context(|| format!("write waveform jsonl: {path}"))?;
    Ok(())
}

pub fn write_waveform_stdout(w: &Waveform) -> anyhow::Result<()> {
    print!("{}", to_jsonl(w.samples())?);
    Ok(())
}
