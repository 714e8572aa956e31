// crates/adcq-cli/src/io/csv.rs

use anyhow::Context;
use adcq_core::signal::vector::Waveform;

const HEADER: &str = "time,analog_voltage,quantized_voltage";

fn render(w: &Waveform) -> String {
    let mut s = String::with_capacity(32 * (w.len() + 1));
    s.push_str(HEADER);
    s.push('\n');
    for row in w.samples() {
        s.push_str(&format!(
            "{},{},{}\n",
            row.time, row.analog_voltage, row.quantized_voltage
        ));
    }
    s
}

pub fn write_waveform_file(path: &str, w: &Waveform) -> anyhow::Result<()> {
    std::fs::write(path, render(w)).with_context(|| format!("write waveform csv: {path}"))?;
    Ok(())
}

pub fn write_waveform_stdout(w: &Waveform) -> anyhow::Result<()> {
    print!("{}", render(w));
    Ok(())
}
