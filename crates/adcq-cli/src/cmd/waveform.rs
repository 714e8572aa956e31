// crates/adcq-cli/src/cmd/waveform.rs

use clap::{Args, ValueEnum};
use adcq_core::Session;

use crate::cmd::common::SettingsArgs;
use crate::io::{csv, jsonl};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum WaveFmt {
    /// JSON lines: {"time":T,"analog_voltage":A,"quantized_voltage":Q}
    Jsonl,
    /// CSV with a header row
    Csv,
}

#[derive(Args, Debug)]
pub struct WaveformArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = WaveFmt::Jsonl)]
    pub fmt: WaveFmt,

    /// Output file path; if omitted, prints to stdout
    #[arg(long)]
    pub out: Option<String>,

    /// Print sample/level/error stats to stderr
    #[arg(long)]
    pub stats: bool,
}

pub fn run(args: WaveformArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;
    let session = Session::new(settings);

    // Live mode: a collapsed range renders flat instead of failing.
    let frame = session.recompute_live()?;
    for n in &frame.notices {
        eprintln!("WARN: {n}");
    }

    let w = &frame.waveform;
    match (args.fmt, args.out.as_deref()) {
        (WaveFmt::Jsonl, Some(p)) => jsonl::write_waveform_file(p, w)?,
        (WaveFmt::Jsonl, None) => jsonl::write_waveform_stdout(w)?,
        (WaveFmt::Csv, Some(p)) => csv::write_waveform_file(p, w)?,
        (WaveFmt::Csv, None) => csv::write_waveform_stdout(w)?,
    }

    if args.stats {
        eprintln!("--- waveform ---");
        eprintln!("samples         = {}", w.len());
        eprintln!("levels          = {}", frame.level_grid.len());
        eprintln!("max_abs_error   = {:.6} V", w.max_error());
        eprintln!(
            "tracked         = {} V -> {} V",
            frame.tracked.analog_voltage, frame.tracked.quantized_voltage
        );
    }

    Ok(())
}
