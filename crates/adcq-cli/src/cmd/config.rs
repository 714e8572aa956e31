// crates/adcq-cli/src/cmd/config.rs

use clap::{Args, Subcommand};
use adcq_core::config::config::Settings;
use adcq_core::config::format as settings_format;
use adcq_core::validate::{validate, validate_live};

use crate::cmd::common::SettingsArgs;
use crate::io::settings_file;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub cmd: ConfigCmd,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Write a settings file from defaults (or --config) plus overrides
    Write(WriteArgs),
    /// Print all settings fields and warn on degenerate ranges
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct WriteArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output path (.adq)
    #[arg(long)]
    pub out: String,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Settings path (.adq)
    #[arg(long)]
    pub config: String,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.cmd {
        ConfigCmd::Write(a) => cmd_write(a),
        ConfigCmd::Inspect(a) => cmd_inspect(a),
    }
}

fn cmd_write(a: WriteArgs) -> anyhow::Result<()> {
    let s = a.settings.resolve()?;
    settings_file::save_adq(&a.out, &s)?;
    log::info!("wrote {}", a.out);
    println!("settings_id  = {}", settings_format::settings_id_hex(&s));
    diagnostics(&s);
    Ok(())
}

fn cmd_inspect(a: InspectArgs) -> anyhow::Result<()> {
    let s: Settings = settings_file::load_adq(&a.config)?;

    println!("settings_path  = {}", a.config);
    println!("settings_id    = {}", settings_format::settings_id_hex(&s));
    println!("version        = {}", s.version);

    println!("max_range      = {} V", s.quant.max_range);
    println!("min_range      = {} V", s.quant.min_range);
    println!("bit_depth      = {}", s.quant.bit_depth);
    println!("analog_voltage = {} V", s.analog_voltage);

    println!("sample_rate    = {} Hz", s.sampler.sample_rate);
    println!("duration       = {} s", s.sampler.duration_s);
    println!("frequency      = {} Hz", s.sampler.frequency_hz);

    if let Ok(v) = validate(&s.quant) {
        println!("levels         = {}", v.level_count());
        println!("step_size      = {:.6} V", v.step());
    }

    println!();
    println!("--- diagnostics ---");
    diagnostics(&s);

    Ok(())
}

fn diagnostics(s: &Settings) {
    match validate_live(&s.quant) {
        Err(e) => println!("ERROR: {e}. Nothing can be computed with this file."),
        Ok(checked) => {
            if let Some(n) = checked.notice() {
                println!("WARN: {n}. Live plots flatten; explicit compute will fail.");
            }
        }
    }

    if !s.quant.contains(s.analog_voltage) && !s.quant.is_degenerate() {
        println!(
            "WARN: analog voltage {} V lies outside [{}, {}] V and will be clamped.",
            s.analog_voltage, s.quant.min_range, s.quant.max_range
        );
    }

    if let Err(e) = s.sampler.validate() {
        println!("ERROR: {e}. The reference waveform cannot be sampled.");
    }
}
