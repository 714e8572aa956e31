// crates/adcq-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "adcq-cli")]
#[command(about = "Analog-to-digital quantizer CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quantize one analog voltage (explicit compute)
    Quantize(cmd::quantize::QuantizeArgs),

    /// Sample the reference sine and quantize it (live mode)
    Waveform(cmd::waveform::WaveformArgs),

    /// Print the quantization level grid
    Levels(cmd::levels::LevelsArgs),

    /// Settings file tools (.adq)
    Config(cmd::config::ConfigArgs),

    /// Replay a script of timed edits through the debounced session
    Replay(cmd::replay::ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Quantize(args) => cmd::quantize::run(args),
        Commands::Waveform(args) => cmd::waveform::run(args),
        Commands::Levels(args) => cmd::levels::run(args),
        Commands::Config(args) => cmd::config::run(args),
        Commands::Replay(args) => cmd::replay::run(args),
    }
}
