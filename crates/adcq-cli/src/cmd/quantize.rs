// crates/adcq-cli/src/cmd/quantize.rs

use anyhow::Context;
use clap::Args;
use adcq_core::analysis::Analysis;
use adcq_core::session::CalculationSnapshot;
use adcq_core::validate::Notice;
use adcq_core::Session;
use serde::Serialize;

use crate::cmd::common::SettingsArgs;

#[derive(Args, Debug)]
pub struct QuantizeArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Also print the analysis (levels, step size, fidelity, clipping)
    #[arg(long)]
    pub analyze: bool,

    /// Print one JSON object instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Report {
    snapshot: CalculationSnapshot,
    warning: Option<Notice>,
    analysis: Option<Analysis>,
}

pub fn run(args: QuantizeArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;
    let mut session = Session::new(settings);

    let out = session.compute().context("quantize")?;

    if args.json {
        let report = Report {
            snapshot: out.snapshot,
            warning: out.warning,
            analysis: session.analysis(),
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("Quantized Voltage: {}", session.display_value());
    if let Some(w) = out.warning {
        eprintln!("WARN: {w}");
    }

    if args.analyze {
        if let Some(a) = session.analysis() {
            println!("--- analysis ---");
            print!("{a}");
        }
    }

    Ok(())
}
