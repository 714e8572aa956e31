// crates/adcq-cli/src/cmd/levels.rs

use clap::Args;
use adcq_core::validate::{validate_live, Checked};

use crate::cmd::common::SettingsArgs;

#[derive(Args, Debug)]
pub struct LevelsArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Print at most N evenly spread levels (always includes both ends)
    #[arg(long)]
    pub limit: Option<u64>,
}

pub fn run(args: LevelsArgs) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;

    let valid = match validate_live(&settings.quant)? {
        Checked::Valid(v) => v,
        Checked::Degenerate(cfg, notice) => {
            eprintln!("WARN: {notice}");
            println!("0\t{}", cfg.min_range);
            return Ok(());
        }
    };

    let q = valid.quantizer();
    let n = q.level_count();
    eprintln!("levels = {n}, step = {:.6} V", valid.step());

    match args.limit {
        Some(limit) if limit < n => {
            for idx in spread(n, limit) {
                println!("{idx}\t{}", q.level(idx));
            }
        }
        _ => {
            for (idx, v) in q.levels().enumerate() {
                println!("{idx}\t{v}");
            }
        }
    }

    Ok(())
}

/// `limit` indices spread evenly over `0..n`, first and last included.
fn spread(n: u64, limit: u64) -> Vec<u64> {
    match limit {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let top = (n - 1) as f64;
            let mut out: Vec<u64> = (0..limit)
                .map(|i| (top * i as f64 / (limit - 1) as f64).round() as u64)
                .collect();
            out.dedup();
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::spread;

    #[test]
    fn spread_hits_both_ends() {
        assert_eq!(spread(256, 5), vec![0, 64, 128, 191, 255]);
        assert_eq!(spread(256, 2), vec![0, 255]);
        assert_eq!(spread(256, 1), vec![0]);
        assert!(spread(256, 0).is_empty());
    }
}
