// crates/adcq-cli/src/cmd/replay.rs

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Args;
use adcq_core::schedule::{Fired, UpdateScheduler};
use adcq_core::session::{Field, FrameSink, LiveFrame};
use adcq_core::{QuantError, Session};

use crate::cmd::common::SettingsArgs;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Script path. One event per line: `<ms> <field> <value>`, `<ms> compute`
    /// or `<ms> clear`. Fields: max, min, bits, voltage, sample-rate.
    /// Blank lines and `#` comments are skipped.
    #[arg(long)]
    pub script: String,

    /// Debounce interval (ms)
    #[arg(long, default_value_t = 50)]
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Set(Field, f64),
    Compute,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Event {
    at_ms: u64,
    action: Action,
}

/// Prints one line per debounced refresh.
struct Printer {
    at_ms: u64,
    refreshes: u32,
}

impl FrameSink for Printer {
    fn show(&mut self, frame: &LiveFrame, fired: Fired) {
        self.refreshes += 1;
        let c = frame.config;
        println!(
            "{:>6}ms refresh #{} events={} max={} min={} bits={} levels={} tracked={} V",
            self.at_ms,
            self.refreshes,
            fired.coalesced,
            c.max_range,
            c.min_range,
            c.bit_depth,
            frame.level_grid.len(),
            frame.tracked.quantized_voltage
        );
        for n in &frame.notices {
            println!("{:>6}ms   WARN: {n}", self.at_ms);
        }
    }

    fn show_error(&mut self, err: &QuantError) {
        self.refreshes += 1;
        println!("{:>6}ms refresh #{} ERROR: {err}", self.at_ms, self.refreshes);
    }
}

pub fn run(args: ReplayArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script {}", args.script))?;
    let events = parse_script(&text)?;

    let settings = args.settings.resolve()?;
    let scheduler = UpdateScheduler::new(Duration::from_millis(args.debounce_ms));
    let mut session = Session::with_scheduler(settings, scheduler);

    let t0 = Instant::now();
    let mut out = Printer {
        at_ms: 0,
        refreshes: 0,
    };

    for ev in &events {
        let now = t0 + Duration::from_millis(ev.at_ms);
        flush_due(&mut session, t0, Some(now), &mut out);

        log::debug!("replay: {ev:?}");
        match ev.action {
            Action::Set(field, value) => session.set_field(field, value, now),
            Action::Clear => {
                session.clear(now);
                println!("{:>6}ms clear", ev.at_ms);
            }
            Action::Compute => match session.compute() {
                Ok(o) => {
                    println!("{:>6}ms compute = {}", ev.at_ms, session.display_value());
                    if let Some(w) = o.warning {
                        println!("{:>6}ms   WARN: {w}", ev.at_ms);
                    }
                }
                Err(e) => println!("{:>6}ms compute ERROR: {e}", ev.at_ms),
            },
        }
    }
    flush_due(&mut session, t0, None, &mut out);

    eprintln!("events={} refreshes={}", events.len(), out.refreshes);
    Ok(())
}

/// Fire a pending refresh whose deadline falls at or before `until`
/// (or any pending refresh when `until` is `None`).
fn flush_due(session: &mut Session, t0: Instant, until: Option<Instant>, out: &mut Printer) {
    let Some(deadline) = session.scheduler().deadline() else {
        return;
    };
    if until.is_some_and(|u| deadline > u) {
        return;
    }
    out.at_ms = deadline.duration_since(t0).as_millis() as u64;
    session.drive(deadline, out);
}

fn parse_script(text: &str) -> anyhow::Result<Vec<Event>> {
    let mut events = Vec::new();
    let mut last = 0u64;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let ev = parse_line(line).with_context(|| format!("script line {}", lineno + 1))?;
        if ev.at_ms < last {
            bail!("script line {}: time goes backwards ({} < {})", lineno + 1, ev.at_ms, last);
        }
        last = ev.at_ms;
        events.push(ev);
    }
    Ok(events)
}

fn parse_line(line: &str) -> anyhow::Result<Event> {
    let mut parts = line.split_whitespace();
    let at_ms: u64 = parts
        .next()
        .context("missing time")?
        .parse()
        .context("time must be whole milliseconds")?;
    let verb = parts.next().context("missing field or action")?;

    let action = match verb {
        "compute" => Action::Compute,
        "clear" => Action::Clear,
        name => {
            let field = match name {
                "max" => Field::MaxRange,
                "min" => Field::MinRange,
                "bits" => Field::BitDepth,
                "voltage" => Field::AnalogVoltage,
                "sample-rate" => Field::SampleRate,
                other => bail!("unknown field: {other}"),
            };
            let value: f64 = parts
                .next()
                .context("missing value")?
                .parse()
                .context("value must be a number")?;
            Action::Set(field, value)
        }
    };

    if let Some(extra) = parts.next() {
        bail!("unexpected trailing token: {extra}");
    }
    Ok(Event { at_ms, action })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edits_and_actions() {
        let evs = parse_script("0 bits 4\n# comment\n\n10 max -2.5 # trailing\n90 compute\n95 clear\n").unwrap();
        assert_eq!(
            evs,
            vec![
                Event { at_ms: 0, action: Action::Set(Field::BitDepth, 4.0) },
                Event { at_ms: 10, action: Action::Set(Field::MaxRange, -2.5) },
                Event { at_ms: 90, action: Action::Compute },
                Event { at_ms: 95, action: Action::Clear },
            ]
        );
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_script("x bits 4").is_err());
        assert!(parse_script("0 volume 4").is_err());
        assert!(parse_script("0 bits").is_err());
        assert!(parse_script("0 bits 4 5").is_err());
        assert!(parse_script("20 bits 4\n10 bits 5").is_err());
    }
}
