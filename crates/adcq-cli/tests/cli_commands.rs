use std::fs;
use std::process::{Command, Output};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_adcq-cli"))
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("spawn command")
}

fn run_ok(cmd: &mut Command) -> (String, String) {
    let out = run(cmd);
    let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        stdout,
        stderr
    );
    (stdout, stderr)
}

#[test]
fn quantize_defaults() {
    let (stdout, stderr) = run_ok(cli().args(["quantize"]));
    assert_eq!(stdout.trim(), "Quantized Voltage: 4.9804 V");
    assert!(!stderr.contains("WARN"), "{stderr}");
}

#[test]
fn quantize_one_bit_with_analysis() {
    let (stdout, _) = run_ok(cli().args([
        "quantize", "--max", "10", "--min", "-10", "--bits", "1", "--voltage", "5", "--analyze",
    ]));
    assert!(stdout.contains("Quantized Voltage: 10.0000 V"), "{stdout}");
    assert!(stdout.contains("2 levels"), "{stdout}");
    assert!(stdout.contains("lo-fi"), "{stdout}");
}

#[test]
fn quantize_warns_when_clamping() {
    let (stdout, stderr) = run_ok(cli().args(["quantize", "--voltage", "-25"]));
    assert!(stdout.contains("-10.0000 V"), "{stdout}");
    assert!(stderr.contains("WARN") && stderr.contains("outside"), "{stderr}");
}

#[test]
fn quantize_rejects_collapsed_range() {
    let out = run(cli().args(["quantize", "--max", "5", "--min", "5"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("must be greater than minimum range"), "{stderr}");
}

#[test]
fn quantize_rejects_zero_bits() {
    let out = run(cli().args(["quantize", "--bits", "0"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bit depth"), "{stderr}");
}

#[test]
fn quantize_json_report() {
    let (stdout, _) = run_ok(cli().args(["quantize", "--json"]));
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(v["snapshot"]["config"]["bit_depth"], 8);
    assert_eq!(v["snapshot"]["sample_rate"], 1000);
    assert!(v["warning"].is_null());
    assert_eq!(v["analysis"]["kind"], "detailed");
    assert_eq!(v["analysis"]["level_count"], 256);
}

#[test]
fn waveform_csv_has_one_row_per_sample() {
    let (stdout, _) = run_ok(cli().args(["waveform", "--fmt", "csv", "--sample-rate", "100"]));
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines[0], "time,analog_voltage,quantized_voltage");
    assert_eq!(lines.len(), 101);
}

#[test]
fn waveform_degenerate_range_is_flat_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wave.jsonl");
    let (_, stderr) = run_ok(cli().args([
        "waveform",
        "--max",
        "5",
        "--min",
        "5",
        "--sample-rate",
        "50",
        "--out",
        out.to_str().unwrap(),
    ]));
    assert!(stderr.contains("WARN"), "{stderr}");

    let text = fs::read_to_string(&out).unwrap();
    let rows: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 50);
    assert!(rows.iter().all(|r| r["quantized_voltage"] == 5.0));
}

#[test]
fn levels_limit_keeps_both_ends() {
    let (stdout, _) = run_ok(cli().args(["levels", "--bits", "8", "--limit", "3"]));
    let rows: Vec<_> = stdout.lines().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], "0\t-10");
    assert!(rows[1].starts_with("128\t0.0392"), "{}", rows[1]);
    assert_eq!(rows[2], "255\t10");
}

#[test]
fn config_write_then_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.adq");
    let p = path.to_str().unwrap();

    run_ok(cli().args(["config", "write", "--out", p, "--bits", "12", "--max", "3.3", "--min", "0"]));
    let (stdout, _) = run_ok(cli().args(["config", "inspect", "--config", p]));
    assert!(stdout.contains("bit_depth      = 12"), "{stdout}");
    assert!(stdout.contains("levels         = 4096"), "{stdout}");
    // default 5 V input lies above 3.3 V
    assert!(stdout.contains("will be clamped"), "{stdout}");

    let (q, _) = run_ok(cli().args(["quantize", "--config", p, "--voltage", "1.65"]));
    assert!(q.contains("Quantized Voltage: 1.65"), "{q}");
}

#[test]
fn corrupt_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.adq");
    fs::write(&path, b"ADQ1 not really").unwrap();
    let out = run(cli().args(["quantize", "--config", path.to_str().unwrap()]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("decode settings"), "{stderr}");
}

#[test]
fn replay_coalesces_bursts() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("edits.txt");
    fs::write(
        &script,
        "# typing 1, 12 into bits, then a slider drag\n\
         0 bits 1\n\
         15 bits 12\n\
         30 max 8\n\
         40 max 9\n\
         # quiet for > 50 ms, then a single edit\n\
         200 voltage 2\n\
         300 compute\n",
    )
    .unwrap();

    let (stdout, stderr) = run_ok(cli().args([
        "replay",
        "--script",
        script.to_str().unwrap(),
        "--sample-rate",
        "10",
    ]));
    let refreshes: Vec<_> = stdout.lines().filter(|l| l.contains("refresh #")).collect();
    assert_eq!(refreshes.len(), 2, "{stdout}");
    assert!(refreshes[0].contains("90ms refresh #1 events=4"), "{stdout}");
    assert!(refreshes[0].contains("max=9") && refreshes[0].contains("bits=12"), "{stdout}");
    assert!(refreshes[1].contains("250ms refresh #2 events=1"), "{stdout}");
    assert!(stdout.contains("300ms compute = "), "{stdout}");
    assert!(stderr.contains("events=6 refreshes=2"), "{stderr}");
}
