// crates/adcq-cli/src/cmd/mod.rs

pub mod common;
pub mod config;
pub mod levels;
pub mod quantize;
pub mod replay;
pub mod waveform;
