// crates/adcq-core/src/signal/mod.rs

pub mod quantize;
pub mod sample;
pub mod vector;
