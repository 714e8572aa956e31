// crates/adcq-core/src/config/mod.rs

pub mod config;
pub mod defaults;
pub mod format;
