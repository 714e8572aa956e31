// crates/adcq-cli/src/io/mod.rs

pub mod csv;
pub mod jsonl;
pub mod settings_file;
