pub mod error;
pub mod validate;

pub mod analysis;
pub mod config;
pub mod schedule;
pub mod session;
pub mod signal;

pub use crate::config::config::QuantConfig;
pub use crate::error::{QuantError, Result};
pub use crate::session::Session;
pub use crate::signal::quantize::{quantize, Quantizer};
