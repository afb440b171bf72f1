//! Core domain + application logic for the channel ban bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind a
//! port (trait) implemented in the adapter crate; the classifier and the
//! dispatch loop are testable without any network dependency.

pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod ports;

pub use errors::{Error, Result};
