//! Core domain + relay logic for the ops updates relay bot.
//!
//! This crate is framework-agnostic. Telegram lives behind the messaging port
//! implemented in the adapter crate.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod relay;
pub mod service;

pub use errors::{Error, Result};
