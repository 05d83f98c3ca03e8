//! # mail-adapters
//!
//! Transactional email over a Brevo-compatible HTTP API. An unconfigured
//! key degrades to a logged no-op that still reports success, so nothing
//! upstream ever blocks on mail setup.

pub mod brevo;

pub use brevo::BrevoMailer;
