//! The central domain logic and interface definitions for the naedex
//! community showcase: entity models, port traits, and the shared error
//! taxonomy. Everything I/O-shaped lives behind the ports so the services
//! never know which backend is active.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
