// src/models/mod.rs

//! Domain models for the directory lookup.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod filter;
mod person;
pub mod taxonomy;

// Re-export all public types
pub use config::{Config, FetcherConfig, OutputConfig};
pub use filter::QueryFilter;
pub use person::Person;
pub use taxonomy::BlockType;
