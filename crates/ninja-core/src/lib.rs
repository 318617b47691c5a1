//! # ninja-core
//!
//! Core types, traits, configuration, and error handling for the Schedule Ninja popup.

pub mod config;
pub mod error;
pub mod message;
pub mod settings;
pub mod traits;

pub use config::shellexpand;
