//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks shared by the
//! domains: error handling, configuration, and the target service selector.

pub mod config;
pub mod error;
pub mod service;

pub use config::Config;
pub use error::{Error, Result};
pub use service::{Service, UnknownService};
