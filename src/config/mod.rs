//! Configuration module for usercat
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CatalogPaths;
pub use settings::{LogFormat, Settings};
