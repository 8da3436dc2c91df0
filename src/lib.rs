//! hyperscope - 4D polytope viewer core
//!
//! The workspace crates do the geometry and per-frame work; this crate adds
//! the application layer around them:
//!
//! - [`config`] - Layered TOML/environment configuration
//! - [`scenes`] - Built-in scene presets

pub mod config;
pub mod scenes;
