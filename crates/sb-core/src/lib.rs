//! sb-core: shared types, errors, and configuration.
//!
//! This crate is the foundational dependency for the other sb-* crates,
//! providing the unified error type, the bridge configuration, and the
//! generic image buffer that flows through the pipeline.

pub mod config;
pub mod error;
pub mod image;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use image::{Element, ElementKind, Image};
