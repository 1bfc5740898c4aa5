//! Scriptbridge - apply numeric-engine scripts to image sequences
//!
//! This library crate exposes the CLI's configuration loading and image file
//! I/O for integration testing. The bridge itself lives in the `sb-*` crates.

pub mod config;
pub mod images;
