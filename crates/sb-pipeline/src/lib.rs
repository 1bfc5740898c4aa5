//! # sb-pipeline
//!
//! Applies an engine script to every image of a sequence.
//!
//! This crate provides:
//!
//! - **[`ScriptReference`]** -- splits a script path into the directory the
//!   engine must enter and the callable name.
//! - **[`format_parameters`]** -- renders literal trailing arguments.
//! - **[`ScriptBridge`]** -- one engine round trip per image (inject,
//!   evaluate, retrieve) plus the one-off directory change.
//! - **[`SequenceDriver`]** -- validates, changes directory once, and walks the
//!   sequence in order with cancellation and progress reporting.
//! - **[`ScriptNode`]** / **[`create_node`]** -- the pipeline node holding the
//!   script parameters and slots, built for a chosen element type.

pub mod bridge;
pub mod context;
pub mod driver;
pub mod factory;
pub mod node;
pub mod params;
pub mod script;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at the crate root.
pub use bridge::ScriptBridge;
pub use context::{ProgressSender, RunContext};
pub use driver::SequenceDriver;
pub use factory::{create_node, AnyImageList, AnyScriptNode};
pub use node::ScriptNode;
pub use params::format_parameters;
pub use script::ScriptReference;
