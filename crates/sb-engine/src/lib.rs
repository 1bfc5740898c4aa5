//! # sb-engine
//!
//! Everything that touches the external numeric-computation engine.
//!
//! This crate provides:
//!
//! - **[`EngineSession`]** -- the borrowed-handle seam: evaluate a statement,
//!   put and get named array variables, close.
//! - **[`NumericArray`]** -- the engine's native column-major array.
//! - **[`ImageCodec`]** / **[`DenseCodec`]** -- element-by-element conversion
//!   between [`sb_core::Image`] and [`NumericArray`].
//! - **Command text** ([`command`]) -- the exact statements sent to the engine.
//! - **[`EngineCall`]** -- per-call timeout bound.
//! - **[`EchoSession`]** -- a dry-run engine that records what it is told.

pub mod array;
pub mod call;
pub mod codec;
pub mod command;
pub mod echo;
pub mod session;

// ---- Re-exports for convenience ----

pub use array::{ArrayClass, ArrayData, NumericArray};
pub use call::EngineCall;
pub use codec::{DenseCodec, ImageCodec};
pub use command::{change_directory, InvocationCommand};
pub use echo::EchoSession;
pub use session::EngineSession;
