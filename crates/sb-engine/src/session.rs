//! The [`EngineSession`] trait: a borrowed handle to a live engine process.
//!
//! The bridge never creates or destroys a session. Callers hand it a
//! `&mut dyn EngineSession` for the duration of one run; exclusive access for
//! that run is a precondition, and `&mut` is what enforces it.

use async_trait::async_trait;

use crate::array::NumericArray;

/// A live session with an external numeric-computation engine.
///
/// Every method is a blocking round trip from the caller's point of view:
/// the bridge awaits each call before issuing the next one.
#[async_trait]
pub trait EngineSession: Send {
    /// Evaluate one statement in the engine.
    ///
    /// Returns `Err` when the engine reports a non-success status for the
    /// statement or the call itself fails.
    async fn eval_string(&mut self, command: &str) -> sb_core::Result<()>;

    /// Store `value` in the engine workspace under `name`.
    async fn put_variable(&mut self, name: &str, value: NumericArray) -> sb_core::Result<()>;

    /// Read the variable `name` back, or `None` if the engine has no such
    /// variable.
    async fn get_variable(&mut self, name: &str) -> sb_core::Result<Option<NumericArray>>;

    /// Ask the engine to shut the session down.
    ///
    /// The bridge only calls this after a rejected directory change, and
    /// treats failure as non-fatal.
    async fn close(&mut self) -> sb_core::Result<()>;
}
