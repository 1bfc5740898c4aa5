//! Per-call timeout bound for engine round trips.

use std::future::Future;
use std::time::Duration;

/// Default engine call timeout: 5 minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Bounds the wall-clock time of individual engine calls.
///
/// # Example
///
/// ```no_run
/// use sb_engine::{EngineCall, EngineSession};
/// use std::time::Duration;
///
/// # async fn example(session: &mut dyn EngineSession) -> sb_core::Result<()> {
/// EngineCall::new(Some(Duration::from_secs(10)))
///     .run("eval_string", session.eval_string("x = 1"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCall {
    timeout: Option<Duration>,
}

impl Default for EngineCall {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TIMEOUT))
    }
}

impl EngineCall {
    /// `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Await `call`, failing with [`sb_core::Error::EngineTimeout`] if it does
    /// not finish within the bound.
    pub async fn run<T, F>(&self, operation: &str, call: F) -> sb_core::Result<T>
    where
        F: Future<Output = sb_core::Result<T>>,
    {
        let Some(limit) = self.timeout else {
            return call.await;
        };

        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_elapsed) => {
                tracing::error!("Engine call {operation} timed out after {limit:?}");
                Err(sb_core::Error::EngineTimeout {
                    operation: operation.to_string(),
                    timeout: limit,
                })
            }
        }
    }
}
