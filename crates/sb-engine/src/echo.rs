//! Dry-run engine session.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::array::NumericArray;
use crate::session::EngineSession;

/// An in-process stand-in for a real engine.
///
/// Every statement is accepted and recorded but nothing is evaluated, so a
/// variable read back is exactly what was last stored. Useful for previewing
/// the commands a run would issue and for checking codec round trips.
#[derive(Debug, Default)]
pub struct EchoSession {
    variables: HashMap<String, NumericArray>,
    commands: Vec<String>,
    closed: bool,
}

impl EchoSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every statement passed to [`EngineSession::eval_string`], in order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self, operation: &str) -> sb_core::Result<()> {
        if self.closed {
            return Err(sb_core::Error::engine(operation, "session is closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl EngineSession for EchoSession {
    async fn eval_string(&mut self, command: &str) -> sb_core::Result<()> {
        self.ensure_open("eval_string")?;
        tracing::info!("[DRY RUN] Would evaluate: {command}");
        self.commands.push(command.to_string());
        Ok(())
    }

    async fn put_variable(&mut self, name: &str, value: NumericArray) -> sb_core::Result<()> {
        self.ensure_open("put_variable")?;
        tracing::debug!(
            "[DRY RUN] Storing {} {:?} array as '{name}'",
            value.class(),
            value.dims()
        );
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    async fn get_variable(&mut self, name: &str) -> sb_core::Result<Option<NumericArray>> {
        self.ensure_open("get_variable")?;
        Ok(self.variables.get(name).cloned())
    }

    async fn close(&mut self) -> sb_core::Result<()> {
        self.closed = true;
        self.variables.clear();
        Ok(())
    }
}
