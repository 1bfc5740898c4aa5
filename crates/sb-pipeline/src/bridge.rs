//! One engine round trip per image.
//!
//! The call sequence against the session is fixed: change directory (once per
//! run), then for every image inject, evaluate, retrieve. Every step fails
//! fast; nothing is retried.

use std::time::Duration;

use sb_core::config::{EngineConfig, EvaluationPolicy, DEFAULT_VARIABLE};
use sb_core::{Element, Error, Image, Result};
use sb_engine::{change_directory, EngineCall, EngineSession, ImageCodec, InvocationCommand};

use crate::script::ScriptReference;

/// Drives a borrowed engine session through the script call sequence.
///
/// Generic over the codec so the same bridge serves every element type the
/// codec implements [`ImageCodec`] for.
#[derive(Debug, Clone)]
pub struct ScriptBridge<C> {
    codec: C,
    variable: String,
    policy: EvaluationPolicy,
    call: EngineCall,
}

impl<C> ScriptBridge<C> {
    /// Create a bridge with the default variable (`img`), strict evaluation,
    /// and the default per-call timeout.
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            variable: DEFAULT_VARIABLE.to_string(),
            policy: EvaluationPolicy::default(),
            call: EngineCall::default(),
        }
    }

    /// Create a bridge from the `[engine]` section of the configuration.
    pub fn from_config(codec: C, config: &EngineConfig) -> Self {
        Self::new(codec)
            .with_variable(config.variable.clone())
            .with_policy(config.evaluation)
            .with_timeout(config.call_timeout())
    }

    /// Builder: inject the image under a different variable name.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Builder: set the evaluation failure policy.
    pub fn with_policy(mut self, policy: EvaluationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder: bound every engine call; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call = EngineCall::new(timeout);
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// The statement issued for every image of a run.
    pub fn command_for(&self, script: &ScriptReference, arguments: &str) -> String {
        InvocationCommand::new(&self.variable, script.callable(), arguments).to_string()
    }

    /// Change the engine's working directory to the script's directory.
    ///
    /// Issued exactly once per run, including for an empty directory, which
    /// the engine receives as a bare `cd `.
    ///
    /// # Errors
    ///
    /// If the engine rejects the change the session is closed (best effort)
    /// and [`Error::EngineDirectory`] is returned. A timeout surfaces as
    /// [`Error::EngineTimeout`] without closing.
    pub async fn change_directory(
        &self,
        session: &mut dyn EngineSession,
        script: &ScriptReference,
    ) -> Result<()> {
        let directory = script.directory();
        if directory.is_empty() {
            tracing::debug!(
                "Script '{}' has no directory component; issuing a bare cd",
                script.callable()
            );
        }

        let command = change_directory(directory);
        tracing::debug!("Changing engine directory: {command}");

        match self.call.run("cd", session.eval_string(&command)).await {
            Ok(()) => Ok(()),
            Err(e @ Error::EngineTimeout { .. }) => Err(e),
            Err(e) => {
                tracing::error!("Engine failed to change into directory {directory}: {e}");
                if let Err(close_err) = self.call.run("close", session.close()).await {
                    tracing::warn!("Failed to close engine session: {close_err}");
                }
                Err(Error::EngineDirectory {
                    directory: directory.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Run the script on one image: inject, evaluate, retrieve.
    ///
    /// Assumes the engine is already in the script's directory.
    ///
    /// # Errors
    ///
    /// - [`Error::Conversion`] if the image cannot be converted, the result
    ///   variable is missing, or the result cannot be converted back.
    /// - [`Error::Evaluation`] if evaluation fails under
    ///   [`EvaluationPolicy::Strict`].
    /// - [`Error::EngineTimeout`] / [`Error::Engine`] from the session calls.
    pub async fn apply<T>(
        &self,
        session: &mut dyn EngineSession,
        script: &ScriptReference,
        arguments: &str,
        image: &Image<T>,
    ) -> Result<Image<T>>
    where
        T: Element,
        C: ImageCodec<T>,
    {
        let array = self.codec.to_array(image)?;
        self.call
            .run("put_variable", session.put_variable(&self.variable, array))
            .await?;

        let command = self.command_for(script, arguments);
        tracing::info!("Executing the following command in the engine: \"{command}\"");

        match self.call.run("eval_string", session.eval_string(&command)).await {
            Ok(()) => {}
            Err(e @ Error::EngineTimeout { .. }) => return Err(e),
            Err(e) => match self.policy {
                EvaluationPolicy::Strict => {
                    return Err(Error::evaluation(command, e.to_string()));
                }
                EvaluationPolicy::BestEffort => {
                    tracing::warn!("Ignoring failed evaluation of \"{command}\": {e}");
                }
            },
        }

        let result = self
            .call
            .run("get_variable", session.get_variable(&self.variable))
            .await?
            .ok_or_else(|| {
                Error::conversion(format!(
                    "engine has no variable '{}' after \"{command}\"",
                    self.variable
                ))
            })?;

        self.codec.from_array(&result).map_err(|e| match e {
            Error::Conversion(message) => {
                Error::conversion(format!("result of \"{command}\": {message}"))
            }
            other => other,
        })
    }

    /// Full call sequence for a single image: directory change, then
    /// [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// [`Error::NullEngineHandle`] before any engine call if `session` is
    /// `None`; otherwise as [`change_directory`](Self::change_directory) and
    /// [`apply`](Self::apply).
    pub async fn invoke_on_image<T>(
        &self,
        session: Option<&mut dyn EngineSession>,
        script: &ScriptReference,
        arguments: &str,
        image: &Image<T>,
    ) -> Result<Image<T>>
    where
        T: Element,
        C: ImageCodec<T>,
    {
        let session = session.ok_or(Error::NullEngineHandle)?;
        self.change_directory(session, script).await?;
        self.apply(session, script, arguments, image).await
    }
}
