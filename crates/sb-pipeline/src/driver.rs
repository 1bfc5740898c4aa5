//! Sequence driver: applies the script to every image of a sequence.

use sb_core::{Element, Error, Image, Result};
use sb_engine::{EngineSession, ImageCodec};

use crate::bridge::ScriptBridge;
use crate::context::RunContext;
use crate::params::format_parameters;
use crate::script::ScriptReference;

/// Runs a [`ScriptBridge`] over an image sequence.
///
/// The engine directory is set once per run and stays put for every image
/// of that run. Images are processed strictly in order, one engine round trip
/// at a time. Any failure aborts the run and discards the partial output.
///
/// At most one run may use a given engine session at a time; the `&mut`
/// borrow makes that the caller's obligation at compile time.
#[derive(Debug, Clone)]
pub struct SequenceDriver<C> {
    bridge: ScriptBridge<C>,
}

impl<C> SequenceDriver<C> {
    pub fn new(bridge: ScriptBridge<C>) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &ScriptBridge<C> {
        &self.bridge
    }

    /// Apply the script at `script_path` to every image, returning the results
    /// in input order.
    ///
    /// # Errors
    ///
    /// - [`Error::NullEngineHandle`] if `session` is `None` (no engine call
    ///   is made).
    /// - [`Error::InvalidConfiguration`] if the script path cannot be
    ///   resolved (no engine call is made).
    /// - [`Error::EngineDirectory`] if the engine rejects the directory
    ///   change; the session has been closed.
    /// - Any per-image error from [`ScriptBridge::apply`].
    pub async fn run<T>(
        &self,
        session: Option<&mut dyn EngineSession>,
        script_path: &str,
        parameters: &[String],
        images: &[Image<T>],
    ) -> Result<Vec<Image<T>>>
    where
        T: Element,
        C: ImageCodec<T>,
    {
        self.run_with(&RunContext::default(), session, script_path, parameters, images)
            .await
    }

    /// [`run`](Self::run) with cancellation and progress reporting.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus [`Error::Cancelled`] when the context's
    /// token is cancelled before the last image starts.
    pub async fn run_with<T>(
        &self,
        ctx: &RunContext,
        session: Option<&mut dyn EngineSession>,
        script_path: &str,
        parameters: &[String],
        images: &[Image<T>],
    ) -> Result<Vec<Image<T>>>
    where
        T: Element,
        C: ImageCodec<T>,
    {
        let session = session.ok_or(Error::NullEngineHandle)?;

        let script = ScriptReference::resolve(script_path)?;
        let arguments = format_parameters(parameters);
        let total = images.len();

        tracing::info!(
            "Applying '{}' ({} element) to {total} image(s)",
            script,
            T::KIND
        );

        self.bridge.change_directory(session, &script).await?;

        let mut output = Vec::with_capacity(total);
        for (index, image) in images.iter().enumerate() {
            if ctx.cancellation.is_cancelled() {
                tracing::info!("Run cancelled after {index} of {total} images");
                return Err(Error::Cancelled {
                    completed: index,
                    total,
                });
            }

            let result = self
                .bridge
                .apply(session, &script, &arguments, image)
                .await
                .map_err(|e| {
                    tracing::error!("Image {} of {total} failed: {e}", index + 1);
                    if e.session_lost() {
                        tracing::warn!("Engine session should not be reused after this error");
                    }
                    e
                })?;
            output.push(result);

            let pct = ((index + 1) as f32 / total as f32) * 100.0;
            let step = format!("image {}/{total}", index + 1);
            ctx.progress.send(pct, &step);
            tracing::debug!("[{pct:.0}%] Completed {step}");
        }

        ctx.progress.send(100.0, "Finalizing");
        Ok(output)
    }
}
