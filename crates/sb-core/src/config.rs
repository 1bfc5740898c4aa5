//! Bridge configuration types.
//!
//! The top-level [`BridgeConfig`] carries the script selection and the engine
//! call settings. Every section defaults sensibly so an empty document is
//! valid; the script path is the only thing a real run must supply.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::image::ElementKind;

/// Default per-call engine timeout, in seconds.
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 300;

/// Variable name the image is injected under.
pub const DEFAULT_VARIABLE: &str = "img";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub script: ScriptConfig,
    pub engine: EngineConfig,
}

impl BridgeConfig {
    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.script.path.is_empty() {
            warnings.push("script.path is empty; nothing can be invoked".into());
        } else if !self.script.path.ends_with(".m") {
            warnings.push(format!(
                "script.path '{}' does not end in '.m'; the last two characters are stripped regardless",
                self.script.path
            ));
        }

        for (i, param) in self.script.params.iter().enumerate() {
            if param.trim().is_empty() {
                warnings.push(format!("script.params[{i}] is blank"));
            }
        }

        let var = &self.engine.variable;
        let valid_identifier = var
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && var.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_identifier {
            warnings.push(format!(
                "engine.variable '{var}' is not a valid identifier"
            ));
        }

        if self.engine.call_timeout_secs == 0 {
            warnings.push("engine.call_timeout_secs is 0; engine calls may block forever".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Which script to run and what to pass it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Full path to the script file.
    pub path: String,
    /// Literal trailing arguments, passed verbatim.
    pub params: Vec<String>,
}

/// How the engine is driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Variable the image is injected under and read back from.
    pub variable: String,
    /// Upper bound for a single engine call. `0` disables the bound.
    pub call_timeout_secs: u64,
    /// What to do when evaluation reports failure.
    pub evaluation: EvaluationPolicy,
    /// Numeric element type of the processed images.
    pub element: ElementKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE.into(),
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            evaluation: EvaluationPolicy::default(),
            element: ElementKind::default(),
        }
    }
}

impl EngineConfig {
    /// The per-call bound, or `None` when disabled.
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.call_timeout_secs > 0).then(|| Duration::from_secs(self.call_timeout_secs))
    }
}

/// Handling of a failed script evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPolicy {
    /// A failed evaluation aborts the whole run with
    /// [`Error::Evaluation`](crate::Error::Evaluation).
    #[default]
    Strict,
    /// A failed evaluation is logged and the run continues; the failure
    /// only surfaces if the result variable cannot be read back or converted.
    BestEffort,
}
