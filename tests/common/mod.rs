//! Shared engine fake for integration tests.
//!
//! [`RecordingSession`] keeps variables in a map and records every call it
//! receives, so tests can assert on the exact sequence the bridge issues.

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use sb_core::{Error, Image, Result};
use sb_engine::{ArrayData, EngineSession, NumericArray};

/// One call received by [`RecordingSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Eval(String),
    Put(String),
    Get(String),
    Close,
}

/// In-memory engine. Invocation statements apply `transform` to every
/// element of every stored variable; `cd` statements are accepted unless
/// `reject_cd` is set.
#[derive(Default)]
pub struct RecordingSession {
    pub calls: Vec<Call>,
    pub reject_cd: bool,
    /// Fail the invocation statement with this zero-based index.
    pub fail_eval_at: Option<usize>,
    pub transform: Option<fn(f64) -> f64>,
    evals: usize,
    variables: HashMap<String, NumericArray>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that rejects every directory change.
    pub fn rejecting_cd() -> Self {
        Self {
            reject_cd: true,
            ..Self::default()
        }
    }

    /// A session that fails the invocation statement with index `index`.
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_eval_at: Some(index),
            ..Self::default()
        }
    }

    /// A session whose script doubles every element.
    pub fn doubling() -> Self {
        Self {
            transform: Some(|v| v * 2.0),
            ..Self::default()
        }
    }

    pub fn evals(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Eval(cmd) => Some(cmd.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn closes(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Close).count()
    }
}

#[async_trait]
impl EngineSession for RecordingSession {
    async fn eval_string(&mut self, command: &str) -> Result<()> {
        self.calls.push(Call::Eval(command.to_string()));
        if command.starts_with("cd ") {
            if self.reject_cd {
                return Err(Error::engine("eval_string", "Cannot CD to directory"));
            }
            return Ok(());
        }

        let index = self.evals;
        self.evals += 1;
        if self.fail_eval_at == Some(index) {
            return Err(Error::engine("eval_string", "Undefined function"));
        }

        if let Some(transform) = self.transform {
            for value in self.variables.values_mut() {
                let values = (0..value.numel())
                    .map(|i| transform(value.data().value_f64(i)))
                    .collect();
                *value = NumericArray::new(value.dims().to_vec(), ArrayData::Double(values))?;
            }
        }
        Ok(())
    }

    async fn put_variable(&mut self, name: &str, value: NumericArray) -> Result<()> {
        self.calls.push(Call::Put(name.to_string()));
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    async fn get_variable(&mut self, name: &str) -> Result<Option<NumericArray>> {
        self.calls.push(Call::Get(name.to_string()));
        Ok(self.variables.get(name).cloned())
    }

    async fn close(&mut self) -> Result<()> {
        self.calls.push(Call::Close);
        Ok(())
    }
}

/// A `width` x `height` gray image whose pixels count up from `start`.
pub fn ramp<T: sb_core::Element>(width: usize, height: usize, start: f64) -> Image<T> {
    let data = (0..width * height)
        .map(|i| T::from_f64(start + i as f64))
        .collect();
    Image::from_vec(width, height, 1, 1, data).unwrap()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
