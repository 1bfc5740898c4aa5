//! Call-recording fake engine for unit tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sb_core::{Error, Image, Result};
use sb_engine::{ArrayData, EngineSession, NumericArray};

/// One call received by [`FakeSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Eval(String),
    Put(String),
    Get(String),
    Close,
}

/// Engine fake: evaluation is a no-op, so reads return what was stored.
#[derive(Debug, Default)]
pub struct FakeSession {
    pub calls: Vec<Call>,
    pub reject_cd: bool,
    /// Reject the invocation statement on these (zero-based) image indices.
    pub reject_eval_on: Vec<usize>,
    /// Drop the variable during a rejected evaluation.
    pub clear_on_reject: bool,
    /// Make the directory change hang for this long.
    pub cd_delay: Option<Duration>,
    /// Make every invocation statement hang for this long.
    pub eval_delay: Option<Duration>,
    /// Multiply every element by this factor during evaluation.
    pub scale: Option<f64>,
    pub evals: usize,
    pub variables: HashMap<String, NumericArray>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl EngineSession for FakeSession {
    async fn eval_string(&mut self, command: &str) -> Result<()> {
        self.calls.push(Call::Eval(command.to_string()));
        if command.starts_with("cd ") {
            if let Some(delay) = self.cd_delay {
                tokio::time::sleep(delay).await;
            }
            if self.reject_cd {
                return Err(Error::engine("eval_string", "cannot cd: no such directory"));
            }
            return Ok(());
        }

        let index = self.evals;
        self.evals += 1;
        if let Some(delay) = self.eval_delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_eval_on.contains(&index) {
            if self.clear_on_reject {
                self.variables.clear();
            }
            return Err(Error::engine("eval_string", "undefined function"));
        }
        if let Some(factor) = self.scale {
            for value in self.variables.values_mut() {
                let values = (0..value.numel())
                    .map(|i| value.data().value_f64(i) * factor)
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

/// Small distinct images: image `i` holds `i * 100 + offset`.
pub fn images(count: usize) -> Vec<Image<i32>> {
    (0..count)
        .map(|i| {
            let data = (0..6).map(|p| (i * 100 + p) as i32).collect();
            Image::from_vec(3, 2, 1, 1, data).unwrap()
        })
        .collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
