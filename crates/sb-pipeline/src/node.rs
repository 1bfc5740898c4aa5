//! The script-caller pipeline node.

use sb_core::config::BridgeConfig;
use sb_core::{Element, Image, Result};
use sb_engine::{DenseCodec, EngineSession, ImageCodec};

use crate::bridge::ScriptBridge;
use crate::driver::SequenceDriver;

/// Pipeline node that applies an engine script to an image list.
///
/// The node owns its parameters (`function_file`, `function_params`) and its
/// output slot. The image list and the engine handle arrive as inputs on each
/// [`execute`](Self::execute); the handle stays owned by whoever created it.
#[derive(Debug, Clone)]
pub struct ScriptNode<T, C = DenseCodec> {
    name: String,
    /// Full path to the script file.
    pub function_file: String,
    /// Literal trailing arguments for the script.
    pub function_params: Vec<String>,
    driver: SequenceDriver<C>,
    img_out: Option<Vec<Image<T>>>,
}

impl<T: Element> ScriptNode<T, DenseCodec> {
    /// Build a node from configuration, using the dense codec.
    pub fn from_config(name: impl Into<String>, config: &BridgeConfig) -> Self {
        let bridge = ScriptBridge::from_config(DenseCodec, &config.engine);
        let mut node = Self::new(name, SequenceDriver::new(bridge));
        node.function_file = config.script.path.clone();
        node.function_params = config.script.params.clone();
        node
    }
}

impl<T, C> ScriptNode<T, C>
where
    T: Element,
    C: ImageCodec<T>,
{
    /// Class name the node registers under.
    pub const TYPE_NAME: &'static str = "ScriptCaller";

    /// Create a node with no script selected.
    pub fn new(name: impl Into<String>, driver: SequenceDriver<C>) -> Self {
        Self {
            name: name.into(),
            function_file: String::new(),
            function_params: Vec::new(),
            driver,
            img_out: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output slot; `None` until a run has succeeded.
    pub fn img_out(&self) -> Option<&[Image<T>]> {
        self.img_out.as_deref()
    }

    /// Run the script over `img_in` and fill the output slot.
    ///
    /// On failure the output slot is left empty; a partial result is never
    /// published.
    pub async fn execute(
        &mut self,
        engine: Option<&mut dyn EngineSession>,
        img_in: &[Image<T>],
    ) -> Result<&[Image<T>]> {
        self.img_out = None;
        tracing::info!("[{}] {} executing", self.name, Self::TYPE_NAME);

        let out = self
            .driver
            .run(engine, &self.function_file, &self.function_params, img_in)
            .await?;

        Ok(self.img_out.insert(out).as_slice())
    }
}
