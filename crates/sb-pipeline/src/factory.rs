//! Node factory: construct a [`ScriptNode`] for an element type chosen at
//! runtime.

use sb_core::config::BridgeConfig;
use sb_core::{ElementKind, Error, Image, Result};
use sb_engine::EngineSession;

use crate::node::ScriptNode;

/// An image list of any supported element type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyImageList {
    Int(Vec<Image<i32>>),
    Float(Vec<Image<f32>>),
    Double(Vec<Image<f64>>),
}

impl AnyImageList {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Int(_) => ElementKind::Int,
            Self::Float(_) => ElementKind::Float,
            Self::Double(_) => ElementKind::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`ScriptNode`] of any supported element type.
#[derive(Debug, Clone)]
pub enum AnyScriptNode {
    Int(ScriptNode<i32>),
    Float(ScriptNode<f32>),
    Double(ScriptNode<f64>),
}

impl AnyScriptNode {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Int(_) => ElementKind::Int,
            Self::Float(_) => ElementKind::Float,
            Self::Double(_) => ElementKind::Double,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Int(node) => node.name(),
            Self::Float(node) => node.name(),
            Self::Double(node) => node.name(),
        }
    }

    /// Run the node on `input`, which must match the node's element type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] on an element type mismatch,
    /// otherwise whatever [`ScriptNode::execute`] returns.
    pub async fn execute(
        &mut self,
        engine: Option<&mut dyn EngineSession>,
        input: &AnyImageList,
    ) -> Result<AnyImageList> {
        match (self, input) {
            (Self::Int(node), AnyImageList::Int(images)) => node
                .execute(engine, images)
                .await
                .map(|out| AnyImageList::Int(out.to_vec())),
            (Self::Float(node), AnyImageList::Float(images)) => node
                .execute(engine, images)
                .await
                .map(|out| AnyImageList::Float(out.to_vec())),
            (Self::Double(node), AnyImageList::Double(images)) => node
                .execute(engine, images)
                .await
                .map(|out| AnyImageList::Double(out.to_vec())),
            (node, input) => Err(Error::invalid_config(format!(
                "node '{}' processes {} images but received {} images",
                node.name(),
                node.kind(),
                input.kind()
            ))),
        }
    }
}

/// Create a script node for `kind`, configured from `config`.
pub fn create_node(name: &str, kind: ElementKind, config: &BridgeConfig) -> AnyScriptNode {
    tracing::debug!("Creating {} node '{name}' for {kind} images", ScriptNode::<i32>::TYPE_NAME);
    match kind {
        ElementKind::Int => AnyScriptNode::Int(ScriptNode::from_config(name, config)),
        ElementKind::Float => AnyScriptNode::Float(ScriptNode::from_config(name, config)),
        ElementKind::Double => AnyScriptNode::Double(ScriptNode::from_config(name, config)),
    }
}
