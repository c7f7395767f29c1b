//! Content nodes
//!
//! `ContentNode` is the common wrapper for everything that can appear in a content sequence:
//! the document root or a branch body.

use super::block::DirectiveBlock;
use serde::Serialize;

/// One line of content, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub text: String,
    /// 1-based source line
    pub line: usize,
}

impl Leaf {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum ContentNode {
    Leaf(Leaf),
    Block(DirectiveBlock),
}

impl ContentNode {
    pub fn node_type(&self) -> &'static str {
        match self {
            ContentNode::Leaf(_) => "Leaf",
            ContentNode::Block(_) => "Block",
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ContentNode::Leaf(leaf) => leaf.line,
            ContentNode::Block(block) => block.line(),
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            ContentNode::Leaf(leaf) => Some(leaf),
            ContentNode::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&DirectiveBlock> {
        match self {
            ContentNode::Block(block) => Some(block),
            ContentNode::Leaf(_) => None,
        }
    }
}

impl From<Leaf> for ContentNode {
    fn from(leaf: Leaf) -> Self {
        ContentNode::Leaf(leaf)
    }
}

impl From<DirectiveBlock> for ContentNode {
    fn from(block: DirectiveBlock) -> Self {
        ContentNode::Block(block)
    }
}
