//! Document root

use super::content::ContentNode;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub content: Vec<ContentNode>,
}

impl Document {
    pub fn new(content: Vec<ContentNode>) -> Self {
        Self { content }
    }

    /// Number of directive blocks at any depth
    pub fn block_count(&self) -> usize {
        fn count(nodes: &[ContentNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    ContentNode::Leaf(_) => 0,
                    ContentNode::Block(block) => {
                        1 + block
                            .branches()
                            .iter()
                            .map(|branch| count(&branch.body))
                            .sum::<usize>()
                    }
                })
                .sum()
        }
        count(&self.content)
    }

    /// Deepest block nesting; 0 for a document without directives
    pub fn max_depth(&self) -> usize {
        fn depth(nodes: &[ContentNode]) -> usize {
            nodes
                .iter()
                .filter_map(ContentNode::as_block)
                .map(|block| {
                    1 + block
                        .branches()
                        .iter()
                        .map(|branch| depth(&branch.body))
                        .max()
                        .unwrap_or(0)
                })
                .max()
                .unwrap_or(0)
        }
        depth(&self.content)
    }
}
