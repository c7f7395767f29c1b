//! Treeviz formatter for directive trees
//!
//! One line per node, so a parsed document can be scanned top to bottom next to its source.
//! Nesting is drawn with box-drawing connectors, two columns per level.
//!
//! So the format is :
//! <linum?><prefix><connector> <icon> <label> (labels truncated to 30 characters)
//!
//! Example:
//!
//!     ⧉ Document
//!     ├─ ↵ before
//!     └─ ⋔ Block (2 branches)
//!       ├─ → if A && !B
//!       │ └─ ↵ a
//!       └─ → else
//!         └─ ↵ b
//!
//! Icons
//!     Document: ⧉
//!     Block: ⋔
//!     Branch: →
//!     Leaf: ↵

use crate::condtext::ast::{Branch, ContentNode, Document};

/// Node view used for rendering; lines are 1-based
struct Snapshot {
    node_type: &'static str,
    label: String,
    line: usize,
    children: Vec<Snapshot>,
}

impl Snapshot {
    fn from_node(node: &ContentNode) -> Self {
        match node {
            ContentNode::Leaf(leaf) => Snapshot {
                node_type: node.node_type(),
                label: leaf.text.clone(),
                line: leaf.line,
                children: Vec::new(),
            },
            ContentNode::Block(block) => {
                let count = block.branches().len();
                Snapshot {
                    node_type: node.node_type(),
                    label: format!(
                        "Block ({} {})",
                        count,
                        if count == 1 { "branch" } else { "branches" }
                    ),
                    line: block.line(),
                    children: block.branches().iter().map(Snapshot::from_branch).collect(),
                }
            }
        }
    }

    fn from_branch(branch: &Branch) -> Self {
        let label = match &branch.condition {
            Some(condition) => format!("{} {}", branch.kind, condition),
            None => branch.kind.to_string(),
        };
        Snapshot {
            node_type: "Branch",
            label,
            line: branch.line,
            children: branch.body.iter().map(Snapshot::from_node).collect(),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Block" => "⋔",
        "Branch" => "→",
        "Leaf" => "↵",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &Snapshot,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let linum_prefix = if show_linum {
        format!("{:02} ", snapshot.line)
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix,
        prefix,
        connector,
        get_icon(snapshot.node_type),
        truncate(&snapshot.label, 30)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i == child_count - 1, show_linum, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_linum(doc, false)
}

/// Render with the source line number in front of every node
pub fn to_treeviz_str_with_linum(doc: &Document, show_linum: bool) -> String {
    let mut output = format!("{} Document\n", get_icon("Document"));
    let children: Vec<Snapshot> = doc.content.iter().map(Snapshot::from_node).collect();
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_snapshot(child, "", i == child_count - 1, show_linum, &mut output);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condtext::building::build_document;
    use crate::condtext::lexing::split_statements;
    use insta::assert_snapshot;

    fn parse(source: &str) -> Document {
        build_document(split_statements(source).unwrap()).unwrap()
    }

    #[test]
    fn test_block_with_else() {
        let doc = parse("before\n/*#if A && !B*/\na\n/*#else*/\nb\n/*#endif*/");
        assert_snapshot!(to_treeviz_str(&doc), @r###"
        ⧉ Document
        ├─ ↵ before
        └─ ⋔ Block (2 branches)
          ├─ → if A && !B
          │ └─ ↵ a
          └─ → else
            └─ ↵ b
        "###);
    }

    #[test]
    fn test_nested_blocks_with_linum() {
        let doc = parse("<!--#if A-->\n<!--#if B || C-->\nx\n<!--#endif-->\ny\n<!--#endif-->");
        assert_snapshot!(to_treeviz_str_with_linum(&doc, true), @r###"
        ⧉ Document
        01 └─ ⋔ Block (1 branch)
        01   └─ → if A
        02     ├─ ⋔ Block (1 branch)
        02     │ └─ → if B || C
        03     │   └─ ↵ x
        05     └─ ↵ y
        "###);
    }

    #[test]
    fn test_long_leaves_are_truncated() {
        let doc = parse("a line that is clearly longer than thirty characters");
        assert_snapshot!(to_treeviz_str(&doc), @r###"
        ⧉ Document
        └─ ↵ a line that is clearly longer ...
        "###);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_treeviz_str(&Document::default()), "⧉ Document\n");
    }
}
