//! Treeviz formatter for parse trees
//!
//! One line per node. Nesting is drawn with box connectors, two columns per level:
//!
//!     ≔ Assign
//!     ├─ ◦ Symbol total
//!     └─ + Add
//!       ├─ # Number 1
//!       └─ × Multiply
//!         ├─ # Number 2
//!         └─ # Number 3
//!
//! Icons
//!     Leaves:
//!         Number: #
//!         Boolean: ?
//!         Symbol: ◦
//!         Nil: ∅
//!     Statements and operators:
//!         Assign: ≔
//!         Add: +
//!         Subtract: −
//!         Multiply: ×
//!         Divide: ÷
//!         Compare: =
//!         InverseCompare: ≠

use crate::goon::ast::{NodeType, TreeSnapshot};

fn get_icon(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Number => "#",
        NodeType::Boolean => "?",
        NodeType::Symbol => "◦",
        NodeType::Nil => "∅",
        NodeType::Assign => "≔",
        NodeType::Add => "+",
        NodeType::Subtract => "−",
        NodeType::Multiply => "×",
        NodeType::Divide => "÷",
        NodeType::Compare => "=",
        NodeType::InverseCompare => "≠",
    }
}

fn format_snapshot(
    snapshot: &TreeSnapshot,
    prefix: &str,
    is_last: bool,
    show_values: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(snapshot.node_type),
        snapshot.label(show_values)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(snapshot, &child_prefix, show_values, output);
}

fn format_children(snapshot: &TreeSnapshot, prefix: &str, show_values: bool, output: &mut String) {
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, prefix, i == child_count - 1, show_values, output);
    }
}

/// Renders a snapshot as treeviz text, one node per line.
pub fn to_treeviz_str(snapshot: &TreeSnapshot, show_values: bool) -> String {
    let mut output = format!(
        "{} {}\n",
        get_icon(snapshot.node_type),
        snapshot.label(show_values)
    );
    format_children(snapshot, "", show_values, &mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goon::ast::snapshot_from_tree;
    use crate::goon::parsing::ParseSession;

    fn treeviz(source: &str, show_values: bool) -> String {
        let tree = ParseSession::new().parse_str(source).unwrap();
        to_treeviz_str(&snapshot_from_tree(&tree), show_values)
    }

    #[test]
    fn test_single_leaf() {
        assert_eq!(treeviz("42", true), "# Number 42\n");
        assert_eq!(treeviz("nil", true), "∅ Nil\n");
    }

    #[test]
    fn test_nested_tree() {
        insta::assert_snapshot!(treeviz("total = 1 + 2 * 3", true), @r"
        ≔ Assign
        ├─ ◦ Symbol total
        └─ + Add
          ├─ # Number 1
          └─ × Multiply
            ├─ # Number 2
            └─ # Number 3
        ");
    }

    #[test]
    fn test_inner_branch_draws_rail() {
        insta::assert_snapshot!(treeviz("(a != b) == false", false), @r"
        = Compare
        ├─ ≠ InverseCompare
        │ ├─ ◦ Symbol
        │ └─ ◦ Symbol
        └─ ? Boolean
        ");
    }
}
