//! Tag serializer: a compact single-line rendering of a tree
//!
//! `x = 5` renders as
//! `{type: Assign, value: -1, children: [{type: Symbol, value: 0, symbol: "x"}, {type: Number, value: 5}]}`

use crate::goon::ast::TreeSnapshot;

pub fn to_tag_str(snapshot: &TreeSnapshot) -> String {
    let mut out = String::new();
    write_tag(snapshot, &mut out);
    out
}

fn write_tag(snapshot: &TreeSnapshot, out: &mut String) {
    out.push_str(&format!(
        "{{type: {}, value: {}",
        snapshot.node_type, snapshot.value
    ));
    if let Some(symbol) = &snapshot.symbol {
        out.push_str(&format!(", symbol: {:?}", symbol));
    }
    if !snapshot.children.is_empty() {
        out.push_str(", children: [");
        for (i, child) in snapshot.children.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_tag(child, out);
        }
        out.push(']');
    }
    out.push('}');
}
