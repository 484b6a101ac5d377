//! Text output for query results

use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Write;
use tree_store::{ItemId, TraversalOrder, TreeItem, TreeStore, ValidationReport};

/// One JSON object per line
pub fn json_lines<'a>(items: impl IntoIterator<Item = &'a TreeItem>) -> Result<String> {
    let mut out = String::new();
    for item in items {
        out.push_str(&serde_json::to_string(item)?);
        out.push('\n');
    }
    Ok(out)
}

/// The hierarchy below the root sentinel, two spaces per level
pub fn outline(store: &TreeStore) -> String {
    let mut out = String::new();
    // Pre-order reaches a parent before its children, so its depth is known
    let mut depths: HashMap<&ItemId, usize> = HashMap::new();
    for root in store.roots() {
        push_line(&mut out, root, 0);
        depths.insert(&root.id, 0);
        for item in store.walk_from(&root.id, TraversalOrder::PreOrder) {
            let depth = item
                .parent
                .item()
                .and_then(|parent| depths.get(parent))
                .map_or(1, |depth| depth + 1);
            depths.insert(&item.id, depth);
            push_line(&mut out, item, depth);
        }
    }
    out
}

fn push_line(out: &mut String, item: &TreeItem, depth: usize) {
    let _ = write!(out, "{:indent$}{}", "", item.id, indent = depth * 2);
    if let Some(kind) = &item.kind {
        let _ = write!(out, " ({})", kind);
    }
    out.push('\n');
}

/// One issue per line, or a single "ok" line
pub fn report(report: &ValidationReport) -> String {
    if report.is_ok() {
        return "ok\n".to_string();
    }
    report
        .issues()
        .iter()
        .map(|issue| format!("{}\n", issue))
        .collect()
}
