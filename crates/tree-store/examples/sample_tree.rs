//! Builds the sample eight-item tree and prints the answers to each query
//!
//! Usage:
//!   cargo run -p tree-store --example sample_tree

use std::collections::HashMap;
use tree_store::prelude::*;

fn sample() -> Vec<TreeItem> {
    vec![
        TreeItem::root(1),
        TreeItem::new(2, 1).with_kind("test"),
        TreeItem::new(3, 1).with_kind("test"),
        TreeItem::new(4, 2).with_kind("test"),
        TreeItem::new(5, 2).with_kind("test"),
        TreeItem::new(6, 2).with_kind("test"),
        TreeItem::new(7, 4),
        TreeItem::new(8, 4),
    ]
}

fn ids(items: &[&TreeItem]) -> String {
    items
        .iter()
        .map(|item| item.id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() {
    let store = TreeStore::new(sample());

    println!("all:              {}", ids(&store.get_all().iter().collect::<Vec<_>>()));
    match store.get_item(&5.into()) {
        Ok(item) => println!("item 5:           {:?}", item),
        Err(e) => eprintln!("item 5:           {}", e),
    }
    println!("children of 4:    [{}]", ids(&store.get_children(&4.into())));
    println!("descendants of 1: [{}]", ids(&store.get_all_children(&1.into())));
    match store.get_all_parents(&7.into()) {
        Ok(parents) => println!("ancestors of 7:   [{}]", ids(&parents)),
        Err(e) => eprintln!("ancestors of 7:   {}", e),
    }

    println!();
    let mut depths: HashMap<&ItemId, usize> = HashMap::new();
    for root in store.roots() {
        println!("{}", root.id);
        depths.insert(&root.id, 0);
        for item in store.walk_from(&root.id, TraversalOrder::PreOrder) {
            let depth = item
                .parent
                .item()
                .and_then(|parent| depths.get(parent))
                .map_or(1, |depth| depth + 1);
            depths.insert(&item.id, depth);
            println!("{:indent$}{}", "", item.id, indent = depth * 2);
        }
    }
}
