//! Running a parsed command against a store

use anyhow::Result;
use log::info;
use tree_store::{TraversalOrder, TreeStore};

use crate::cli::Command;
use crate::render;

/// What to print and whether the command succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

pub fn execute(store: &TreeStore, command: &Command, order: TraversalOrder) -> Result<Outcome> {
    let output = match command {
        Command::All => render::json_lines(store.get_all())?,
        Command::Item { id } => render::json_lines([store.get_item(id)?])?,
        Command::Children { id } => render::json_lines(store.get_children(id))?,
        Command::Descendants { id } => render::json_lines(store.walk_from(id, order))?,
        Command::Ancestors { id } => render::json_lines(store.get_all_parents(id)?)?,
        Command::Roots => render::json_lines(store.roots())?,
        Command::Outline => render::outline(store),
        Command::Check => {
            let report = store.validate();
            info!("validation found {} issues", report.len());
            return Ok(Outcome {
                output: render::report(&report),
                success: report.is_ok(),
            });
        }
    };
    Ok(Outcome::ok(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tree_store::{ItemId, TreeItem, TreeStoreError};

    fn store() -> TreeStore {
        TreeStore::new(vec![
            TreeItem::root(1),
            TreeItem::new(2, 1),
            TreeItem::new(3, 1),
            TreeItem::new(4, 2),
        ])
    }

    fn run(command: Command) -> Result<Outcome> {
        execute(&store(), &command, TraversalOrder::PreOrder)
    }

    #[test]
    fn test_item() {
        let outcome = run(Command::Item { id: ItemId::from(4) }).unwrap();
        assert_eq!(outcome, Outcome::ok("{\"id\":4,\"parent\":2}\n".to_string()));
    }

    #[test]
    fn test_missing_item_is_an_error() {
        let err = run(Command::Item { id: ItemId::from(9) }).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TreeStoreError>(),
            Some(&TreeStoreError::NotFound(ItemId::from(9)))
        );
    }

    #[test]
    fn test_descendants_follow_order() {
        let pre = run(Command::Descendants { id: ItemId::from(1) }).unwrap().output;
        let post = execute(
            &store(),
            &Command::Descendants { id: ItemId::from(1) },
            TraversalOrder::PostOrder,
        )
        .unwrap()
        .output;

        let ids = |out: &str| -> Vec<String> {
            out.lines()
                .map(|line| line.split(',').next().unwrap_or("").to_string())
                .collect()
        };
        assert_eq!(ids(&pre), vec!["{\"id\":2", "{\"id\":4", "{\"id\":3"]);
        assert_eq!(ids(&post), vec!["{\"id\":4", "{\"id\":2", "{\"id\":3"]);
    }

    #[test]
    fn test_ancestors() {
        let outcome = run(Command::Ancestors { id: ItemId::from(4) }).unwrap();
        assert_eq!(
            outcome.output,
            "{\"id\":2,\"parent\":1}\n{\"id\":1,\"parent\":\"root\"}\n"
        );
    }

    #[test]
    fn test_check() {
        let outcome = run(Command::Check).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.output, "ok\n");

        let broken = TreeStore::new(vec![TreeItem::new(1, 1)]);
        let outcome = execute(&broken, &Command::Check, TraversalOrder::PreOrder).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.output, "item 1 is part of a parent cycle\n");
    }
}
