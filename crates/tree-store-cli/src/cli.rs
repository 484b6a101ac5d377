//! Command line parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tree_store::{ItemId, TraversalOrder};

/// Query a flat list of parent-linked records
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tree-store", version)]
#[command(after_help = "Numeric ids are looked up as integers; anything else as a string.")]
pub struct Args {
    /// JSON file holding the records
    pub file: PathBuf,

    /// Query to run (defaults to `all`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// JSON file with store options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reject malformed input (overrides the config file)
    #[arg(long, global = true)]
    pub strict: bool,

    /// Walk order for descendants
    #[arg(long, value_enum, default_value_t = Order::Siblings, global = true)]
    pub order: Order,
}

impl Args {
    /// The query to run, `all` when none was given
    pub fn query(&self) -> Command {
        self.command.clone().unwrap_or(Command::All)
    }
}

/// The query to run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every record in input order
    All,
    /// Print one record
    Item { id: ItemId },
    /// Print the direct children of a record
    Children { id: ItemId },
    /// Print every descendant of a record
    Descendants { id: ItemId },
    /// Print the ancestor chain, nearest parent first
    Ancestors { id: ItemId },
    /// Print the top-level records
    Roots,
    /// Print the whole hierarchy, indented
    Outline,
    /// Report duplicate ids, dangling parents and cycles
    Check,
}

/// Walk order accepted by `--order`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Children first, then each child's descendants
    Siblings,
    /// Node before its subtree
    #[value(alias = "preorder")]
    Pre,
    /// Subtree before its node
    #[value(alias = "postorder")]
    Post,
    /// Level by level
    #[value(alias = "breadth")]
    Bfs,
}

impl From<Order> for TraversalOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Siblings => TraversalOrder::SiblingsFirst,
            Order::Pre => TraversalOrder::PreOrder,
            Order::Post => TraversalOrder::PostOrder,
            Order::Bfs => TraversalOrder::BreadthFirst,
        }
    }
}
