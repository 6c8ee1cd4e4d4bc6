pub mod error;
pub use self::error::{Error, Result};
pub mod link_graph;
pub use self::link_graph::LinkGraph;
mod common;
pub use self::common::*;

pub mod page_rank;

#[cfg(test)]
mod testkit;
