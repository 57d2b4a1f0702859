use futures::TryStreamExt;

use crate::EntryType;
use crate::error::Result;
use crate::node::{NodeID, NodeRef};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub id: NodeID,
    pub entry_type: EntryType,
    pub name: String,
}

impl DirEntry {
    /// Build the listing entry for a child node.
    pub fn for_node(node: &NodeRef) -> Self {
        let md = node.attributes();
        Self {
            id: md.id,
            entry_type: md.entry_type,
            name: node.name().to_string(),
        }
    }
}

/// Collect the entries of `node` into a vector.
pub async fn read_dir(node: &NodeRef) -> Result<Vec<DirEntry>> {
    node.entries().await?.try_collect().await
}
