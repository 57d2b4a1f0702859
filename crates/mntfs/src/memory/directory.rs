use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use diagnostics::debug;
use futures::stream;
use tokio::sync::RwLock;

use crate::dir::DirEntry;
use crate::error::{Error, Result};
use crate::metadata::{NodeMetadata, Owner};
use crate::node::{EntryStream, Node, NodeIdAllocator, NodeRef};

/// A directory that exists only in memory.
///
/// The root variant creates a leaf child the first time a name is looked
/// up and keeps it forever. Leaves never have children.
pub struct MemoryDirectory {
    name: String,
    metadata: NodeMetadata,
    kind: Kind,
}

enum Kind {
    Root {
        children: RwLock<HashMap<String, NodeRef>>,
        ids: Arc<NodeIdAllocator>,
        owner: Owner,
    },
    Leaf,
}

impl MemoryDirectory {
    /// Create the root directory, taking the next identity from `ids`.
    pub fn new_root(ids: Arc<NodeIdAllocator>, owner: Owner) -> NodeRef {
        let metadata = NodeMetadata::directory(ids.next(), owner);
        NodeRef::new(Arc::new(MemoryDirectory {
            name: String::new(),
            metadata,
            kind: Kind::Root {
                children: RwLock::new(HashMap::new()),
                ids,
                owner,
            },
        }))
    }

    fn new_leaf(name: &str, metadata: NodeMetadata) -> NodeRef {
        NodeRef::new(Arc::new(MemoryDirectory {
            name: name.to_string(),
            metadata,
            kind: Kind::Leaf,
        }))
    }
}

#[async_trait]
impl Node for MemoryDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> NodeMetadata {
        self.metadata.clone()
    }

    async fn lookup(&self, name: &str) -> Result<NodeRef> {
        let Kind::Root {
            children,
            ids,
            owner,
        } = &self.kind
        else {
            return Err(Error::not_found(Path::new("/").join(&self.name).join(name)));
        };

        if let Some(child) = children.read().await.get(name) {
            return Ok(child.clone());
        }

        // Another lookup may have inserted the name between the two locks.
        let mut children = children.write().await;
        match children.entry(name.to_string()) {
            Entry::Occupied(e) => Ok(e.get().clone()),
            Entry::Vacant(e) => {
                let metadata = NodeMetadata::directory(ids.next(), *owner);
                let id = metadata.id.as_u64();
                let child = e.insert(MemoryDirectory::new_leaf(name, metadata)).clone();
                debug!("created directory {name} with inode {id}", name: name, id: id);
                Ok(child)
            }
        }
    }

    async fn entries(&self) -> Result<EntryStream> {
        match &self.kind {
            Kind::Root { children, .. } => {
                let items: Vec<Result<DirEntry>> = children
                    .read()
                    .await
                    .values()
                    .map(|child| Ok(DirEntry::for_node(child)))
                    .collect();
                Ok(Box::pin(stream::iter(items)))
            }
            Kind::Leaf => Ok(Box::pin(stream::empty::<Result<DirEntry>>())),
        }
    }
}
