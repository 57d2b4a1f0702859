use std::path::{Component, Path};
use std::sync::Arc;

use crate::error::*;
use crate::memory::MemoryDirectory;
use crate::metadata::Owner;
use crate::node::*;

/// Main filesystem structure: owns the root directory for its lifetime.
#[derive(Clone)]
pub struct FS {
    root: NodeRef,
}

impl FS {
    /// Creates the root directory immediately, taking its identity from `ids`.
    /// Every node created later draws from the same allocator.
    pub fn new(ids: Arc<NodeIdAllocator>) -> Self {
        FS {
            root: MemoryDirectory::new_root(ids, Owner::current()),
        }
    }

    /// Returns the root directory. Always the same instance.
    pub fn root(&self) -> NodeRef {
        self.root.clone()
    }

    /// Walk `path` from the root one component at a time.
    pub async fn resolve<P: AsRef<Path>>(&self, path: P) -> Result<NodeRef> {
        let path = path.as_ref();
        let mut node = self.root();

        for component in path.components() {
            match component {
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir => return Err(Error::parent_path_invalid(path)),
                Component::Prefix(_) => return Err(Error::prefix_not_supported(path)),
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| Error::invalid_component(path))?;
                    node = node.lookup(name).await?;
                }
            }
        }

        Ok(node)
    }
}

impl std::fmt::Debug for FS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FS{{root: {}}}", self.root.id())
    }
}
