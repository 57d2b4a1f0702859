//! Memory-based node implementations.
//!
//! Nothing here is persisted: the tree lives as long as the [`FS`] that
//! owns its root.
//!
//! [`FS`]: crate::fs::FS

mod directory;

pub use directory::MemoryDirectory;

use std::sync::Arc;

use crate::node::NodeIdAllocator;

/// Filesystem with a fresh identity allocator, so the root is inode 1.
pub fn new_fs() -> super::FS {
    super::FS::new(Arc::new(NodeIdAllocator::new()))
}
