use std::ops::Deref;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use futures::stream::Stream;

use crate::dir::DirEntry;
use crate::error::Result;
use crate::metadata::NodeMetadata;

/// The root is the first node ever allocated. This is also the inode
/// number the kernel uses for the root of a FUSE mount.
pub const ROOT_ID: NodeID = NodeID(1);

/// Unique identifier for a node in the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeID(u64);

impl std::fmt::Display for NodeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeID {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == ROOT_ID
    }
}

/// Hands out node identities.
///
/// Values start at [`ROOT_ID`] and strictly increase; concurrent callers
/// never observe the same value. One allocator is shared by every node of
/// a filesystem.
#[derive(Debug)]
pub struct NodeIdAllocator {
    next: AtomicU64,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(ROOT_ID.0),
        }
    }

    pub fn next(&self) -> NodeID {
        NodeID(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for NodeIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream of directory entries returned by [`Node::entries`].
pub type EntryStream = Pin<Box<dyn Stream<Item = Result<DirEntry>> + Send>>;

/// Capabilities every node in the namespace exposes to the transport.
///
/// Directories are the only implementation today; a regular file node
/// would implement the same set and fail `lookup` like a leaf directory.
#[async_trait]
pub trait Node: Send + Sync {
    /// The path component this node was created under, empty for the root.
    fn name(&self) -> &str;

    /// Immutable metadata captured when the node was created.
    fn attributes(&self) -> NodeMetadata;

    fn id(&self) -> NodeID {
        self.attributes().id
    }

    /// Resolve a child by name.
    async fn lookup(&self, name: &str) -> Result<NodeRef>;

    /// Snapshot of the current children. Order is unspecified.
    async fn entries(&self) -> Result<EntryStream>;
}

/// Shared handle to a node.
#[derive(Clone)]
pub struct NodeRef(Arc<dyn Node>);

impl NodeRef {
    pub fn new(node: Arc<dyn Node>) -> Self {
        Self(node)
    }

    /// True when both handles point at the same allocation.
    pub fn same_node(&self, other: &NodeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for NodeRef {
    type Target = dyn Node;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for NodeRef {}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeRef({}, {:?})", self.id(), self.name())
    }
}
