//! A synthetic directory tree for mount generators.
//!
//! Any name looked up directly below the root is created on first access as
//! an empty directory and kept for the life of the filesystem. Directories
//! below the root are leaves: looking anything up in them fails.
//!
//! ```ignore
//! let fs = mntfs::memory::new_fs();
//! let foo = fs.root().lookup("foo").await?;
//! assert_eq!(foo.id().as_u64(), 2);
//! ```

mod dir;
mod entry_type;
mod error;
mod fs;
pub mod memory;
mod metadata;
mod node;

pub use dir::{DirEntry, read_dir};
pub use entry_type::EntryType;
pub use error::{Error, Result};
pub use fs::FS;
pub use metadata::{DIRECTORY_NLINK, DIRECTORY_PERMISSIONS, NodeMetadata, Owner};
pub use node::{EntryStream, Node, NodeID, NodeIdAllocator, NodeRef, ROOT_ID};

#[cfg(test)]
mod tests;
