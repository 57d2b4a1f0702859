// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! FUSE transport for the synthetic directory tree.
//!
//! The kernel resolves paths one component at a time; each `lookup` lands
//! on the node it names and the answer is remembered in an inode table so
//! later `getattr`/`readdir` calls on that inode can be served.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

use diagnostics::debug;
use fuser::{
    FileAttr, FileType, Filesystem, MountOption, ReplyAttr, ReplyDirectory, ReplyEntry, Request,
    Session,
};
use mntfs::{EntryType, FS, NodeMetadata, NodeRef};
use tokio::runtime::Handle;

use crate::error::MountError;

/// Filesystem name and subtype shown in the mount table.
pub const FS_NAME: &str = "mntgen";

/// How long the kernel may cache attributes and entries.
const TTL: Duration = Duration::from_secs(1);

const BLOCK_SIZE: u32 = 512;

/// Serves an [`FS`] to the kernel.
pub struct MntgenFs {
    fs: FS,
    /// Every node the kernel has been told about, by inode.
    inodes: HashMap<u64, NodeRef>,
    runtime: Handle,
}

impl MntgenFs {
    /// `runtime` drives the async node operations from the FUSE thread.
    pub fn new(fs: FS, runtime: Handle) -> Self {
        let root = fs.root();
        let mut inodes = HashMap::new();
        inodes.insert(root.id().as_u64(), root);
        Self {
            fs,
            inodes,
            runtime,
        }
    }

    fn node(&self, ino: u64) -> Result<NodeRef, i32> {
        self.inodes.get(&ino).cloned().ok_or(libc::ENOENT)
    }

    /// Resolve `name` below `parent` and remember the result.
    fn lookup_entry(&mut self, parent: u64, name: &OsStr) -> Result<FileAttr, i32> {
        let name = name.to_str().ok_or(libc::ENOENT)?;
        let dir = self.node(parent)?;

        let child = self.runtime.block_on(dir.lookup(name)).map_err(|err| {
            let reason = err.to_string();
            debug!(
                "lookup of {name} in inode {parent} failed: {reason}",
                name: name,
                parent: parent,
                reason: reason
            );
            errno(&err)
        })?;

        let attr = to_file_attr(&child.attributes());
        self.inodes.entry(attr.ino).or_insert(child);
        Ok(attr)
    }

    fn attr(&self, ino: u64) -> Result<FileAttr, i32> {
        Ok(to_file_attr(&self.node(ino)?.attributes()))
    }

    /// Listing for `ino` including `.` and `..`.
    fn dir_entries(&self, ino: u64) -> Result<Vec<(u64, FileType, String)>, i32> {
        let dir = self.node(ino)?;
        let mut children = self
            .runtime
            .block_on(mntfs::read_dir(&dir))
            .map_err(|_| libc::EIO)?;
        // Identities only grow, so names created between two readdir calls
        // sort after every offset already handed out.
        children.sort_by_key(|e| e.id);

        // Only the root has children, so every parent is the root.
        let mut entries = vec![
            (ino, FileType::Directory, ".".to_string()),
            (self.fs.root().id().as_u64(), FileType::Directory, "..".to_string()),
        ];
        entries.extend(
            children
                .into_iter()
                .map(|e| (e.id.as_u64(), file_type(e.entry_type), e.name)),
        );
        Ok(entries)
    }
}

/// Map a lookup failure to the errno the kernel sees.
fn errno(err: &mntfs::Error) -> i32 {
    if err.is_not_found() {
        libc::ENOENT
    } else {
        libc::EINVAL
    }
}

fn file_type(entry_type: EntryType) -> FileType {
    if entry_type.is_directory() {
        FileType::Directory
    } else {
        FileType::RegularFile
    }
}

/// Convert node metadata to FUSE attributes.
pub fn to_file_attr(md: &NodeMetadata) -> FileAttr {
    FileAttr {
        ino: md.id.as_u64(),
        size: 0,
        blocks: 0,
        atime: md.accessed,
        mtime: md.modified,
        ctime: md.created,
        crtime: md.created,
        kind: file_type(md.entry_type),
        perm: md.permissions,
        nlink: md.nlink,
        uid: md.uid,
        gid: md.gid,
        rdev: 0,
        blksize: BLOCK_SIZE,
        flags: 0,
    }
}

impl Filesystem for MntgenFs {
    fn lookup(&mut self, _req: &Request, parent: u64, name: &OsStr, reply: ReplyEntry) {
        match self.lookup_entry(parent, name) {
            Ok(attr) => reply.entry(&TTL, &attr, 0),
            Err(errno) => reply.error(errno),
        }
    }

    fn getattr(&mut self, _req: &Request, ino: u64, reply: ReplyAttr) {
        match self.attr(ino) {
            Ok(attr) => reply.attr(&TTL, &attr),
            Err(errno) => reply.error(errno),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let entries = match self.dir_entries(ino) {
            Ok(entries) => entries,
            Err(errno) => {
                reply.error(errno);
                return;
            }
        };

        for (i, (e_ino, kind, name)) in entries.iter().enumerate().skip(offset as usize) {
            if reply.add(*e_ino, (i + 1) as i64, *kind, name) {
                break;
            }
        }
        reply.ok();
    }
}

/// Options every mount uses: named `mntgen`, visible to all users.
pub fn mount_options() -> Vec<MountOption> {
    vec![
        MountOption::FSName(FS_NAME.into()),
        MountOption::Subtype(FS_NAME.into()),
        MountOption::AllowOther,
    ]
}

/// Attach `fs` at `mountpoint`. Requests are not served until the
/// returned session is run.
pub fn mount(fs: MntgenFs, mountpoint: &Path) -> Result<Session<MntgenFs>, MountError> {
    Session::new(fs, mountpoint, &mount_options()).map_err(|source| MountError::Mount {
        mountpoint: mountpoint.to_path_buf(),
        source,
    })
}
