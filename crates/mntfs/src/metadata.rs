// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::time::SystemTime;

use crate::EntryType;
use crate::node::NodeID;

/// rwxr-xr-x
pub const DIRECTORY_PERMISSIONS: u16 = 0o755;

/// `.` plus the entry in the parent.
pub const DIRECTORY_NLINK: u32 = 2;

/// User and group that own every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub uid: u32,
    pub gid: u32,
}

impl Owner {
    /// The real user and group of the running process.
    pub fn current() -> Self {
        // SAFETY: getuid(2) and getgid(2) take no arguments and always succeed.
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Self { uid, gid }
    }
}

/// Metadata snapshot for a node, taken once at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMetadata {
    pub id: NodeID,

    pub entry_type: EntryType,

    /// Permission bits without the file type
    pub permissions: u16,

    pub nlink: u32,

    pub uid: u32,
    pub gid: u32,

    pub created: SystemTime,
    pub modified: SystemTime,
    pub accessed: SystemTime,
}

impl NodeMetadata {
    /// Directory metadata with all three timestamps set to now.
    pub fn directory(id: NodeID, owner: Owner) -> Self {
        let now = SystemTime::now();
        Self {
            id,
            entry_type: EntryType::Directory,
            permissions: DIRECTORY_PERMISSIONS,
            nlink: DIRECTORY_NLINK,
            uid: owner.uid,
            gid: owner.gid,
            created: now,
            modified: now,
            accessed: now,
        }
    }
}
