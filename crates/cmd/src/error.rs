// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Failures of the mount lifecycle.
///
/// `Unmount` is only ever logged; every other variant ends the process.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("Failed to mount {}: {source}", .mountpoint.display())]
    Mount {
        mountpoint: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serve error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Unmount failed: {0}")]
    Unmount(#[source] std::io::Error),

    #[error("Failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    #[error("Serve task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
