// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod error;
pub mod fuse;
pub mod unmount;

use std::path::Path;

use diagnostics::{info, warn};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

pub use error::MountError;

/// Mount path used when none is given on the command line
pub const DEFAULT_MOUNTPOINT: &str = "/n";

/// Mount a fresh tree at `mountpoint` and serve it until it is unmounted.
///
/// SIGINT and SIGTERM unmount the filesystem, which ends the serve loop and
/// makes this return `Ok(())`. Must be called inside a tokio runtime.
pub async fn run(mountpoint: &Path) -> Result<(), MountError> {
    let signals = unmount::stop_signals()?;

    let fs = fuse::MntgenFs::new(mntfs::memory::new_fs(), Handle::current());
    let mut session = fuse::mount(fs, mountpoint)?;
    let unmounter = session.unmount_callable();

    let mountpoint = mountpoint.display().to_string();
    info!("mounted {mountpoint}", mountpoint: mountpoint);

    let cancel = CancellationToken::new();
    let listener = tokio::spawn(unmount::listen(signals, unmounter, cancel.clone()));

    let served = tokio::task::spawn_blocking(move || session.run()).await?;

    cancel.cancel();
    if let Err(e) = listener.await {
        let reason = e.to_string();
        warn!("unmount listener failed: {reason}", reason: reason);
    }

    served.map_err(MountError::Serve)?;
    info!("unmounted {mountpoint}", mountpoint: mountpoint);
    Ok(())
}
