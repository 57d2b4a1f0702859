// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Unmount on SIGINT/SIGTERM.

use diagnostics::{info, warn};
use futures::stream::{Stream, StreamExt};
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;

use crate::error::MountError;

/// Something that can detach a mounted filesystem.
///
/// Calling it again after a successful unmount must be harmless.
pub trait Unmount: Send {
    fn unmount(&mut self) -> std::io::Result<()>;
}

impl Unmount for fuser::SessionUnmounter {
    fn unmount(&mut self) -> std::io::Result<()> {
        fuser::SessionUnmounter::unmount(self)
    }
}

/// One item per SIGINT or SIGTERM received.
///
/// Handlers are installed when this is called, not when the stream is
/// first polled.
pub fn stop_signals() -> Result<impl Stream<Item = ()> + Send + 'static, MountError> {
    let mut interrupt = signal(SignalKind::interrupt()).map_err(MountError::Signal)?;
    let mut terminate = signal(SignalKind::terminate()).map_err(MountError::Signal)?;

    Ok(async_stream::stream! {
        loop {
            let received = tokio::select! {
                r = interrupt.recv() => r,
                r = terminate.recv() => r,
            };
            match received {
                Some(()) => yield (),
                None => break,
            }
        }
    })
}

/// Unmount each time `signals` yields, until `cancel` fires or the stream
/// ends. A failed unmount is logged and the listener keeps waiting.
///
/// Returns the number of unmount requests issued.
pub async fn listen<S, U>(signals: S, mut unmounter: U, cancel: CancellationToken) -> usize
where
    S: Stream<Item = ()>,
    U: Unmount,
{
    let mut signals = std::pin::pin!(signals);
    let mut requests = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            next = signals.next() => {
                if next.is_none() {
                    break;
                }
                requests += 1;
                info!("stop signal received, unmounting");
                if let Err(e) = unmounter.unmount() {
                    let reason = MountError::Unmount(e).to_string();
                    warn!("{reason}", reason: reason);
                }
            }
        }
    }

    requests
}
