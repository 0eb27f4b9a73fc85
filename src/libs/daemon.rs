//! Process lifecycle for the watch command.
//!
//! The supervisor loop is blocking, so it runs on a dedicated blocking
//! thread while the async runtime listens for termination signals. A signal
//! closes the motion signal; the loop wakes, leaves, and releases its pins
//! before the blocking task finishes.

use crate::libs::messages::Message;
use crate::libs::monitor::Supervisor;
use crate::libs::signal::MotionSignal;
use crate::{msg_error, msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
use std::sync::Arc;

/// Runs `supervisor` until it stops on its own or a termination signal arrives.
pub async fn run_with_signal_handling(supervisor: Supervisor) -> Result<()> {
    spawn_signal_listener(supervisor.signal())?;

    let watcher = tokio::task::spawn_blocking(move || {
        let mut supervisor = supervisor;
        supervisor.run()
    });

    match watcher.await {
        Ok(Ok(())) => {
            msg_info!(Message::WatcherExitedNormally);
            Ok(())
        }
        Ok(Err(e)) => {
            msg_error!(Message::WatcherError(e.to_string()));
            Err(e.into())
        }
        Err(e) => {
            msg_error!(Message::WatcherTaskPanicked(e.to_string()));
            Err(msg_error_anyhow!(Message::WatcherTaskPanicked(e.to_string())))
        }
    }
}

#[cfg(unix)]
fn spawn_signal_listener(signal: Arc<MotionSignal>) -> Result<()> {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    let mut sigterm = unix_signal(SignalKind::terminate()).map_err(|_| msg_error_anyhow!(Message::FailedToCreateSigtermHandler))?;
    let mut sigint = unix_signal(SignalKind::interrupt()).map_err(|_| msg_error_anyhow!(Message::FailedToCreateSigintHandler))?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => {
                msg_info!(Message::WatcherReceivedSigterm);
            }
            _ = sigint.recv() => {
                msg_warning!(Message::WatcherReceivedSigint);
            }
        }
        msg_info!(Message::WatcherShuttingDown);
        signal.close();
    });
    Ok(())
}

#[cfg(windows)]
fn spawn_signal_listener(signal: Arc<MotionSignal>) -> Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                msg_warning!(Message::WatcherReceivedCtrlC);
            }
            Err(e) => {
                msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                return;
            }
        }
        msg_info!(Message::WatcherShuttingDown);
        signal.close();
    });
    Ok(())
}

#[cfg(not(any(unix, windows)))]
fn spawn_signal_listener(_signal: Arc<MotionSignal>) -> Result<()> {
    msg_warning!(Message::WatcherSignalHandlingNotSupported);
    Ok(())
}
