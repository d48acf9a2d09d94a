//! Periodic reclamation of abandoned clarification offers.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender, bounded};
use log::{debug, info};

use crate::error::{HelpdeskError, Result};
use crate::session::sessions::ClarificationSessions;

/// A background thread that calls [`ClarificationSessions::sweep`] on a fixed interval.
///
/// The thread holds the sessions only through the shared handle and takes no
/// lock across sweeps, so foreground saves and resolves interleave freely.
/// Dropping the sweeper stops it.
#[derive(Debug)]
pub struct SessionSweeper {
    shutdown: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SessionSweeper {
    /// Spawn the sweeper thread.
    pub fn start(sessions: Arc<ClarificationSessions>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(HelpdeskError::session("sweep interval must be positive"));
        }

        let (shutdown, shutdown_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("clarification-sweeper".to_string())
            .spawn(move || {
                loop {
                    match shutdown_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let evicted = sessions.sweep();
                            debug!(
                                "sweep finished: {evicted} evicted, {} stored",
                                sessions.stored_count()
                            );
                        }
                        // Explicit stop or the handle was dropped.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        info!("clarification sweeper started (interval {interval:?})");

        Ok(Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    /// Whether the thread has been started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            info!("clarification sweeper stopped");
        }
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        self.stop();
    }
}
