// crates/clipcut-media/src/worker.rs
//
// MediaWorker: owns the export thread and the channel its events come back
// on. All public API that clipcut-ui calls for background work lives here.
//
// One export at a time. A second `start_export` while the first thread is
// still alive is rejected with `MediaError::ExportBusy`; the UI disables its
// Export button in that window, so this is the backstop rather than the
// common path.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};
use uuid::Uuid;

use clipcut_core::media_types::ExportEvent;

use crate::error::{MediaError, Result};
use crate::export::{export, ExportJob};

// ── Internal types ────────────────────────────────────────────────────────────

struct ExportHandle {
    job_id: Uuid,
    thread: JoinHandle<()>,
}

// ── MediaWorker ───────────────────────────────────────────────────────────────

pub struct MediaWorker {
    /// Export progress and completion. Drained by the UI once per frame.
    pub rx:   Receiver<ExportEvent>,
    tx:       Sender<ExportEvent>,
    active:   Option<ExportHandle>,
    shutdown: Arc<AtomicBool>,
}

impl Default for MediaWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaWorker {
    pub fn new() -> Self {
        // Unbounded: an export emits at most ~102 events.
        let (tx, rx) = unbounded();
        Self {
            rx,
            tx,
            active:   None,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn a thread that exports `job`. Returns the job id its events will
    /// carry.
    pub fn start_export(&mut self, job: ExportJob) -> Result<Uuid> {
        let job_id = job.job_id;
        self.spawn_job(job_id, move |shutdown, tx| export(job, shutdown, tx))
    }

    /// True while an export thread is still running.
    pub fn is_exporting(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.thread.is_finished())
    }

    /// Stop the export thread after its current frame and wait for it, so
    /// its partial output is removed before the process exits. It reports
    /// `ExportEvent::Failed` on the way out.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(h) = self.active.take() {
            debug!(job_id = %h.job_id, "shutdown: joining export thread");
            if h.thread.join().is_err() {
                warn!(job_id = %h.job_id, "export thread panicked");
            }
        }
    }

    fn spawn_job<F>(&mut self, job_id: Uuid, run: F) -> Result<Uuid>
    where
        F: FnOnce(Arc<AtomicBool>, Sender<ExportEvent>) + Send + 'static,
    {
        if let Some(h) = &self.active {
            if !h.thread.is_finished() {
                warn!(running = %h.job_id, rejected = %job_id, "export already running");
                return Err(MediaError::ExportBusy);
            }
        }
        // Reap the previous thread. It has already returned, so this is instant.
        if let Some(prev) = self.active.take() {
            if prev.thread.join().is_err() {
                warn!(job_id = %prev.job_id, "export thread panicked");
            }
        }

        let tx       = self.tx.clone();
        let shutdown = Arc::clone(&self.shutdown);
        let thread = thread::Builder::new()
            .name(format!("export-{}", &job_id.simple().to_string()[..8]))
            .spawn(move || {
                // A panic must still end the job, or the UI waits on it forever.
                let job_tx = tx.clone();
                if panic::catch_unwind(AssertUnwindSafe(|| run(shutdown, job_tx))).is_err() {
                    warn!(%job_id, "export thread panicked");
                    let _ = tx.send(ExportEvent::Failed {
                        job_id,
                        msg: "export thread panicked".into(),
                    });
                }
            })
            .map_err(|e| MediaError::Encode(format!("spawn export thread: {e}")))?;

        info!(%job_id, "export thread started");
        self.active = Some(ExportHandle { job_id, thread });
        Ok(job_id)
    }
}
