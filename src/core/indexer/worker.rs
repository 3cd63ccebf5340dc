//! Background indexing worker.
//!
//! Owns one dedicated thread that runs at most one [`IndexBuilder`]
//! job at a time. The controller talks to it through `start` and
//! `cancel`; the worker answers with [`IndexEvent`]s over an unbounded
//! channel, so events arrive in emission order and the final
//! `Finished` event is never dropped.
//!
//! The worker does not lock the destination file. Callers must not
//! search an index path while a job is writing to it.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::core::error::{Result, WiblError};
use crate::core::indexer::{CancelFlag, IndexBuilder};
use crate::core::types::{IndexEvent, VolumeInfo};

/// Receiving end of a worker's event stream
pub type IndexEvents = UnboundedReceiver<IndexEvent>;

/// Lifecycle of the most recent job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum JobState {
    Idle = 0,
    Running = 1,
    Succeeded = 2,
    Failed = 3,
    Canceled = 4,
}

impl JobState {
    fn load(atomic: &AtomicU8) -> Self {
        match atomic.load(Ordering::SeqCst) {
            1 => Self::Running,
            2 => Self::Succeeded,
            3 => Self::Failed,
            4 => Self::Canceled,
            _ => Self::Idle,
        }
    }

    /// Whether the job has reached a final state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

struct Job {
    volume: VolumeInfo,
    destination: PathBuf,
}

/// Handle to the background indexing thread
pub struct IndexWorker {
    jobs: Option<mpsc::Sender<Job>>,
    cancel: Arc<CancelFlag>,
    state: Arc<AtomicU8>,
    thread: Option<JoinHandle<()>>,
}

impl IndexWorker {
    /// Spawn the worker thread
    ///
    /// Returns the handle and the receiver for its events.
    pub fn spawn(builder: IndexBuilder) -> Result<(Self, IndexEvents)> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (event_tx, event_rx) = unbounded_channel();
        let cancel = Arc::new(CancelFlag::new());
        let state = Arc::new(AtomicU8::new(JobState::Idle as u8));

        let thread = thread::Builder::new()
            .name("wibl-indexer".to_string())
            .spawn({
                let cancel = Arc::clone(&cancel);
                let state = Arc::clone(&state);
                move || run_jobs(builder, job_rx, event_tx, cancel, state)
            })?;

        Ok((
            Self {
                jobs: Some(job_tx),
                cancel,
                state,
                thread: Some(thread),
            },
            event_rx,
        ))
    }

    /// Queue an indexing job for `volume` writing to `destination`
    ///
    /// Fails with `JobInFlight` while a previous job is still running.
    pub fn start(&self, volume: VolumeInfo, destination: impl Into<PathBuf>) -> Result<()> {
        let jobs = self.jobs.as_ref().ok_or(WiblError::WorkerUnavailable)?;

        let running = JobState::Running as u8;
        let previous = self
            .state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| {
                (s != running).then_some(running)
            })
            .map_err(|_| WiblError::JobInFlight)?;
        // Reset before dispatch so a cancel issued right after start is kept
        self.cancel.reset();

        let job = Job {
            volume,
            destination: destination.into(),
        };
        if jobs.send(job).is_err() {
            self.state.store(previous, Ordering::SeqCst);
            return Err(WiblError::WorkerUnavailable);
        }
        Ok(())
    }

    /// Ask the running job to stop; best effort
    pub fn cancel(&self) {
        self.cancel.request();
    }

    /// State of the most recent job
    pub fn state(&self) -> JobState {
        JobState::load(&self.state)
    }
}

impl Drop for IndexWorker {
    fn drop(&mut self) {
        self.cancel.request();
        // Closing the job channel ends the thread's loop
        self.jobs.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Indexing worker thread panicked");
            }
        }
    }
}

fn run_jobs(
    builder: IndexBuilder,
    jobs: mpsc::Receiver<Job>,
    events: UnboundedSender<IndexEvent>,
    cancel: Arc<CancelFlag>,
    state: Arc<AtomicU8>,
) {
    for job in jobs {
        tracing::debug!("Worker picked up job for {}", job.volume.root);

        let mut finished = None;
        let result = builder.run(&job.volume, &job.destination, &cancel, |event| {
            // Hold the terminal event until the state is final
            if matches!(event, IndexEvent::Finished { .. }) {
                finished = Some(event);
            } else {
                let _ = events.send(event);
            }
        });

        let terminal = match result {
            Ok(_) => JobState::Succeeded,
            Err(WiblError::Canceled) => JobState::Canceled,
            Err(_) => JobState::Failed,
        };
        state.store(terminal as u8, Ordering::SeqCst);

        if let Some(event) = finished {
            if events.send(event).is_err() {
                tracing::debug!("Event receiver dropped before job finished");
            }
        }
    }
    tracing::debug!("Indexing worker shutting down");
}
