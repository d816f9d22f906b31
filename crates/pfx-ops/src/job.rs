//! Background filter jobs.
//!
//! A [`FilterJob`] runs one filter pass on a worker thread so the caller
//! stays responsive. Progress and the final outcome arrive as
//! [`JobEvent`]s over a channel; a [`CancelToken`] stops the pass at the
//! next column boundary.
//!
//! # Event Order
//!
//! ```text
//! Progress(0) .. Progress(p) .. (Finished(buffer) | Cancelled)
//! ```
//!
//! Progress values are strictly increasing (repeats are dropped) and
//! exactly one terminal event is sent.
//!
//! # Example
//!
//! ```rust
//! use pfx_core::{Color, PixelBuffer};
//! use pfx_ops::{Filter, FilterJob};
//!
//! let src = PixelBuffer::filled(16, 16, Color::gray(100));
//! let job = FilterJob::spawn(Filter::invert(), src).unwrap();
//! let out = job.wait().unwrap().expect("not cancelled");
//! assert_eq!(out.pixel(0, 0), Color::gray(155));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use pfx_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

use crate::{Filter, OpsError, OpsResult};

/// Shared cooperative cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Message from a running job.
#[derive(Debug)]
pub enum JobEvent {
    /// Percentage of columns started, 0-99.
    Progress(u8),
    /// The pass completed.
    Finished(PixelBuffer),
    /// The pass stopped early; no buffer is produced.
    Cancelled,
}

impl JobEvent {
    /// Returns true for `Finished` and `Cancelled`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

/// Handle to a filter pass running on a worker thread.
///
/// Dropping the handle without waiting cancels the pass.
#[derive(Debug)]
pub struct FilterJob {
    token: CancelToken,
    events: Receiver<JobEvent>,
    handle: Option<JoinHandle<()>>,
}

impl FilterJob {
    /// Starts `filter` over `source` on a new thread.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] if `source` has zero width or height,
    /// [`OpsError::Worker`] if the thread cannot be spawned.
    pub fn spawn(filter: Filter, source: PixelBuffer) -> OpsResult<Self> {
        Self::spawn_with(filter, source, CancelToken::new(), false)
    }

    /// Like [`spawn`](Self::spawn) but computes columns with Rayon.
    #[cfg(feature = "parallel")]
    pub fn spawn_parallel(filter: Filter, source: PixelBuffer) -> OpsResult<Self> {
        Self::spawn_with(filter, source, CancelToken::new(), true)
    }

    /// Like [`spawn`](Self::spawn) but observes a caller-owned token.
    ///
    /// One token can stop several jobs. A token that is already cancelled
    /// yields `Progress(0)` followed by `Cancelled`. Dropping an unfinished
    /// job cancels the token for every job holding it.
    ///
    /// ```rust
    /// use pfx_core::PixelBuffer;
    /// use pfx_ops::{CancelToken, Filter, FilterJob};
    ///
    /// let token = CancelToken::new();
    /// token.cancel();
    /// let job = FilterJob::spawn_with_token(Filter::blur(), PixelBuffer::new(8, 8), token).unwrap();
    /// assert!(job.wait().unwrap().is_none());
    /// ```
    pub fn spawn_with_token(
        filter: Filter,
        source: PixelBuffer,
        token: CancelToken,
    ) -> OpsResult<Self> {
        Self::spawn_with(filter, source, token, false)
    }

    fn spawn_with(
        filter: Filter,
        source: PixelBuffer,
        token: CancelToken,
        parallel: bool,
    ) -> OpsResult<Self> {
        if source.is_empty() {
            return Err(OpsError::InvalidDimensions(format!(
                "source must be at least 1x1, got {}x{}",
                source.width(),
                source.height()
            )));
        }

        let worker_token = token.clone();
        let (tx, events) = mpsc::channel();
        let name = format!("pfx-{}", filter.name());
        trace!(thread = %name, parallel, "FilterJob::spawn");

        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || {
                let progress_tx = tx.clone();
                let mut last = None;
                let on_progress = move |p: u8| {
                    if last.is_none_or(|l| p > l) {
                        last = Some(p);
                        let _ = progress_tx.send(JobEvent::Progress(p));
                    }
                };
                let is_cancelled = || worker_token.is_cancelled();

                let event = match run(&filter, &source, on_progress, is_cancelled, parallel) {
                    Some(buffer) => JobEvent::Finished(buffer),
                    None => JobEvent::Cancelled,
                };
                // Receiver may be gone if the handle was dropped.
                let _ = tx.send(event);
            })
            .map_err(|e| OpsError::Worker(e.to_string()))?;

        Ok(Self {
            token,
            events,
            handle: Some(handle),
        })
    }

    /// Requests cancellation at the next column boundary.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns a clone of the job's cancellation token.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// The raw event channel.
    pub fn events(&self) -> &Receiver<JobEvent> {
        &self.events
    }

    /// Returns the next pending event without blocking.
    pub fn try_event(&self) -> Option<JobEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks until the job ends, forwarding progress to `on_progress`.
    ///
    /// Returns `Ok(None)` if the job was cancelled.
    ///
    /// # Errors
    ///
    /// [`OpsError::Worker`] if the worker thread panicked.
    pub fn wait_with<F>(mut self, mut on_progress: F) -> OpsResult<Option<PixelBuffer>>
    where
        F: FnMut(u8),
    {
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                JobEvent::Progress(p) => on_progress(p),
                JobEvent::Finished(buffer) => {
                    outcome = Some(Some(buffer));
                    break;
                }
                JobEvent::Cancelled => {
                    outcome = Some(None);
                    break;
                }
            }
        }

        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| OpsError::Worker("filter thread panicked".into()))?;
        }

        outcome.ok_or_else(|| OpsError::Worker("filter thread ended without a result".into()))
    }

    /// Blocks until the job ends. Returns `Ok(None)` if it was cancelled.
    pub fn wait(self) -> OpsResult<Option<PixelBuffer>> {
        self.wait_with(|_| {})
    }
}

impl Drop for FilterJob {
    fn drop(&mut self) {
        if self.handle.is_some() {
            debug!("filter job dropped before completion, cancelling");
            self.token.cancel();
        }
    }
}

#[cfg(feature = "parallel")]
fn run<P, C>(
    filter: &Filter,
    source: &PixelBuffer,
    on_progress: P,
    is_cancelled: C,
    parallel: bool,
) -> Option<PixelBuffer>
where
    P: FnMut(u8),
    C: Fn() -> bool,
{
    if parallel {
        crate::parallel::apply_par(filter, source, on_progress, is_cancelled)
    } else {
        filter.apply(source, on_progress, is_cancelled)
    }
}

#[cfg(not(feature = "parallel"))]
fn run<P, C>(
    filter: &Filter,
    source: &PixelBuffer,
    on_progress: P,
    is_cancelled: C,
    _parallel: bool,
) -> Option<PixelBuffer>
where
    P: FnMut(u8),
    C: Fn() -> bool,
{
    filter.apply(source, on_progress, is_cancelled)
}
