//! Asynchronous half of the release protocol.

use crate::error::RefreshError;
use crate::host::RefreshFuture;
use crate::pull_refresh::PullRefresh;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use web_time::Instant;

/// How a release cycle ended.
#[derive(Debug)]
pub enum ReleaseOutcome {
    /// Released short of the threshold; no refresh ran.
    Skipped,
    Refreshed,
    /// The refresh action failed. The widget was reset anyway.
    RefreshFailed(RefreshError),
}

impl ReleaseOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, ReleaseOutcome::Refreshed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ReleaseOutcome::Skipped)
    }

    pub fn error(&self) -> Option<&RefreshError> {
        match self {
            ReleaseOutcome::RefreshFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of lifting the finger.
#[must_use = "a refreshing release keeps the widget locked until its task is polled to completion"]
pub enum Release {
    /// No gesture was being tracked.
    Ignored,
    /// The release finished synchronously.
    Reset(ReleaseOutcome),
    /// The refresh action is running; the task resets the widget when done.
    Refreshing(RefreshTask),
}

impl std::fmt::Debug for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Release::Ignored => f.write_str("Ignored"),
            Release::Reset(outcome) => f.debug_tuple("Reset").field(outcome).finish(),
            Release::Refreshing(_) => f.write_str("Refreshing"),
        }
    }
}

/// Awaits the refresh action, then restores the idle state.
///
/// The reset runs whether the refresh succeeds or fails. Dropping the task
/// before it completes also resets, so the widget never stays pinned in the
/// loading state.
pub struct RefreshTask {
    refresh: RefreshFuture,
    widget: Option<PullRefresh>,
    started: Instant,
}

impl RefreshTask {
    pub(crate) fn new(widget: PullRefresh, refresh: RefreshFuture) -> Self {
        Self {
            refresh,
            widget: Some(widget),
            started: Instant::now(),
        }
    }
}

impl Future for RefreshTask {
    type Output = ReleaseOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = match self.refresh.as_mut().poll(cx) {
            Poll::Ready(result) => result,
            Poll::Pending => return Poll::Pending,
        };

        let elapsed = self.started.elapsed();
        let outcome = match result {
            Ok(()) => {
                log::debug!("refresh finished in {elapsed:?}");
                ReleaseOutcome::Refreshed
            }
            Err(err) => {
                log::warn!("{err} after {elapsed:?}; restoring idle state");
                ReleaseOutcome::RefreshFailed(err)
            }
        };
        if let Some(widget) = self.widget.take() {
            widget.finish_release();
        }
        Poll::Ready(outcome)
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        if let Some(widget) = self.widget.take() {
            log::debug!("refresh task dropped before completion; restoring idle state");
            widget.finish_release();
        }
    }
}
