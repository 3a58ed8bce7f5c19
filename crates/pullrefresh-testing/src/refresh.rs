//! Refresh action completed by the test instead of by I/O.

use pullrefresh_core::{RefreshAction, RefreshError, RefreshFuture};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Default)]
struct PendingRefresh {
    result: Option<Result<(), RefreshError>>,
    waker: Option<Waker>,
}

#[derive(Default)]
struct ManualRefreshState {
    invocations: usize,
    current: Option<Rc<RefCell<PendingRefresh>>>,
}

/// A refresh action that stays pending until [`complete`](Self::complete)
/// or [`fail`](Self::fail) is called.
#[derive(Clone, Default)]
pub struct ManualRefresh {
    state: Rc<RefCell<ManualRefreshState>>,
}

impl ManualRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> usize {
        self.state.borrow().invocations
    }

    /// True while the latest invocation has not been resolved.
    pub fn is_pending(&self) -> bool {
        self.state
            .borrow()
            .current
            .as_ref()
            .is_some_and(|pending| pending.borrow().result.is_none())
    }

    pub fn complete(&self) {
        self.resolve(Ok(()));
    }

    pub fn fail(&self, message: &str) {
        self.resolve(Err(RefreshError::new(message)));
    }

    fn resolve(&self, result: Result<(), RefreshError>) {
        let Some(pending) = self.state.borrow_mut().current.take() else {
            log::warn!("no refresh in flight to resolve");
            return;
        };
        let waker = {
            let mut pending = pending.borrow_mut();
            pending.result = Some(result);
            pending.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl RefreshAction for ManualRefresh {
    fn refresh(&self) -> RefreshFuture {
        let pending = Rc::new(RefCell::new(PendingRefresh::default()));
        {
            let mut state = self.state.borrow_mut();
            state.invocations += 1;
            state.current = Some(Rc::clone(&pending));
        }
        Box::pin(ManualRefreshFuture { pending })
    }
}

struct ManualRefreshFuture {
    pending: Rc<RefCell<PendingRefresh>>,
}

impl Future for ManualRefreshFuture {
    type Output = Result<(), RefreshError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut pending = self.pending.borrow_mut();
        match pending.result.take() {
            Some(result) => Poll::Ready(result),
            None => {
                pending.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
