use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One-shot cancellation signal for a single generation attempt.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            // Registered before the flag check so a concurrent cancel is not missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Cancels whichever attempt a session currently has in flight.
#[derive(Clone, Default)]
pub struct CancelHandle {
    current: Arc<Mutex<Option<CancelToken>>>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an attempt was in flight.
    pub fn cancel(&self) -> bool {
        match self.current.lock() {
            Ok(current) => match current.as_ref() {
                Some(token) => {
                    token.cancel();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.current.lock().map(|c| c.is_some()).unwrap_or(false)
    }

    /// Register a fresh token as the current attempt until the returned guard drops.
    pub(crate) fn begin(&self) -> InFlight<'_> {
        let token = CancelToken::new();
        if let Ok(mut current) = self.current.lock() {
            *current = Some(token.clone());
        }
        InFlight { handle: self, token }
    }

    fn finish(&self) {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
    }
}

pub(crate) struct InFlight<'a> {
    handle: &'a CancelHandle,
    token: CancelToken,
}

impl InFlight<'_> {
    pub(crate) fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.handle.finish();
    }
}
