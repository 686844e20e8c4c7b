//! Per-call scope handed to every metadata lookup.
//!
//! A `QueryContext` lives for one format or parse call. It can carry
//! metadata values (read by [`ContextResolver`](crate::services::metadata::ContextResolver)),
//! a deadline and a cancellation signal. The renderers never inspect it; they
//! pass it unchanged to the resolver, which is responsible for honouring it.

use crate::error::ResolveError;
use crate::models::DenomMetadata;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    by_base: HashMap<String, DenomMetadata>,
    by_display: HashMap<String, DenomMetadata>,
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Trigger side of a context's cancellation signal.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // Receivers may all be gone already, which is fine.
        let _ = self.tx.send(true);
    }
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `metadata` resolvable by both its base and its display denomination.
    pub fn with_metadata(mut self, metadata: DenomMetadata) -> Self {
        self.by_display
            .insert(metadata.display.clone(), metadata.clone());
        self.by_base.insert(metadata.base.clone(), metadata);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle { tx })
    }

    pub fn metadata_by_base(&self, base: &str) -> Option<&DenomMetadata> {
        self.by_base.get(base)
    }

    pub fn metadata_by_display(&self, display: &str) -> Option<&DenomMetadata> {
        self.by_display.get(display)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fail fast if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), ResolveError> {
        if self.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ResolveError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drive `lookup` to completion unless the deadline passes or the
    /// context is cancelled first.
    pub async fn run<F, T>(&self, lookup: F) -> Result<T, ResolveError>
    where
        F: Future<Output = Result<T, ResolveError>>,
    {
        self.check()?;

        let cancelled = async {
            match self.cancel.clone() {
                Some(mut rx) => loop {
                    if *rx.borrow_and_update() {
                        break;
                    }
                    if rx.changed().await.is_err() {
                        // Handle dropped without cancelling.
                        std::future::pending::<()>().await;
                    }
                },
                None => std::future::pending::<()>().await,
            }
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = lookup => result,
            _ = cancelled => Err(ResolveError::Cancelled),
            _ = expired => Err(ResolveError::DeadlineExceeded),
        }
    }
}
