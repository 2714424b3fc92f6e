//! Deferred futures: a future paired with external settlement handles.
//!
//! [`create_deferred`] returns a [`Resolver`] and a [`DeferredFuture`]. The
//! resolver can be cloned and moved to any task or thread; the first
//! `resolve` or `reject` call settles the future and every later call is
//! ignored.
//!
//! # Example
//!
//! ```
//! use grabbag::util::deferred::create_deferred;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (resolver, future) = create_deferred::<i32, String>();
//! tokio::spawn(async move {
//!     resolver.resolve(-1);
//! });
//! assert_eq!(future.await, Ok(-1));
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use futures::future::FusedFuture;
use tokio::sync::oneshot;

/// Failure observed when awaiting a [`DeferredFuture`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeferredError<E> {
    /// The future was rejected with this reason.
    #[error("{0}")]
    Rejected(E),

    /// Every resolver was dropped before the future was settled.
    #[error("Deferred future abandoned before settlement")]
    Abandoned,
}

impl<E> DeferredError<E> {
    /// Returns the rejection reason, if any.
    pub fn into_rejection(self) -> Option<E> {
        match self {
            Self::Rejected(reason) => Some(reason),
            Self::Abandoned => None,
        }
    }
}

type Settlement<T, E> = Result<T, E>;

/// Handle that settles a [`DeferredFuture`] from outside.
///
/// Cheap to clone (Arc internals). All clones share the same one-shot
/// settlement.
pub struct Resolver<T, E> {
    sender: Arc<Mutex<Option<oneshot::Sender<Settlement<T, E>>>>>,
}

impl<T, E> Clone for Resolver<T, E> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T, E> fmt::Debug for Resolver<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T, E> Resolver<T, E> {
    /// Settle the future successfully with `value`.
    ///
    /// Returns `true` if this call settled the future, `false` if it was
    /// already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle the future with a rejection `reason`.
    ///
    /// Returns `true` if this call settled the future, `false` if it was
    /// already settled.
    pub fn reject(&self, reason: E) -> bool {
        self.settle(Err(reason))
    }

    /// Returns `true` once `resolve` or `reject` has been called.
    pub fn is_settled(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn settle(&self, settlement: Settlement<T, E>) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            Some(tx) => {
                // A dropped future just means nobody is listening.
                if tx.send(settlement).is_err() {
                    log::debug!("Deferred settled after its future was dropped");
                }
                true
            }
            None => {
                log::debug!("Ignoring settlement of an already settled deferred");
                false
            }
        }
    }
}

/// Future half of a deferred pair.
///
/// Resolves to `Ok(value)` on `resolve`, `Err(DeferredError::Rejected)` on
/// `reject`, and `Err(DeferredError::Abandoned)` if all resolvers are
/// dropped first.
#[derive(Debug)]
#[must_use = "futures do nothing unless awaited"]
pub struct DeferredFuture<T, E> {
    receiver: oneshot::Receiver<Settlement<T, E>>,
    terminated: bool,
}

impl<T, E> Future for DeferredFuture<T, E> {
    type Output = Result<T, DeferredError<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let settlement = match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(settlement) => settlement,
        };
        self.terminated = true;

        Poll::Ready(match settlement {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(reason)) => Err(DeferredError::Rejected(reason)),
            Err(_) => Err(DeferredError::Abandoned),
        })
    }
}

impl<T, E> FusedFuture for DeferredFuture<T, E> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// Create a future together with its external [`Resolver`].
pub fn create_deferred<T, E>() -> (Resolver<T, E>, DeferredFuture<T, E>) {
    let (tx, rx) = oneshot::channel();
    let resolver = Resolver {
        sender: Arc::new(Mutex::new(Some(tx))),
    };
    let future = DeferredFuture {
        receiver: rx,
        terminated: false,
    };
    (resolver, future)
}
