//! Integration tests for deferred futures.

use std::time::Duration;

use grabbag::{DeferredError, create_deferred};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Failure(String);

#[tokio::test]
async fn test_resolve_with_minus_one() {
    let (resolver, future) = create_deferred::<i32, Failure>();
    resolver.resolve(-1);
    assert_eq!(future.await.unwrap(), -1);
}

#[tokio::test]
async fn test_reject_message_propagates() {
    let (resolver, future) = create_deferred::<i32, Failure>();
    resolver.reject(Failure("foo".to_string()));
    let err = future.await.unwrap_err();
    assert!(err.to_string().contains("foo"));
}

#[tokio::test]
async fn test_settle_from_many_tasks() {
    let (resolver, future) = create_deferred::<usize, Failure>();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.resolve(i) })
        })
        .collect();

    let mut settled = 0;
    for handle in handles {
        if handle.await.unwrap() {
            settled += 1;
        }
    }
    assert_eq!(settled, 1);

    let value = future.await.unwrap();
    assert!(value < 8);
}

#[tokio::test]
async fn test_timeout_while_pending() {
    let (resolver, future) = create_deferred::<(), Failure>();
    let result = tokio::time::timeout(Duration::from_millis(20), future).await;
    assert!(result.is_err());
    assert!(!resolver.is_settled());
}

#[tokio::test]
async fn test_abandoned_when_all_resolvers_dropped() {
    let (resolver, future) = create_deferred::<(), Failure>();
    let clone = resolver.clone();
    drop(resolver);
    drop(clone);
    assert!(matches!(future.await, Err(DeferredError::Abandoned)));
}
