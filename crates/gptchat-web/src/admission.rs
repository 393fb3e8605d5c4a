//! Admission control for completion calls.
//!
//! A bounded limit queues turns once `limit` calls are in flight across all
//! sessions. A limit of zero admits everything.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Clone)]
pub struct Admission {
    permits: Option<Arc<Semaphore>>,
    limit: usize,
}

/// Held for the duration of one completion call.
pub struct AdmissionPermit {
    _permit: Option<OwnedSemaphorePermit>,
}

impl Admission {
    pub fn new(limit: usize) -> Self {
        let permits = (limit > 0).then(|| Arc::new(Semaphore::new(limit)));
        Self { permits, limit }
    }

    /// Wait for a slot. Returns immediately when unlimited.
    pub async fn acquire(&self) -> AdmissionPermit {
        let permit = match &self.permits {
            // Never closed, so acquisition cannot fail.
            Some(semaphore) => semaphore.clone().acquire_owned().await.ok(),
            None => None,
        };
        AdmissionPermit { _permit: permit }
    }

    /// Configured limit, `None` when unlimited.
    pub fn limit(&self) -> Option<usize> {
        self.permits.as_ref().map(|_| self.limit)
    }

    /// Free slots right now, `None` when unlimited.
    #[cfg(test)]
    fn available(&self) -> Option<usize> {
        self.permits.as_ref().map(|s| s.available_permits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn bounded_limit_counts_permits() {
        let admission = Admission::new(2);
        assert_eq!(admission.limit(), Some(2));

        let a = admission.acquire().await;
        assert_eq!(admission.available(), Some(1));
        let b = admission.acquire().await;
        assert_eq!(admission.available(), Some(0));

        drop(a);
        drop(b);
        assert_eq!(admission.available(), Some(2));
    }

    #[tokio::test]
    async fn full_limit_queues_until_release() {
        let admission = Admission::new(1);
        let held = admission.acquire().await;

        let waiter = admission.clone();
        let pending = tokio::spawn(async move {
            let _permit = waiter.acquire().await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), pending)
            .await
            .expect("waiter should be admitted")
            .unwrap();
    }

    #[tokio::test]
    async fn zero_means_unlimited() {
        let admission = Admission::new(0);
        assert_eq!(admission.limit(), None);
        assert_eq!(admission.available(), None);

        let permits: Vec<_> = acquire_many(&admission, 100).await;
        assert_eq!(permits.len(), 100);
    }

    async fn acquire_many(admission: &Admission, n: usize) -> Vec<AdmissionPermit> {
        let mut permits = Vec::with_capacity(n);
        for _ in 0..n {
            permits.push(admission.acquire().await);
        }
        permits
    }
}
