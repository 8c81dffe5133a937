use super::{ChatModel, ModelHandle};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::warn;

/// Wraps a backend with an optional in-flight limit and per-call timeout.
pub struct GuardedModel {
    inner: ModelHandle,
    permits: Option<Semaphore>,
    timeout: Option<Duration>,
}

impl GuardedModel {
    pub fn new(inner: ModelHandle, max_in_flight: Option<usize>, timeout: Option<Duration>) -> Self {
        Self {
            inner,
            permits: max_in_flight.map(Semaphore::new),
            timeout,
        }
    }
}

#[async_trait]
impl ChatModel for GuardedModel {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn generate(&self, message: &str) -> Result<String> {
        let _permit = match self.permits {
            Some(ref permits) => Some(
                permits
                    .acquire()
                    .await
                    .map_err(|_| Error::internal("inference limiter closed"))?,
            ),
            None => None,
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.inner.generate(message))
                .await
                .map_err(|_| {
                    warn!("Inference call exceeded {:?}", limit);
                    Error::inference(format!("inference timed out after {}s", limit.as_secs()))
                })?,
            None => self.inner.generate(message).await,
        }
    }
}
