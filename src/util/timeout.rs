//! Per-call deadlines.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::ProviderError;

/// Run a provider call, failing with [`ProviderError::Timeout`] once
/// `deadline` elapses. The call is dropped on expiry.
pub async fn with_deadline<T>(
    deadline: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    tokio::time::timeout(deadline, call).await.unwrap_or_else(|_| {
        let millis = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
        warn!(deadline_ms = millis, "provider call exceeded its deadline");
        Err(ProviderError::Timeout(millis))
    })
}
