use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation scope for a single fetch.
///
/// Every sub-call made on behalf of one fetch shares this context. When the
/// deadline passes or the token is cancelled, all outstanding sub-calls are
/// dropped.
#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Instant,
    cancellation: CancellationToken,
}

impl CallContext {
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Tie this context to an external token, e.g. a shutdown signal.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_sets_future_deadline() {
        let ctx = CallContext::with_timeout(Duration::from_secs(30));

        assert!(!ctx.is_expired());
        assert!(ctx.remaining() > Duration::from_secs(29));
    }

    #[test]
    fn test_past_deadline_is_expired() {
        let ctx = CallContext::with_deadline(Instant::now() - Duration::from_millis(1));

        assert!(ctx.is_expired());
        assert_eq!(ctx.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_shared_cancellation() {
        let token = CancellationToken::new();
        let ctx = CallContext::with_timeout(Duration::from_secs(1)).with_cancellation(token.child_token());

        token.cancel();
        assert!(ctx.cancellation().is_cancelled());
    }
}
