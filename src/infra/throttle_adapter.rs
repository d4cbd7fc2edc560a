use crate::app::ports::ThrottlePort;
use async_trait::async_trait;
use std::time::Duration;

/// Wall-clock throttle backed by `tokio::time::sleep`.
pub struct TokioThrottle;

#[async_trait]
impl ThrottlePort for TokioThrottle {
    async fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::time::sleep(duration).await;
    }
}
