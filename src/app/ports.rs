use async_trait::async_trait;
use std::time::Duration;

/// Per-recipient notification used by the simulated bulk sender.
#[async_trait]
pub trait NotifierPort: Send + Sync {
    async fn notify(&self, membership_id: &str, phone: &str);
}

/// Outbound SMS gateway used by the live sender.
#[async_trait]
pub trait GatewayPort: Send + Sync {
    async fn send_sms(&self, recipient: &str, message: &str) -> SendOutcome;
}

/// How a single gateway call ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Success,
    Failure(String),
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Success)
    }
}

/// Send-rate throttle, kept apart from the use cases so pacing can be faked in tests.
#[async_trait]
pub trait ThrottlePort: Send + Sync {
    async fn pause(&self, duration: Duration);
}
