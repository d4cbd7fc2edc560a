use crate::app::ports::NotifierPort;
use crate::processor::get_last4;
use async_trait::async_trait;
use tracing::info;

/// Stand-in for a real password-delivery endpoint: logs instead of sending.
pub struct SimulatedNotifier;

#[async_trait]
impl NotifierPort for SimulatedNotifier {
    async fn notify(&self, membership_id: &str, phone: &str) {
        info!(
            membership_id,
            phone,
            "[SIMULATED] Sending password SMS for {} to {} (ending with {})",
            membership_id,
            phone,
            get_last4(phone)
        );
    }
}
