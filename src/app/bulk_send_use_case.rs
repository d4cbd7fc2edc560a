use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::ports::{NotifierPort, ThrottlePort};
use crate::batching::partition;
use crate::constants::NULL_LITERAL;
use crate::domain::BulkRecipient;
use crate::error::Result;
use crate::storage::read_table;

/// Counts from one simulated bulk send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSendReport {
    pub total: usize,
    pub batches: usize,
    pub notified: usize,
    pub skipped: usize,
}

/// Picks the phone to notify: the cleaned number, else the raw one.
///
/// Blank cells and the literal `"null"` count as missing.
pub fn select_phone(recipient: &BulkRecipient) -> Option<&str> {
    fn usable(value: &Option<String>) -> Option<&str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != NULL_LITERAL)
    }
    usable(&recipient.phoneno_clean).or_else(|| usable(&recipient.phoneno))
}

/// Notifies members in fixed-size batches, pausing between batches.
pub struct BulkSendUseCase {
    notifier: Box<dyn NotifierPort>,
    throttle: Box<dyn ThrottlePort>,
    batch_size: usize,
    delay: Duration,
}

impl BulkSendUseCase {
    pub fn new(
        notifier: Box<dyn NotifierPort>,
        throttle: Box<dyn ThrottlePort>,
        batch_size: usize,
        delay: Duration,
    ) -> Self {
        Self {
            notifier,
            throttle,
            batch_size,
            delay,
        }
    }

    /// Reads the processed member table at `input` and notifies every row.
    pub async fn run(&self, input: &Path) -> Result<BulkSendReport> {
        let recipients: Vec<BulkRecipient> = read_table(input, &BulkRecipient::COLUMNS)?;
        info!("Total members found: {}", recipients.len());
        self.send_all(&recipients).await
    }

    pub async fn send_all(&self, recipients: &[BulkRecipient]) -> Result<BulkSendReport> {
        let batches = partition(recipients, self.batch_size)?;
        let mut report = BulkSendReport {
            total: recipients.len(),
            batches: batches.len(),
            ..BulkSendReport::default()
        };

        let mut start = 0;
        for (index, batch) in batches.iter().enumerate() {
            info!(
                "=== Sending batch {} (members {} to {}) ===",
                index + 1,
                start + 1,
                start + batch.len()
            );

            for recipient in batch.iter() {
                let membership_id = recipient.membership_id.trim();
                match select_phone(recipient) {
                    Some(phone) => {
                        self.notifier.notify(membership_id, phone).await;
                        report.notified += 1;
                    }
                    None => {
                        warn!("[SKIP] No phone for member {}, skipping...", membership_id);
                        report.skipped += 1;
                    }
                }
            }
            start += batch.len();

            if index + 1 < batches.len() {
                info!("Waiting {} seconds before next batch...", self.delay.as_secs());
                self.throttle.pause(self.delay).await;
            }
        }

        info!("Done sending messages to all members (simulated)");
        Ok(report)
    }
}
