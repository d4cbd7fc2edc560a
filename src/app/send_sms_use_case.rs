use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::ports::{GatewayPort, SendOutcome, ThrottlePort};
use crate::domain::StudentContact;
use crate::error::Result;
use crate::storage::read_table;

/// Prefixes `raw` with the country code unless it already starts with it.
pub fn normalize_phone(raw: &str, country_prefix: &str) -> String {
    let phone = raw.trim();
    if phone.starts_with(country_prefix) {
        phone.to_string()
    } else {
        format!("{}{}", country_prefix, phone)
    }
}

/// Portal login message carrying the username and temporary password.
pub fn credential_message(name: &str, username: &str, password: &str, portal_url: &str) -> String {
    format!(
        "Welcome {name}!\n\
         \n\
         Your College Portal Login:\n\
         \n\
         Username: {username}\n\
         Temporary Password: {password}\n\
         \n\
         Login: {portal_url}\n\
         (Change password after first login)\n\
         \n\
         - IT Team"
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSend {
    pub membership_id: String,
    pub name: String,
    pub phone: String,
    pub reason: String,
}

/// Per-run accounting of live sends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: Vec<FailedSend>,
}

/// Sends one credential SMS per student, pausing after every row.
pub struct SendSmsUseCase {
    gateway: Box<dyn GatewayPort>,
    throttle: Box<dyn ThrottlePort>,
    interval: Duration,
    country_prefix: String,
    portal_url: String,
    retry_attempts: u32,
}

impl SendSmsUseCase {
    pub fn new(
        gateway: Box<dyn GatewayPort>,
        throttle: Box<dyn ThrottlePort>,
        interval: Duration,
        country_prefix: impl Into<String>,
        portal_url: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            throttle,
            interval,
            country_prefix: country_prefix.into(),
            portal_url: portal_url.into(),
            retry_attempts: 0,
        }
    }

    /// Extra attempts for a row whose send failed. Zero sends each row once.
    pub fn with_retry_attempts(mut self, retry_attempts: u32) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    pub async fn run(&self, input: &Path) -> Result<SendSummary> {
        let students: Vec<StudentContact> = read_table(input, &StudentContact::COLUMNS)?;
        info!("Loaded {} students from {}", students.len(), input.display());
        Ok(self.send_all(&students).await)
    }

    /// Sends to every student in order. Failures are recorded, never fatal.
    pub async fn send_all(&self, students: &[StudentContact]) -> SendSummary {
        let mut summary = SendSummary {
            total: students.len(),
            ..SendSummary::default()
        };

        for student in students {
            let phone = normalize_phone(&student.phoneno, &self.country_prefix);
            let message = credential_message(
                &student.name,
                student.membership_id.trim(),
                &student.phoneno_last4,
                &self.portal_url,
            );

            match self.send_with_retries(&phone, &message).await {
                SendOutcome::Success => {
                    info!("✅ SMS Sent to {} ({}): Success", student.name, phone);
                    summary.sent += 1;
                }
                SendOutcome::Failure(reason) => {
                    warn!("❌ Failed for {} ({}): {}", student.name, phone, reason);
                    summary.failed.push(FailedSend {
                        membership_id: student.membership_id.trim().to_string(),
                        name: student.name.clone(),
                        phone,
                        reason,
                    });
                }
            }

            self.throttle.pause(self.interval).await;
        }

        info!(
            "All SMS processing complete: {} sent, {} failed of {}",
            summary.sent,
            summary.failed.len(),
            summary.total
        );
        summary
    }

    async fn send_with_retries(&self, phone: &str, message: &str) -> SendOutcome {
        let mut outcome = self.gateway.send_sms(phone, message).await;
        for attempt in 1..=self.retry_attempts {
            if outcome.is_success() {
                break;
            }
            self.throttle.pause(self.interval).await;
            info!("Retrying {} (attempt {} of {})", phone, attempt + 1, self.retry_attempts + 1);
            outcome = self.gateway.send_sms(phone, message).await;
        }
        outcome
    }
}
