use anyhow::Result;
use async_trait::async_trait;
use member_sms::app::bulk_send_use_case::BulkSendUseCase;
use member_sms::app::generate_use_case::run_generate;
use member_sms::app::ports::{GatewayPort, NotifierPort, SendOutcome, ThrottlePort};
use member_sms::app::process_use_case::run_process;
use member_sms::app::send_sms_use_case::SendSmsUseCase;
use member_sms::config::{GeneratorConfig, ProcessorConfig};
use member_sms::error::NotifyError;
use member_sms::storage::read_table;
use rand::rngs::StdRng;
use serde::Deserialize;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

#[derive(Deserialize)]
struct ProcessedRow {
    membership_id: String,
    phoneno: String,
    phoneno_clean: String,
    phoneno_last4: String,
    department: String,
}

#[derive(Default)]
struct Recorder {
    notified: Mutex<Vec<(String, String)>>,
    pauses: Mutex<Vec<Duration>>,
}

struct RecordingNotifier(Arc<Recorder>);

#[async_trait]
impl NotifierPort for RecordingNotifier {
    async fn notify(&self, membership_id: &str, phone: &str) {
        self.0
            .notified
            .lock()
            .unwrap()
            .push((membership_id.to_string(), phone.to_string()));
    }
}

struct RecordingThrottle(Arc<Recorder>);

#[async_trait]
impl ThrottlePort for RecordingThrottle {
    async fn pause(&self, duration: Duration) {
        self.0.pauses.lock().unwrap().push(duration);
    }
}

struct RecordingGateway(Arc<Recorder>);

#[async_trait]
impl GatewayPort for RecordingGateway {
    async fn send_sms(&self, recipient: &str, message: &str) -> SendOutcome {
        self.0
            .notified
            .lock()
            .unwrap()
            .push((recipient.to_string(), message.to_string()));
        SendOutcome::Success
    }
}

#[tokio::test]
async fn test_generate_process_and_bulk_send() -> Result<()> {
    let temp_dir = tempdir()?;
    let dummy = temp_dir.path().join("iei_dummy_members.csv");
    let processed = temp_dir.path().join("iei_processed_members.csv");

    let generator = GeneratorConfig {
        member_count: 13,
        output_path: dummy.clone(),
    };
    assert_eq!(run_generate(&generator, &mut StdRng::seed_from_u64(3))?, 13);

    let processor = ProcessorConfig {
        input_path: dummy,
        output_path: processed.clone(),
    };
    assert_eq!(run_process(&processor)?, 13);

    let rows: Vec<ProcessedRow> = read_table(&processed, &[])?;
    assert_eq!(rows[0].membership_id, "F-1423500");
    assert_eq!(rows[0].department, "IT");
    for row in &rows {
        assert_eq!(row.phoneno_clean, row.phoneno);
        assert_eq!(row.phoneno_last4, row.phoneno[6..]);
    }

    let recorder = Arc::new(Recorder::default());
    let use_case = BulkSendUseCase::new(
        Box::new(RecordingNotifier(recorder.clone())),
        Box::new(RecordingThrottle(recorder.clone())),
        5,
        Duration::from_secs(3),
    );
    let report = use_case.run(&processed).await?;

    assert_eq!(report.total, 13);
    assert_eq!(report.batches, 3);
    assert_eq!(report.notified, 13);
    assert_eq!(*recorder.pauses.lock().unwrap(), vec![Duration::from_secs(3); 2]);

    let notified = recorder.notified.lock().unwrap();
    assert_eq!(notified[0], ("F-1423500".to_string(), rows[0].phoneno_clean.clone()));
    assert_eq!(notified[12].0, "AM1423512");
    Ok(())
}

#[tokio::test]
async fn test_send_sms_reads_student_sheet() -> Result<()> {
    let temp_dir = tempdir()?;
    let students = temp_dir.path().join("students.csv");
    std::fs::write(
        &students,
        "membership_id,name,email,phoneno,phoneno_last4\n\
         F-1423500,Ishwari Shinde,ishwari.shinde@example.com,9876543210,3210\n\
         M-1423501,Atharva Palve,atharva.palve@example.com,+917000000001,0001\n",
    )?;

    let recorder = Arc::new(Recorder::default());
    let use_case = SendSmsUseCase::new(
        Box::new(RecordingGateway(recorder.clone())),
        Box::new(RecordingThrottle(recorder.clone())),
        Duration::from_secs(2),
        "+91",
        "https://portal.college.in",
    );
    let summary = use_case.run(&students).await?;

    assert_eq!(summary.sent, 2);
    assert_eq!(recorder.pauses.lock().unwrap().len(), 2);
    let sent = recorder.notified.lock().unwrap();
    assert_eq!(sent[0].0, "+919876543210");
    assert!(sent[0].1.contains("Temporary Password: 3210"));
    assert_eq!(sent[1].0, "+917000000001");
    assert!(sent[1].1.contains("Temporary Password: 0001"));
    Ok(())
}

#[tokio::test]
async fn test_bulk_send_requires_cleaned_phone_column() -> Result<()> {
    let temp_dir = tempdir()?;
    let raw = temp_dir.path().join("raw.csv");
    std::fs::write(&raw, "membership_id,phoneno\nF-1423500,9876543210\n")?;

    let recorder = Arc::new(Recorder::default());
    let use_case = BulkSendUseCase::new(
        Box::new(RecordingNotifier(recorder.clone())),
        Box::new(RecordingThrottle(recorder)),
        5,
        Duration::from_secs(3),
    );

    let err = use_case.run(&raw).await.unwrap_err();
    assert!(matches!(err, NotifyError::MissingField { ref column, .. } if column == "phoneno_clean"));
    Ok(())
}
