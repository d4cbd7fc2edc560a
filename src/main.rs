use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use member_sms::app::bulk_send_use_case::BulkSendUseCase;
use member_sms::app::generate_use_case::run_generate;
use member_sms::app::process_use_case::run_process;
use member_sms::app::send_sms_use_case::SendSmsUseCase;
use member_sms::config::Config;
use member_sms::infra::simulated_notifier::SimulatedNotifier;
use member_sms::infra::textbee_gateway::TextBeeGateway;
use member_sms::infra::throttle_adapter::TokioThrottle;
use member_sms::logging;

#[derive(Parser)]
#[command(name = "member_sms")]
#[command(about = "Generate, clean and notify member records over SMS")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file (default: ./config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a table of dummy members
    Generate {
        /// Number of members to generate
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Add cleaned-phone and last-4 columns to a member table
    Process {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Simulate password SMS delivery in batches
    BulkSend {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        batch_size: Option<usize>,
        /// Seconds to wait between batches
        #[arg(long)]
        delay_seconds: Option<u64>,
    },
    /// Send login credentials through the SMS gateway, one row at a time
    SendSms {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Seconds to wait after each message
        #[arg(long)]
        interval_seconds: Option<u64>,
        /// Extra attempts for a failed message
        #[arg(long)]
        retry_attempts: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    let log_guard = logging::init_logging();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        // process::exit skips destructors, so flush the file writer first
        drop(log_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Generate { count, output } => {
            let generator = &mut config.generator;
            if let Some(count) = count {
                generator.member_count = count;
            }
            if let Some(output) = output {
                generator.output_path = output;
            }
            run_generate(generator, &mut rand::thread_rng())
                .with_context(|| format!("generating {}", generator.output_path.display()))?;
        }
        Commands::Process { input, output } => {
            let processor = &mut config.processor;
            if let Some(input) = input {
                processor.input_path = input;
            }
            if let Some(output) = output {
                processor.output_path = output;
            }
            run_process(processor).context("processing member table")?;
        }
        Commands::BulkSend { input, batch_size, delay_seconds } => {
            let bulk = &mut config.bulk_send;
            if let Some(input) = input {
                bulk.input_path = input;
            }
            if let Some(batch_size) = batch_size {
                bulk.batch_size = batch_size;
            }
            if let Some(delay_seconds) = delay_seconds {
                bulk.delay_seconds = delay_seconds;
            }
            bulk.validate()?;

            let use_case = BulkSendUseCase::new(
                Box::new(SimulatedNotifier),
                Box::new(TokioThrottle),
                bulk.batch_size,
                bulk.delay(),
            );
            let report = use_case
                .run(&bulk.input_path)
                .await
                .with_context(|| format!("bulk sending from {}", bulk.input_path.display()))?;

            println!("\n📊 Bulk send results (simulated):");
            println!("   Total members: {}", report.total);
            println!("   Batches: {}", report.batches);
            println!("   Notified: {}", report.notified);
            println!("   Skipped: {}", report.skipped);
        }
        Commands::SendSms { input, interval_seconds, retry_attempts } => {
            let sms = &mut config.sms;
            if let Some(input) = input {
                sms.input_path = input;
            }
            if let Some(interval_seconds) = interval_seconds {
                sms.send_interval_seconds = interval_seconds;
            }
            if let Some(retry_attempts) = retry_attempts {
                sms.retry_attempts = retry_attempts;
            }
            let credentials = sms.credentials()?;
            info!("Sending through device {}", credentials.device_id);

            let use_case = SendSmsUseCase::new(
                Box::new(TextBeeGateway::new(sms.base_url.clone(), credentials)),
                Box::new(TokioThrottle),
                sms.send_interval(),
                sms.country_prefix.clone(),
                sms.portal_url.clone(),
            )
            .with_retry_attempts(sms.retry_attempts);
            let summary = use_case
                .run(&sms.input_path)
                .await
                .with_context(|| format!("sending SMS from {}", sms.input_path.display()))?;

            println!("\n📊 SMS results:");
            println!("   Total: {}", summary.total);
            println!("   Sent: {}", summary.sent);
            println!("   Failed: {}", summary.failed.len());
            if !summary.failed.is_empty() {
                println!("\n⚠️  Failed recipients:");
                for failed in &summary.failed {
                    println!(
                        "   - {} {} ({}): {}",
                        failed.membership_id, failed.name, failed.phone, failed.reason
                    );
                }
            }
        }
    }
    Ok(())
}
