use tracing::info;

use crate::config::ProcessorConfig;
use crate::constants::PREVIEW_ROWS;
use crate::error::Result;
use crate::processor::{process_members, CLEAN_COLUMN, LAST4_COLUMN, PHONE_COLUMN};
use crate::storage::{read_records, write_records};

/// Adds `phoneno_clean` and `phoneno_last4` to the input table and writes the result.
///
/// Only `phoneno` is required; every other input column is carried through.
pub fn run_process(config: &ProcessorConfig) -> Result<usize> {
    let (headers, records) = read_records(&config.input_path, &[PHONE_COLUMN])?;
    info!("Loaded {} members from {}", records.len(), config.input_path.display());

    let (headers, processed) = process_members(&headers, &records)?;
    let column = |name: &str| headers.iter().position(|h| h == name);
    if let (Some(raw), Some(clean), Some(last4)) =
        (column(PHONE_COLUMN), column(CLEAN_COLUMN), column(LAST4_COLUMN))
    {
        for record in processed.iter().take(PREVIEW_ROWS) {
            info!(
                "phoneno={} phoneno_clean={} phoneno_last4={}",
                record.get(raw).unwrap_or(""),
                record.get(clean).unwrap_or(""),
                record.get(last4).unwrap_or("")
            );
        }
    }

    write_records(&config.output_path, &headers, &processed)?;
    info!("Processed file saved as: {}", config.output_path.display());
    Ok(processed.len())
}
