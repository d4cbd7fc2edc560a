use crate::error::{NotifyError, Result};

/// Splits `rows` into contiguous batches of `batch_size`, the last one possibly shorter.
///
/// Yields `rows.len() / batch_size` full batches plus one remainder batch
/// when the length is not a multiple. An empty input yields no batches.
pub fn partition<T>(rows: &[T], batch_size: usize) -> Result<Vec<&[T]>> {
    if batch_size == 0 {
        return Err(NotifyError::Config("batch_size must be at least 1".to_string()));
    }
    Ok(rows.chunks(batch_size).collect())
}
