use rand::Rng;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generator::generate_members;
use crate::storage::write_table;

/// Writes a fresh dummy member table. Returns the number of rows written.
pub fn run_generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<usize> {
    let members = generate_members(config.member_count, rng)?;
    write_table(&config.output_path, &members)?;
    info!(
        "Member table generated: {} ({} rows)",
        config.output_path.display(),
        members.len()
    );
    Ok(members.len())
}
