//! CSV export of simulation results
//!
//! A boundary concern only: the simulation itself performs no I/O. Export
//! fails loudly with a `PlannerError` if the destination cannot be written.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::PlannerError;
use crate::planner::PlannerRow;

/// Write rows as CSV to any writer, header included
pub fn write_csv<W: Write>(rows: &[PlannerRow], writer: W) -> Result<(), PlannerError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write rows as CSV to a file path
pub fn write_csv_path(rows: &[PlannerRow], path: &Path) -> Result<(), PlannerError> {
    let file = File::create(path)?;
    write_csv(rows, file)?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
