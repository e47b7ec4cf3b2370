//! Grid snapshot output.
//!
//! Plain-text dump for offline debugging: one grid row per line,
//! space-delimited 0/1 cell values. Write-only; nothing in the crate reads
//! it back.

use crate::error::Result;
use crate::grid::OccupancyGrid;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save a human-readable snapshot of the grid.
///
/// Creates parent directories as needed.
pub fn save_grid_snapshot(grid: &OccupancyGrid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    for x in 0..grid.rows() {
        let line = grid
            .row(x)
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}
