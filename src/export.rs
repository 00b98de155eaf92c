use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use stopwatch_core::format_hms_cs;
use thiserror::Error;

use crate::stopwatch::Lap;

pub const EXPORT_FILE_NAME: &str = "stopwatch_laps.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There are no laps to export.")]
    NoLaps,

    #[error("failed to encode lap table")]
    Csv(#[from] csv::Error),

    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct LapRecord {
    #[serde(rename = "Lap Number")]
    number: usize,
    #[serde(rename = "Lap Time")]
    lap_time: String,
    #[serde(rename = "Total Time")]
    total_time: String,
}

/// Write the lap table, oldest lap first, header included.
pub fn write_laps<W: Write>(laps: &[Lap], writer: W) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for (index, lap) in laps.iter().enumerate() {
        out.serialize(LapRecord {
            number: index + 1,
            lap_time: format_hms_cs(lap.lap_ms),
            total_time: format_hms_cs(lap.total_ms),
        })?;
    }
    // An empty table still gets its header.
    if laps.is_empty() {
        out.write_record(["Lap Number", "Lap Time", "Total Time"])?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `dir/stopwatch_laps.csv`, replacing a previous export.
///
/// Refuses without touching the filesystem when there are no laps.
pub fn export_laps(laps: &[Lap], dir: &Path) -> Result<PathBuf, ExportError> {
    if laps.is_empty() {
        return Err(ExportError::NoLaps);
    }

    let mut buf = Vec::new();
    write_laps(laps, &mut buf)?;

    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, buf).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("exported {} laps to {}", laps.len(), path.display());
    Ok(path)
}
