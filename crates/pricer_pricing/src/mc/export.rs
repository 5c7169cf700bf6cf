//! CSV export of downsampled series.
//!
//! Layout: header `time_step,<label_1>,...,<label_k>`, then one row per
//! time step. `time_step` is 1-based: row `j` holds S_j.
//!
//! Files are written to a temporary sibling and renamed into place, so a
//! reader never sees a partially written export.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::downsample::ExportSeries;

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem operation failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes `series` as CSV to any writer.
///
/// # Errors
///
/// Returns `ExportError::Csv` if a record cannot be written.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{downsample, write_csv, PathMatrix};
///
/// let series = downsample(&PathMatrix::zeros(2, 3));
/// let mut out = Vec::new();
/// write_csv(&series, &mut out).unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text, "time_step,path_0,path_1,path_2\n1,0,0,0\n2,0,0,0\n");
/// ```
pub fn write_csv<W: Write>(series: &ExportSeries, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(series.header())?;

    let mut record = Vec::with_capacity(series.num_columns() + 1);
    for (step, row) in series.rows().iter().enumerate() {
        record.clear();
        record.push((step + 1).to_string());
        record.extend(row.iter().map(f64::to_string));
        csv.write_record(&record)?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `series` to `path` atomically, creating parent directories.
///
/// # Errors
///
/// Returns `ExportError::Io` on any filesystem failure. The temporary
/// file is removed when writing fails.
pub fn export_csv(series: &ExportSeries, path: &Path) -> Result<(), ExportError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;

    let temp_name = format!(
        ".tmp_{}_{}",
        std::process::id(),
        path.file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
    );
    let temp_path = parent.join(temp_name);

    let result = write_file(series, &temp_path)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| ExportError::io(path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    debug!(
        path = %path.display(),
        rows = series.num_rows(),
        columns = series.num_columns(),
        "series exported"
    );
    Ok(())
}

fn write_file(series: &ExportSeries, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    write_csv(series, &file)?;
    file.sync_all().map_err(|e| ExportError::io(path, e))
}
