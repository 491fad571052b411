//! JSON results file
//!
//! The file holds a single array of result objects, pretty-printed with
//! two-space indentation and terminated by a newline.

use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use crate::scrape::{ResultSet, ScrapeResult};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes results to a JSON file
#[derive(Debug, Clone)]
pub struct JsonOutputHandler {
    path: PathBuf,
}

impl JsonOutputHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonOutputHandler {
    fn write_results(&self, results: &ResultSet) -> OutputResult<()> {
        write_results_json(results, &self.path)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Read {
        path: path.display().to_string(),
        source,
    }
}

/// I/O failures surfaced through serde_json keep their I/O classification
fn serialize_error(path: &Path, e: serde_json::Error) -> OutputError {
    if e.is_io() {
        write_error(path)(e.into())
    } else {
        OutputError::Format(e)
    }
}

fn deserialize_error(path: &Path, e: serde_json::Error) -> OutputError {
    if e.is_io() {
        read_error(path)(e.into())
    } else {
        OutputError::Format(e)
    }
}

/// Writes a result set to `output_path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_results_json(results: &ResultSet, output_path: &Path) -> OutputResult<()> {
    let file = File::create(output_path).map_err(write_error(output_path))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, results)
        .map_err(|e| serialize_error(output_path, e))?;
    writer.write_all(b"\n").map_err(write_error(output_path))?;
    writer.flush().map_err(write_error(output_path))?;

    tracing::debug!(
        "Wrote {} results to {}",
        results.len(),
        output_path.display()
    );

    Ok(())
}

/// Reads a results file written by [`write_results_json`]
pub fn load_results_json(path: &Path) -> OutputResult<Vec<ScrapeResult>> {
    let file = File::open(path).map_err(read_error(path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| deserialize_error(path, e))
}
