//! CSV export of the capture buffer and of stored favorites.
//!
//! Serialization is pure ([`session_csv`], [`favorite_csv`]); [`Exporter`]
//! only adds the file write into the download directory.

use crate::model::{ExportError, Favorite, PayloadError};
use crate::state::capture::{CaptureBuffer, HeldColumn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the session export.
pub const SESSION_FILE_NAME: &str = "busqueda.csv";

/// Layout of `busqueda.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionExportFormat {
    /// Every held value on a single comma-joined line, unquoted.
    #[default]
    Flat,
    /// One quoted CSV column per held header, header row first.
    Columns,
}

/// Quote a CSV field, doubling embedded quotes.
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize held columns in `format`.
pub fn session_csv(columns: &[HeldColumn], format: SessionExportFormat) -> String {
    match format {
        SessionExportFormat::Flat => columns
            .iter()
            .flat_map(|c| c.values().iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(","),
        SessionExportFormat::Columns => {
            let height = columns.iter().map(|c| c.values().len()).max().unwrap_or(0);
            let mut lines = Vec::with_capacity(height + 1);
            lines.push(join_quoted(columns.iter().map(HeldColumn::label)));
            for row in 0..height {
                lines.push(join_quoted(
                    columns
                        .iter()
                        .map(|c| c.values().get(row).map(String::as_str).unwrap_or("")),
                ));
            }
            lines.join("\n")
        }
    }
}

fn join_quoted<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(quote_field).collect::<Vec<_>>().join(",")
}

/// One quoted value per line.
pub fn favorite_csv(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote_field(v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strictly parse a favorite's stored payload as a JSON array of strings.
///
/// # Errors
///
/// [`PayloadError::Empty`] for an absent or blank payload,
/// [`PayloadError::Malformed`] when it is not an array of strings.
pub fn parse_favorite_payload(payload: Option<&str>) -> Result<Vec<String>, PayloadError> {
    let raw = payload.map(str::trim).filter(|p| !p.is_empty());
    let raw = raw.ok_or(PayloadError::Empty)?;
    serde_json::from_str(raw).map_err(|e| PayloadError::Malformed(e.to_string()))
}

/// File-system safe stem for a favorite's export file.
pub fn favorite_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        crate::model::FALLBACK_FAVORITE_NAME.to_string()
    } else {
        stem
    }
}

/// Writes export files into a directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    download_dir: PathBuf,
    format: SessionExportFormat,
}

impl Exporter {
    /// Exporter writing into `download_dir`.
    pub fn new(download_dir: impl Into<PathBuf>, format: SessionExportFormat) -> Self {
        Self {
            download_dir: download_dir.into(),
            format,
        }
    }

    /// Target directory.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Session export layout.
    pub fn format(&self) -> SessionExportFormat {
        self.format
    }

    /// Write `busqueda.csv` and reset the buffer.
    ///
    /// An empty buffer writes nothing and returns `Ok(None)`; its query list
    /// is still cleared. On a write error the buffer is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the directory or file cannot be written.
    pub fn export_session(&self, buffer: &mut CaptureBuffer) -> Result<Option<PathBuf>, ExportError> {
        if buffer.is_empty() {
            buffer.reset();
            return Ok(None);
        }

        let csv = session_csv(buffer.columns(), self.format);
        let path = self.write(SESSION_FILE_NAME, &csv)?;
        let taken = buffer.take();
        tracing::info!(
            path = %path.display(),
            columns = taken.columns.len(),
            queries = taken.queries.len(),
            "session exported"
        );
        Ok(Some(path))
    }

    /// Write `<nombre>.csv` for a favorite.
    ///
    /// A null, blank, empty or unparseable payload is a silent no-op
    /// returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the directory or file cannot be written.
    pub fn export_favorite(&self, favorite: &Favorite) -> Result<Option<PathBuf>, ExportError> {
        let values = match parse_favorite_payload(favorite.data.as_deref()) {
            Ok(values) if !values.is_empty() => values,
            Ok(_) => return Ok(None),
            Err(reason) => {
                tracing::debug!(nombre = %favorite.nombre, %reason, "favorite has nothing to export");
                return Ok(None);
            }
        };

        let file_name = format!("{}.csv", favorite_file_stem(&favorite.nombre));
        let path = self.write(&file_name, &favorite_csv(&values))?;
        tracing::info!(path = %path.display(), rows = values.len(), "favorite exported");
        Ok(Some(path))
    }

    fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.download_dir).map_err(|source| {
            ExportError::DirectoryCreation {
                path: self.download_dir.clone(),
                source,
            }
        })?;
        let path = self.download_dir.join(file_name);
        std::fs::write(&path, contents).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
