use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::layout::CsvLayout;
use crate::SinkError;

/// Appends rows to one CSV file, writing the layout's header only once.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
    layout: CsvLayout,
}

impl CsvSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, layout: CsvLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `rows`, creating the parent directory and header as needed.
    ///
    /// Every row is checked against the layout width before the file is
    /// touched, so a bad row never leaves a partial write behind.
    ///
    /// # Errors
    ///
    /// - [`SinkError::RowWidth`] if any row has the wrong number of columns.
    /// - [`SinkError::DirectoryCreateFailed`] if the parent directory cannot be created.
    /// - [`SinkError::FileOpenFailed`] if the file cannot be opened for append.
    /// - [`SinkError::WriteFailed`] on any write or flush failure.
    pub fn append(&self, rows: &[Vec<String>]) -> Result<usize, SinkError> {
        let expected = self.layout.width();
        if let Some(row) = rows.iter().find(|row| row.len() != expected) {
            return Err(SinkError::RowWidth {
                expected,
                got: row.len(),
            });
        }

        self.ensure_parent_dir()?;
        let mut file = self.open_for_append()?;
        let needs_header = file
            .metadata()
            .map_err(|source| SinkError::FileOpenFailed {
                path: self.path.clone(),
                source,
            })?
            .len()
            == 0;

        if needs_header && self.layout.leading_blank_line() {
            file.write_all(b"\n")
                .map_err(|e| self.write_failed(e.into()))?;
        }

        let mut writer = WriterBuilder::new().flexible(true).from_writer(file);
        if needs_header {
            for header in self.layout.header_rows() {
                writer
                    .write_record(&header)
                    .map_err(|e| self.write_failed(e))?;
            }
            tracing::debug!(path = %self.path.display(), "wrote csv header");
        }
        for row in rows {
            writer.write_record(row).map_err(|e| self.write_failed(e))?;
        }
        writer.flush().map_err(|e| self.write_failed(e.into()))?;

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "appended csv rows");
        Ok(rows.len())
    }

    fn ensure_parent_dir(&self) -> Result<(), SinkError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|source| SinkError::DirectoryCreateFailed {
                    path: parent.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    fn open_for_append(&self) -> Result<File, SinkError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| SinkError::FileOpenFailed {
                path: self.path.clone(),
                source,
            })
    }

    fn write_failed(&self, source: csv::Error) -> SinkError {
        SinkError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
