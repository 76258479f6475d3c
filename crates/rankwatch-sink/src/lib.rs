//! Append-only CSV output for scrape results.

pub mod layout;
pub mod naming;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

pub use layout::{ColumnGroup, CsvLayout};
pub use naming::{timestamped_file_name, APP_PAGE_FILE, TRACKED_RANKS_FILE};
pub use writer::CsvSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create output directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {}: {source}", path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row has {got} columns, layout expects {expected}")]
    RowWidth { expected: usize, got: usize },
}
