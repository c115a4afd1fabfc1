//! Notice lookup error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoticeError {
    #[error("Cache is empty. Run 'mikokuji update'")]
    CacheEmpty,

    #[error("Expected exactly one .xlsx link on the index page, found {count}")]
    AmbiguousSource { count: usize },

    #[error("Column '{0}' not found in the index spreadsheet header")]
    MissingColumn(&'static str),

    #[error("Index spreadsheet has no header row at row {row}")]
    MissingHeaderRow { row: usize },

    #[error("Index spreadsheet {path} has no worksheet")]
    NoWorksheet { path: PathBuf },

    #[error("Failed to read spreadsheet {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Index page returned status {status_code} for {url}")]
    HttpStatus { status_code: u16, url: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to move {path} to trash: {message}")]
    Trash { path: PathBuf, message: String },

    #[error("Notice '{title}' has no URL or link")]
    MissingUrl { title: String },

    #[error("Failed to open browser for {url}: {message}")]
    Browser { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NoticeError {
    /// Transport-level failures that the update command reports instead of raising
    pub fn is_network(&self) -> bool {
        matches!(self, NoticeError::Http(_) | NoticeError::HttpStatus { .. })
    }
}
