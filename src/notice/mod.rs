//! MLIT notice index module
//!
//! Reading the cached index spreadsheet, matching rows against a notice
//! number and refreshing the cache from the MLIT website.

pub mod errors;
pub mod fetcher;
pub mod reader;
pub mod types;

pub use errors::NoticeError;
pub use types::*;

pub use fetcher::{update_cache, Fetcher, UpdateOutcome};
pub use reader::read_notice_table;
