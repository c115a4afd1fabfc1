//! mikokuji: look up MLIT notices (kokuji) by number
//!
//! The notice index published on the MLIT website is cached locally as a
//! spreadsheet. Lookups match a number against the document number column
//! in arabic, formal kanji and digit-by-digit kanji form.

pub mod cache;
pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod notice;
pub mod numeral;
pub mod picker;
pub mod presenter;
pub mod query;
