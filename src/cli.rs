use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mikokuji")]
#[command(about = "Search MLIT notices (https://www.mlit.go.jp/notice/index.html) by number and open them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Search the cached index for a notice number and open the match
    Get {
        /// Notice number to search for
        number: u64,
    },

    /// Download the latest index spreadsheet from the MLIT website
    Update {
        /// Use the default cache directory even if MIKOKUJI_CACHE_DIR is set
        #[arg(long)]
        default: bool,
    },

    /// Move cached index files to the trash
    Clean,
}
