//! Command implementations behind the CLI
//!
//! Each command turns the recognized outcomes of its operation into a
//! user-facing message and a [`CommandStatus`]. Anything unexpected is
//! returned as an error.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::cache::CacheStore;
use crate::cleanup::{self, CleanOutcome, Confirm, Trash};
use crate::config::Config;
use crate::notice::{self, Fetcher, NoticeError, UpdateOutcome};
use crate::presenter::{self, Chooser, Opener};
use crate::query::NumeralQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// `get <number>`: look the number up in the latest snapshot and open the result
pub fn get(
    config: &Config,
    number: u64,
    chooser: &mut dyn Chooser,
    opener: &mut dyn Opener,
) -> Result<CommandStatus> {
    let store = CacheStore::new(config.cache.active_dir());
    info!("Searching notice number {} in {}", number, store.root().display());

    let Some(snapshot) = store.latest()? else {
        println!("{}.", NoticeError::CacheEmpty);
        return Ok(CommandStatus::Failure);
    };

    let table = notice::read_notice_table(&snapshot.path)
        .with_context(|| format!("Failed to parse cache file {}", snapshot.path.display()))?;
    info!("Loaded {} notices from {}", table.len(), snapshot.path.display());

    let query = NumeralQuery::new(number);
    let matches = table.matching(&query);
    info!("{} notices match '{}'", matches.len(), query.pattern());

    presenter::present(&query, &matches, &config.site.domain, chooser, opener)?;
    Ok(CommandStatus::Success)
}

/// `update [--default]`: refresh the cache from the MLIT website
pub async fn update(config: &Config, force_default: bool) -> Result<CommandStatus> {
    let store = CacheStore::new(config.cache.update_dir(force_default));
    let fetcher = Fetcher::new(config).context("Failed to build HTTP client")?;

    match notice::update_cache(&fetcher, &store).await {
        Ok(UpdateOutcome::Updated(path)) => {
            println!("Update is done! Cache file at : {}", path.display());
            Ok(CommandStatus::Success)
        }
        Ok(UpdateOutcome::AlreadyUpdated(path)) => {
            info!("Latest index already cached at {}", path.display());
            println!("Already updated.");
            Ok(CommandStatus::Success)
        }
        Err(NoticeError::AmbiguousSource { count }) => {
            warn!("Index page links {} spreadsheets", count);
            println!("Exist not one .xlsx files. Abort refresh.");
            Ok(CommandStatus::Failure)
        }
        Err(e) if e.is_network() => {
            warn!("Update failed: {}", e);
            println!("{}", e);
            Ok(CommandStatus::Failure)
        }
        Err(e) => Err(e).context("Failed to update cache"),
    }
}

/// `clean`: move the cache directories to the trash
pub fn clean(
    config: &Config,
    confirm: &mut dyn Confirm,
    trash: &dyn Trash,
) -> Result<CommandStatus> {
    match cleanup::clean(&config.cache, confirm, trash)? {
        CleanOutcome::Cleaned { .. } => Ok(CommandStatus::Success),
        CleanOutcome::Declined => Ok(CommandStatus::Failure),
    }
}
