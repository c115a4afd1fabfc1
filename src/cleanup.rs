//! Moving cache directories to the trash

use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

use crate::config::CacheConfig;
use crate::notice::NoticeError;

/// Yes/no question to the user
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, NoticeError>;
}

/// Recoverable removal of a directory
pub trait Trash {
    fn trash(&self, path: &Path) -> Result<(), NoticeError>;
}

/// Asks on stdout and reads the answer from stdin; anything but y/yes declines
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, NoticeError> {
        print!("{} [y/N]: ", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        let answer = input.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// The desktop trash of the current user
#[derive(Debug, Default)]
pub struct SystemTrash;

impl Trash for SystemTrash {
    fn trash(&self, path: &Path) -> Result<(), NoticeError> {
        trash::delete(path).map_err(|e| NoticeError::Trash {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// State of one cache directory after cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Trashed,
    AlreadyClean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    Cleaned {
        /// `None` when no override directory is configured
        user: Option<DirStatus>,
        default: DirStatus,
    },
    /// The user declined; nothing was touched
    Declined,
}

/// Move the override and default cache directories to the trash.
///
/// An existing override directory is only trashed after confirmation, and
/// declining leaves both directories alone.
pub fn clean(
    cache: &CacheConfig,
    confirm: &mut dyn Confirm,
    trash: &dyn Trash,
) -> Result<CleanOutcome, NoticeError> {
    let user = match cache.user_dir.as_deref() {
        Some(dir) if dir.exists() => {
            let prompt = format!(
                "You are using a custom cache directory ({}). Do you want to continue?",
                dir.display()
            );
            if !confirm.confirm(&prompt)? {
                println!("Aborted!");
                return Ok(CleanOutcome::Declined);
            }
            trash.trash(dir)?;
            info!("Moved {} to trash", dir.display());
            println!("User cache is moved to Trash.");
            Some(DirStatus::Trashed)
        }
        Some(_) => {
            println!("User cache is already cleaned.");
            Some(DirStatus::AlreadyClean)
        }
        None => None,
    };

    let default = if cache.default_dir.exists() {
        trash.trash(&cache.default_dir)?;
        info!("Moved {} to trash", cache.default_dir.display());
        println!("Default cache is moved to Trash.");
        DirStatus::Trashed
    } else {
        println!("Default cache is already cleaned.");
        DirStatus::AlreadyClean
    };

    println!("Cleaning is all done!");
    Ok(CleanOutcome::Cleaned { user, default })
}
