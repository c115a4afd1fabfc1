//! Acting on lookup results: nothing, a direct browser launch, or a choice

use tracing::{debug, info};

use crate::notice::{NoticeError, NoticeRecord};
use crate::query::NumeralQuery;

/// Single-choice prompt over a list of labels
pub trait Chooser {
    /// Index of the chosen label, or `None` when the user backs out
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Result<Option<usize>, NoticeError>;
}

/// Something that can show a URL to the user
pub trait Opener {
    fn open(&mut self, url: &str) -> Result<(), NoticeError>;
}

/// Opens URLs in the user's default browser
#[derive(Debug, Default)]
pub struct BrowserOpener;

impl Opener for BrowserOpener {
    fn open(&mut self, url: &str) -> Result<(), NoticeError> {
        webbrowser::open(url).map_err(|e| NoticeError::Browser {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// What happened to a set of matching notices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    NotFound,
    Opened { title: String, url: String },
    Cancelled,
}

/// Present `matches` to the user.
///
/// No match is reported as not found, a single match is opened directly and
/// several matches are offered by title. The chosen title is resolved back
/// to the first match whose title contains it.
pub fn present(
    query: &NumeralQuery,
    matches: &[&NoticeRecord],
    domain: &str,
    chooser: &mut dyn Chooser,
    opener: &mut dyn Opener,
) -> Result<Presentation, NoticeError> {
    match matches {
        [] => {
            println!(
                "Can't find number of {}. Please check input number.",
                query.number
            );
            Ok(Presentation::NotFound)
        }
        [record] => {
            println!("Found a result. Open at browser...");
            open_record(record, domain, opener)
        }
        _ => {
            println!("Found some results. Please select yours.");
            let titles: Vec<String> = matches.iter().map(|r| r.title.clone()).collect();

            let Some(index) = chooser.choose("Select a notice", &titles)? else {
                println!("Selection cancelled.");
                return Ok(Presentation::Cancelled);
            };
            let Some(chosen) = titles.get(index) else {
                println!("Selection cancelled.");
                return Ok(Presentation::Cancelled);
            };
            debug!("Selected '{}'", chosen);

            match resolve_by_title(matches, chosen).first() {
                Some(record) => open_record(record, domain, opener),
                None => Ok(Presentation::NotFound),
            }
        }
    }
}

/// Matches whose title contains `title`, in their original order
pub fn resolve_by_title<'a>(matches: &[&'a NoticeRecord], title: &str) -> Vec<&'a NoticeRecord> {
    matches
        .iter()
        .copied()
        .filter(|record| record.title.contains(title))
        .collect()
}

fn open_record(
    record: &NoticeRecord,
    domain: &str,
    opener: &mut dyn Opener,
) -> Result<Presentation, NoticeError> {
    let url = record
        .resolved_url(domain)
        .ok_or_else(|| NoticeError::MissingUrl {
            title: record.title.clone(),
        })?;

    info!("Opening {}", url);
    opener.open(&url)?;
    println!("Done.");

    Ok(Presentation::Opened {
        title: record.title.clone(),
        url,
    })
}
