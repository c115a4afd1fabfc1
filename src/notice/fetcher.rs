//! Index spreadsheet fetching from the MLIT website

use reqwest::{Client, Url};
use scraper::{Html, Selector};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cache::{CacheStore, WriteOutcome, SNAPSHOT_EXTENSION};
use crate::config::Config;
use crate::notice::NoticeError;

/// Result of refreshing the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A new snapshot was downloaded to this path
    Updated(PathBuf),
    /// The linked snapshot is already cached at this path
    AlreadyUpdated(PathBuf),
}

/// HTTP side of the cache refresh
pub struct Fetcher {
    client: Client,
    index_url: String,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self, NoticeError> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            index_url: config.site.index_url(),
        })
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Locate the single spreadsheet link on the index page
    pub async fn spreadsheet_url(&self) -> Result<Url, NoticeError> {
        let html = self.get_text(&self.index_url).await?;
        let links = extract_links(&html)?;
        debug!("Index page has {} links", links.len());

        let link = select_spreadsheet_link(&links)?;
        let base = parse_url(&self.index_url)?;
        base.join(link).map_err(|e| NoticeError::InvalidUrl {
            url: link.to_string(),
            message: e.to_string(),
        })
    }

    /// Download the whole body of `url`
    pub async fn download(&self, url: &Url) -> Result<Vec<u8>, NoticeError> {
        debug!("Downloading spreadsheet from: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NoticeError::HttpStatus {
                status_code: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get_text(&self, url: &str) -> Result<String, NoticeError> {
        debug!("Fetching index page: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NoticeError::HttpStatus {
                status_code: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Refresh `store` with the spreadsheet currently linked from the index page.
///
/// Nothing is written unless the index page links exactly one spreadsheet,
/// and an already cached file of the same name is never downloaded again.
pub async fn update_cache(
    fetcher: &Fetcher,
    store: &CacheStore,
) -> Result<UpdateOutcome, NoticeError> {
    info!("Checking {} for a new index spreadsheet", fetcher.index_url());

    let url = fetcher.spreadsheet_url().await?;
    let file_name = snapshot_file_name(&url)?;

    if store.contains(&file_name) {
        return Ok(UpdateOutcome::AlreadyUpdated(store.snapshot_path(&file_name)));
    }

    let content = fetcher.download(&url).await?;
    info!("Downloaded {} bytes from {}", content.len(), url);

    match store.write(&file_name, &content)? {
        WriteOutcome::Written(path) => Ok(UpdateOutcome::Updated(path)),
        WriteOutcome::AlreadyExists(path) => Ok(UpdateOutcome::AlreadyUpdated(path)),
    }
}

/// Every `href` of an `<a>` element, in document order
pub fn extract_links(html: &str) -> Result<Vec<String>, NoticeError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]")
        .map_err(|e| NoticeError::Config(format!("Invalid link selector: {:?}", e)))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect())
}

/// The one link that points at a spreadsheet
pub fn select_spreadsheet_link(links: &[String]) -> Result<&str, NoticeError> {
    let candidates: Vec<&str> = links
        .iter()
        .map(String::as_str)
        .filter(|link| link.contains(SNAPSHOT_EXTENSION))
        .collect();

    match candidates.as_slice() {
        [link] => Ok(*link),
        _ => Err(NoticeError::AmbiguousSource {
            count: candidates.len(),
        }),
    }
}

/// Basename of the spreadsheet link, used as the cache file name
pub fn snapshot_file_name(url: &Url) -> Result<String, NoticeError> {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| NoticeError::InvalidUrl {
            url: url.to_string(),
            message: "link has no file name".to_string(),
        })
}

fn parse_url(url: &str) -> Result<Url, NoticeError> {
    Url::parse(url).map_err(|e| NoticeError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })
}
