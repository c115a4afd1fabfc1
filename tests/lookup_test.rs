//! End-to-end tests: refresh the cache from a mock site, then look notices up

use mikokuji::commands::{self, CommandStatus};
use mikokuji::config::{CacheConfig, Config, HttpConfig, SiteConfig};
use mikokuji::notice::{Header, NoticeError};
use mikokuji::presenter::{Chooser, Opener};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPREADSHEET_PATH: &str = "/notice/content/001733000.xlsx";

/// (title, document number, url)
const ROWS: &[(&str, &str, &str)] = &[
    ("建築基準法施行令第百二十三条の告示", "国土交通省告示第123号", "https://www.mlit.go.jp/notice/123.html"),
    ("道路構造令の通達", "国道企第5号", "https://www.mlit.go.jp/notice/road5.html"),
    ("港湾法の告示", "国土交通省告示第五号", "https://www.mlit.go.jp/notice/port5.html"),
    ("鉄道事業法の通達", "", "https://www.mlit.go.jp/notice/rail.html"),
    ("航空法の告示", "国土交通省告示第四五号", "https://www.mlit.go.jp/notice/air45.html"),
];

fn index_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "告示・通達データベース")?;
    worksheet.write_string(1, 0, "令和6年4月1日更新")?;

    let labels = [
        Header::TITLE,
        Header::NUMBER,
        Header::DATE,
        Header::ORGANIZATION,
        Header::LINK,
        Header::URL,
    ];
    for (col, label) in labels.iter().enumerate() {
        worksheet.write_string(2, col as u16, *label)?;
    }

    for (i, (title, number, url)) in ROWS.iter().enumerate() {
        let row = 3 + i as u32;
        worksheet.write_string(row, 0, *title)?;
        if !number.is_empty() {
            worksheet.write_string(row, 1, *number)?;
        }
        worksheet.write_string(row, 3, "大臣官房")?;
        worksheet.write_string(row, 5, *url)?;
    }

    workbook.save_to_buffer()
}

struct ScriptedChooser {
    answer: Option<usize>,
    offered: Vec<String>,
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, _prompt: &str, choices: &[String]) -> Result<Option<usize>, NoticeError> {
        self.offered = choices.to_vec();
        Ok(self.answer)
    }
}

#[derive(Default)]
struct RecordingOpener {
    opened: Vec<String>,
}

impl Opener for RecordingOpener {
    fn open(&mut self, url: &str) -> Result<(), NoticeError> {
        self.opened.push(url.to_string());
        Ok(())
    }
}

fn config_for(domain: String, cache_dir: PathBuf) -> Config {
    Config {
        cache: CacheConfig {
            user_dir: None,
            default_dir: cache_dir,
        },
        site: SiteConfig {
            domain,
            ..SiteConfig::default()
        },
        http: HttpConfig::default(),
        log_file: None,
    }
}

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;
    let index_html = format!(
        r#"<html><body>
            <a href="/index.html">トップ</a>
            <a href="{}">告示・通達一覧(Excel)</a>
            <a href="/notice/content/list.pdf">一覧(PDF)</a>
        </body></html>"#,
        SPREADSHEET_PATH
    );

    Mock::given(method("GET"))
        .and(path("/notice/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_html))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SPREADSHEET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(index_workbook().unwrap()))
        .mount(&server)
        .await;

    server
}

async fn updated_config(server: &MockServer, temp_dir: &TempDir) -> Config {
    let config = config_for(server.uri(), temp_dir.path().join("cache"));
    let status = commands::update(&config, false).await.unwrap();
    assert_eq!(status, CommandStatus::Success);
    config
}

fn chooser(answer: Option<usize>) -> ScriptedChooser {
    ScriptedChooser {
        answer,
        offered: Vec::new(),
    }
}

#[test]
fn test_get_with_empty_cache_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for("https://www.mlit.go.jp".to_string(), temp_dir.path().join("cache"));
    let mut chooser = chooser(None);
    let mut opener = RecordingOpener::default();

    let status = commands::get(&config, 123, &mut chooser, &mut opener).unwrap();
    assert_eq!(status, CommandStatus::Failure);
    assert!(opener.opened.is_empty());
}

#[tokio::test]
async fn test_update_then_get_single_match() {
    let server = mock_site().await;
    let temp_dir = TempDir::new().unwrap();
    let config = updated_config(&server, &temp_dir).await;
    assert!(temp_dir.path().join("cache").join("001733000.xlsx").exists());

    let mut chooser = chooser(None);
    let mut opener = RecordingOpener::default();
    let status = commands::get(&config, 123, &mut chooser, &mut opener).unwrap();

    assert_eq!(status, CommandStatus::Success);
    assert_eq!(opener.opened, vec!["https://www.mlit.go.jp/notice/123.html"]);
    assert!(chooser.offered.is_empty());
}

#[tokio::test]
async fn test_second_update_is_already_updated() {
    let server = mock_site().await;
    let temp_dir = TempDir::new().unwrap();
    let config = updated_config(&server, &temp_dir).await;

    let status = commands::update(&config, false).await.unwrap();
    assert_eq!(status, CommandStatus::Success);
}

#[tokio::test]
async fn test_get_multiple_matches_offers_titles_in_order() {
    let server = mock_site().await;
    let temp_dir = TempDir::new().unwrap();
    let config = updated_config(&server, &temp_dir).await;

    let mut chooser = chooser(Some(1));
    let mut opener = RecordingOpener::default();
    let status = commands::get(&config, 5, &mut chooser, &mut opener).unwrap();

    assert_eq!(status, CommandStatus::Success);
    assert_eq!(
        chooser.offered,
        vec![
            "道路構造令の通達",
            "港湾法の告示",
            "航空法の告示",
        ]
    );
    assert_eq!(opener.opened, vec!["https://www.mlit.go.jp/notice/port5.html"]);
}

#[tokio::test]
async fn test_get_not_found_succeeds() {
    let server = mock_site().await;
    let temp_dir = TempDir::new().unwrap();
    let config = updated_config(&server, &temp_dir).await;

    let mut chooser = chooser(None);
    let mut opener = RecordingOpener::default();
    let status = commands::get(&config, 999_999, &mut chooser, &mut opener).unwrap();

    assert_eq!(status, CommandStatus::Success);
    assert!(opener.opened.is_empty());
}

#[tokio::test]
async fn test_update_with_unreachable_site_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    // nothing listens on port 9 of localhost
    let config = config_for("http://127.0.0.1:9".to_string(), temp_dir.path().join("cache"));

    let status = commands::update(&config, false).await.unwrap();
    assert_eq!(status, CommandStatus::Failure);
    assert!(!temp_dir.path().join("cache").exists());
}

#[tokio::test]
async fn test_update_default_flag_ignores_override() {
    let server = mock_site().await;
    let temp_dir = TempDir::new().unwrap();
    let mut config = config_for(server.uri(), temp_dir.path().join("default"));
    config.cache.user_dir = Some(temp_dir.path().join("user"));

    let status = commands::update(&config, true).await.unwrap();
    assert_eq!(status, CommandStatus::Success);
    assert!(temp_dir.path().join("default").join("001733000.xlsx").exists());
    assert!(!temp_dir.path().join("user").exists());
}
