//! Notice index rows and the in-memory table they are matched against

use crate::notice::NoticeError;
use crate::query::NumeralQuery;

/// Zero-based sheet row holding the column labels; rows above it are titles
pub const HEADER_ROW: usize = 2;

/// Column labels of the MLIT notice index spreadsheet
pub struct Header;

impl Header {
    pub const TITLE: &'static str = "告示・通達等の名称";
    pub const NUMBER: &'static str = "文書番号";
    pub const DATE: &'static str = "文書年月日";
    pub const ORGANIZATION: &'static str = "組織名";
    pub const LINK: &'static str = "リンク";
    pub const URL: &'static str = "URL";
}

/// One data row of the notice index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoticeRecord {
    /// Notice title (告示・通達等の名称)
    pub title: String,
    /// Free-form document number, e.g. "国土交通省告示第百二十三号"
    pub number: Option<String>,
    /// Document date as shown in the sheet
    pub date: Option<String>,
    /// Issuing organization
    pub organization: Option<String>,
    /// Link as published, usually relative to the site domain
    pub link: Option<String>,
    /// Fully-qualified URL
    pub url: Option<String>,
}

impl NoticeRecord {
    /// URL to open for this notice.
    ///
    /// Uses the URL column when present, otherwise derives it from the link
    /// column by prefixing `domain` to relative links.
    pub fn resolved_url(&self, domain: &str) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }

        let link = self.link.as_deref()?;
        if link.starts_with("http://") || link.starts_with("https://") {
            return Some(link.to_string());
        }

        let domain = domain.trim_end_matches('/');
        if link.starts_with('/') {
            Some(format!("{}{}", domain, link))
        } else {
            Some(format!("{}/{}", domain, link))
        }
    }
}

/// Column positions located from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    title: usize,
    number: usize,
    date: Option<usize>,
    organization: Option<usize>,
    link: Option<usize>,
    url: Option<usize>,
}

impl ColumnIndex {
    fn locate(header: &[Option<String>]) -> Result<Self, NoticeError> {
        let find = |label: &str| {
            header
                .iter()
                .position(|cell| cell.as_deref().map(str::trim) == Some(label))
        };

        let columns = ColumnIndex {
            title: find(Header::TITLE).ok_or(NoticeError::MissingColumn(Header::TITLE))?,
            number: find(Header::NUMBER).ok_or(NoticeError::MissingColumn(Header::NUMBER))?,
            date: find(Header::DATE),
            organization: find(Header::ORGANIZATION),
            link: find(Header::LINK),
            url: find(Header::URL),
        };

        if columns.url.is_none() && columns.link.is_none() {
            return Err(NoticeError::MissingColumn(Header::URL));
        }

        Ok(columns)
    }

    fn record(&self, row: &[Option<String>]) -> NoticeRecord {
        let cell = |index: usize| row.get(index).cloned().flatten();
        let optional = |index: Option<usize>| index.and_then(cell);

        NoticeRecord {
            title: cell(self.title).unwrap_or_default(),
            number: cell(self.number),
            date: optional(self.date),
            organization: optional(self.organization),
            link: optional(self.link),
            url: optional(self.url),
        }
    }
}

/// Parsed notice index in source row order
#[derive(Debug, Clone, Default)]
pub struct NoticeTable {
    records: Vec<NoticeRecord>,
}

impl NoticeTable {
    /// Build a table from raw sheet rows.
    ///
    /// `rows[0]` must be the first row of the sheet. The first [`HEADER_ROW`]
    /// rows are skipped, the next one is the header and every following row
    /// that has at least one non-blank cell becomes a record.
    pub fn from_rows(rows: Vec<Vec<Option<String>>>) -> Result<Self, NoticeError> {
        let mut rows = rows.into_iter().skip(HEADER_ROW);
        let header = rows
            .next()
            .ok_or(NoticeError::MissingHeaderRow { row: HEADER_ROW + 1 })?;
        let columns = ColumnIndex::locate(&header)?;

        let records = rows
            .filter(|row| row.iter().any(Option::is_some))
            .map(|row| columns.record(&row))
            .collect();

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<NoticeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NoticeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose document number contains any form of the query, in source order
    pub fn matching(&self, query: &NumeralQuery) -> Vec<&NoticeRecord> {
        self.records
            .iter()
            .filter(|record| {
                record
                    .number
                    .as_deref()
                    .is_some_and(|number| query.matches(number))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect()
    }

    fn header() -> Vec<Option<String>> {
        cells(&[
            Header::TITLE,
            Header::NUMBER,
            Header::DATE,
            Header::ORGANIZATION,
            Header::LINK,
            Header::URL,
        ])
    }

    fn record(title: &str, number: Option<&str>) -> NoticeRecord {
        NoticeRecord {
            title: title.to_string(),
            number: number.map(str::to_string),
            url: Some(format!("https://www.mlit.go.jp/notice/{}.html", title)),
            ..Default::default()
        }
    }

    fn sample_rows() -> Vec<Vec<Option<String>>> {
        vec![
            cells(&["告示・通達データベース", "", "", "", "", ""]),
            cells(&["第123号 タイトル行", "", "", "", "", ""]),
            header(),
            cells(&[
                "建築基準法施行令の告示",
                "国土交通省告示第123号",
                "2024-04-01",
                "住宅局",
                "/notice/a.html",
                "https://www.mlit.go.jp/notice/a.html",
            ]),
            cells(&["", "", "", "", "", ""]),
            cells(&["道路法の通達", "国道第45号", "", "道路局", "/notice/b.html", ""]),
        ]
    }

    #[test]
    fn test_from_rows_skips_title_rows() {
        let table = NoticeTable::from_rows(sample_rows()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].title, "建築基準法施行令の告示");
        assert_eq!(table.records()[0].organization.as_deref(), Some("住宅局"));
        assert_eq!(table.records()[1].url, None);

        // the title row mentions 123 but must never be treated as data
        let matches = table.matching(&NumeralQuery::new(123));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "建築基準法施行令の告示");
    }

    #[test]
    fn test_missing_header_row() {
        let rows = vec![cells(&["title"]), cells(&["subtitle"])];
        assert!(matches!(
            NoticeTable::from_rows(rows),
            Err(NoticeError::MissingHeaderRow { row: 3 })
        ));
    }

    #[test]
    fn test_missing_number_column() {
        let rows = vec![
            cells(&[""]),
            cells(&[""]),
            cells(&[Header::TITLE, Header::URL]),
        ];
        assert!(matches!(
            NoticeTable::from_rows(rows),
            Err(NoticeError::MissingColumn(label)) if label == Header::NUMBER
        ));
    }

    #[test]
    fn test_missing_url_and_link_columns() {
        let rows = vec![
            cells(&[""]),
            cells(&[""]),
            cells(&[Header::TITLE, Header::NUMBER]),
        ];
        assert!(matches!(
            NoticeTable::from_rows(rows),
            Err(NoticeError::MissingColumn(label)) if label == Header::URL
        ));
    }

    #[test]
    fn test_header_labels_are_trimmed() {
        let rows = vec![
            cells(&[""]),
            cells(&[""]),
            cells(&[" 告示・通達等の名称 ", "文書番号\n", "URL"]),
            cells(&["t", "第1号", "https://example.com/1"]),
        ];
        let table = NoticeTable::from_rows(rows).unwrap();
        assert_eq!(table.records()[0].number.as_deref(), Some("第1号"));
    }

    #[test]
    fn test_matching_each_form() {
        for number in ["第123号", "百二十三", "一二三"] {
            let table = NoticeTable::from_records(vec![record("a", Some(number))]);
            assert_eq!(table.matching(&NumeralQuery::new(123)).len(), 1, "{}", number);
        }
    }

    #[test]
    fn test_matching_skips_empty_number() {
        let table = NoticeTable::from_records(vec![record("a", None)]);
        assert!(table.matching(&NumeralQuery::new(123)).is_empty());
    }

    #[test]
    fn test_matching_no_result_is_empty() {
        let table = NoticeTable::from_records(vec![
            record("a", Some("第123号")),
            record("b", Some("第45号")),
        ]);
        assert!(table.matching(&NumeralQuery::new(999_999)).is_empty());
    }

    #[test]
    fn test_matching_preserves_order_and_is_idempotent() {
        let table = NoticeTable::from_records(vec![
            record("first", Some("告示第5号")),
            record("other", Some("告示第8号")),
            record("second", Some("通達第五号")),
        ]);
        let query = NumeralQuery::new(5);

        let first: Vec<&str> = table.matching(&query).iter().map(|r| r.title.as_str()).collect();
        let second: Vec<&str> = table.matching(&query).iter().map(|r| r.title.as_str()).collect();
        assert_eq!(first, vec!["first", "second"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_matching_is_pure_disjunction() {
        let numbers = ["12", "十二", "一二", "第121号", "百十二", "第2号", "二十一"];
        let table = NoticeTable::from_records(
            numbers.iter().map(|n| record(n, Some(*n))).collect(),
        );
        let query = NumeralQuery::new(12);

        let expected: Vec<&str> = numbers
            .iter()
            .copied()
            .filter(|n| n.contains("12") || n.contains("十二") || n.contains("一二"))
            .collect();
        let actual: Vec<&str> = table
            .matching(&query)
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_resolved_url() {
        let domain = "https://www.mlit.go.jp";
        let mut record = NoticeRecord {
            link: Some("/notice/a.html".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.resolved_url(domain).as_deref(),
            Some("https://www.mlit.go.jp/notice/a.html")
        );

        record.link = Some("notice/a.html".to_string());
        assert_eq!(
            record.resolved_url("https://www.mlit.go.jp/").as_deref(),
            Some("https://www.mlit.go.jp/notice/a.html")
        );

        record.link = Some("https://elaws.e-gov.go.jp/x".to_string());
        assert_eq!(record.resolved_url(domain).as_deref(), Some("https://elaws.e-gov.go.jp/x"));

        record.url = Some("https://www.mlit.go.jp/notice/b.html".to_string());
        assert_eq!(
            record.resolved_url(domain).as_deref(),
            Some("https://www.mlit.go.jp/notice/b.html")
        );

        assert_eq!(NoticeRecord::default().resolved_url(domain), None);
    }
}
