// Symbol list from a spreadsheet published as CSV
use crate::config::AppConfig;
use crate::model::FetchError;
use crate::normalizer::normalize_all;
use crate::source::traits::SymbolSource;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct SheetSource {
    client: Client,
    url: String,
    column: usize,
    has_header: bool,
}

impl SheetSource {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: config.sheets_csv_url.clone(),
            column: config.symbol_column,
            has_header: config.sheet_has_header,
        })
    }

    async fn download(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Reads one column of a CSV document. Rows too short for the column are skipped.
pub fn parse_symbols(csv_text: &str, column: usize, has_header: bool) -> Result<Vec<String>, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut raw = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| FetchError::Parse(format!("CSV row {}: {}", idx + 1, e)))?;
        match record.get(column) {
            Some(cell) => raw.push(cell.to_string()),
            None => debug!("CSV row {} has no column {}", idx + 1, column),
        }
    }

    Ok(normalize_all(raw))
}

#[async_trait::async_trait]
impl SymbolSource for SheetSource {
    async fn fetch_symbols(&self) -> Vec<String> {
        info!("Downloading symbol sheet...");
        let text = match self.download().await {
            Ok(text) => text,
            Err(e) => {
                warn!("❌ Sheet download failed: {}", e);
                return Vec::new();
            }
        };

        match parse_symbols(&text, self.column, self.has_header) {
            Ok(symbols) => {
                info!("📋 Sheet lists {} symbols", symbols.len());
                symbols
            }
            Err(e) => {
                warn!("❌ Sheet parse failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Name,Symbol,Notes
Teva,TEVA,pharma
Leumi, LUMI ,
Empty,,
Short
Elbit,ESLT.TA,defense
";

    #[test]
    fn reads_second_column_after_header() {
        let symbols = parse_symbols(SHEET, 1, true).unwrap();
        assert_eq!(symbols, vec!["TEVA", "LUMI", "ESLT.TA"]);
    }

    #[test]
    fn header_row_kept_when_sheet_has_none() {
        let symbols = parse_symbols("a,AAA\nb,BBB\n", 1, false).unwrap();
        assert_eq!(symbols, vec!["AAA", "BBB"]);
    }

    #[test]
    fn empty_document() {
        assert!(parse_symbols("", 1, true).unwrap().is_empty());
        assert!(parse_symbols("Name,Symbol\n", 1, true).unwrap().is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let symbols = parse_symbols("n,s\nx,AAA\ny,AAA\n", 1, true).unwrap();
        assert_eq!(symbols, vec!["AAA", "AAA"]);
    }
}
