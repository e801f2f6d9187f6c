//! CSV price series.
//!
//! Reads the `date,price` layout of a pandas price export, as well
//! as exports that carry a `timestamp` column in unix seconds or
//! milliseconds. Extra columns are ignored.

use super::PriceSource;
use crate::error::DataError;
use amm_lp_domain::value_objects::price_point::PricePoint;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Header names accepted for the time column.
const TIME_COLUMNS: &[&str] = &["date", "timestamp"];
const PRICE_COLUMNS: &[&str] = &["price"];

/// Integer timestamps at or above this magnitude are read as milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Price source backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses CSV content from any reader.
    ///
    /// # Errors
    /// Returns [`DataError::MissingColumn`] if the header lacks a time or
    /// price column, and [`DataError::InvalidRow`] for the first row that
    /// cannot be parsed.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PricePoint>, DataError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
        };
        let time_idx = column(TIME_COLUMNS).ok_or(DataError::MissingColumn(TIME_COLUMNS))?;
        let price_idx = column(PRICE_COLUMNS).ok_or(DataError::MissingColumn(PRICE_COLUMNS))?;

        let mut points = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            let invalid = |reason: String| DataError::InvalidRow { line, reason };

            let raw_time = record
                .get(time_idx)
                .ok_or_else(|| invalid("missing time field".to_string()))?;
            let raw_price = record
                .get(price_idx)
                .ok_or_else(|| invalid("missing price field".to_string()))?;

            let timestamp = parse_timestamp(raw_time)
                .ok_or_else(|| invalid(format!("unrecognized timestamp `{raw_time}`")))?;
            let price = parse_price(raw_price)
                .ok_or_else(|| invalid(format!("unrecognized price `{raw_price}`")))?;

            points.push(PricePoint::new(timestamp, price));
        }

        debug!(rows = points.len(), "Parsed price rows");
        Ok(points)
    }
}

impl PriceSource for CsvPriceSource {
    fn load(&self) -> Result<Vec<PricePoint>, DataError> {
        let file = File::open(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let points = Self::parse(file)?;
        info!(path = %self.path.display(), rows = points.len(), "Loaded price series");
        Ok(points)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(value) = raw.parse::<i64>() {
        return if value.abs() >= MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(value)
        } else {
            DateTime::from_timestamp(value, 0)
        };
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_parse_date_price_layout() {
        let data = "date,price\n\
                    2024-01-01 00:00:00,2281.47\n\
                    2024-01-02 00:00:00.500,2352.10\n\
                    2024-01-03,2210\n";
        let points = CsvPriceSource::parse(data.as_bytes()).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(
            points[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(points[0].price.value, dec!(2281.47));
        assert_eq!(points[1].timestamp.timestamp_subsec_millis(), 500);
        assert_eq!(
            points[2].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_unix_timestamps() {
        let data = "timestamp,price,market_cap\n\
                    1704067200000,2281.47,274000000000\n\
                    1704153600,2.35e3,275000000000\n";
        let points = CsvPriceSource::parse(data.as_bytes()).unwrap();

        let expected_first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(points[0].timestamp, expected_first);
        assert_eq!(points[1].timestamp, expected_first + chrono::Duration::days(1));
        assert_eq!(points[1].price.value, dec!(2350));
    }

    #[test]
    fn test_parse_rfc3339() {
        let data = "Date,Price\n2024-06-01T12:00:00+02:00,1.5\n";
        let points = CsvPriceSource::parse(data.as_bytes()).unwrap();
        assert_eq!(
            points[0].timestamp,
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_price_column() {
        let data = "date,close\n2024-01-01,1\n";
        assert!(matches!(
            CsvPriceSource::parse(data.as_bytes()),
            Err(DataError::MissingColumn(names)) if names == PRICE_COLUMNS
        ));
    }

    #[test]
    fn test_missing_time_column_names_accepted_headers() {
        let data = "time,price\n2024-01-01,1\n";
        let err = CsvPriceSource::parse(data.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing column, expected one of: date, timestamp"
        );
    }

    #[test]
    fn test_invalid_row_reports_line() {
        let data = "date,price\n2024-01-01,100\n2024-01-02,abc\n";
        match CsvPriceSource::parse(data.as_bytes()) {
            Err(DataError::InvalidRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,price").unwrap();
        writeln!(file, "2024-01-01 00:00:00,100.5").unwrap();
        writeln!(file, "2024-01-02 00:00:00,101.25").unwrap();

        let source = CsvPriceSource::new(file.path());
        let points = source.load().unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].price.value, dec!(101.25));
    }

    #[test]
    fn test_load_missing_file() {
        let source = CsvPriceSource::new("/nonexistent/prices.csv");
        assert!(matches!(source.load(), Err(DataError::Io { .. })));
    }
}
