//! Account statement requests

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Output format of a statement download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementFormat {
    Pdf,
    Excel,
}

impl_wire_enum_conversions!(StatementFormat {
    Pdf => "pdf",
    Excel => "excel",
});

impl StatementFormat {
    /// Media type sent in the `Accept` header.
    #[must_use]
    pub const fn accept(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// File extension used for synthesized filenames.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
        }
    }
}

/// Parameters of `GET /transactions/download`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRequest {
    pub format: StatementFormat,
    /// ISO-8601 start of the period
    pub start_date: String,
    /// ISO-8601 end of the period
    pub end_date: String,
}

impl StatementRequest {
    pub fn new(
        format: StatementFormat,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self { format, start_date: start_date.into(), end_date: end_date.into() }
    }

    /// Build a request from UTC instants, rendered with millisecond
    /// precision and a `Z` suffix (`2024-03-01T00:00:00.000Z`).
    #[must_use]
    pub fn for_range(format: StatementFormat, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(
            format,
            start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", self.format.as_str().to_string()),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
        ]
    }

    /// Filename used when the server does not provide one:
    /// `statement_<start date>_<end date>.<ext>`.
    #[must_use]
    pub fn fallback_filename(&self) -> String {
        format!(
            "statement_{}_{}.{}",
            date_prefix(&self.start_date),
            date_prefix(&self.end_date),
            self.format.extension()
        )
    }
}

/// First ten characters (`YYYY-MM-DD` of an ISO timestamp).
fn date_prefix(value: &str) -> &str {
    value.char_indices().nth(10).map_or(value, |(idx, _)| &value[..idx])
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn format_parses_from_query_value() {
        assert_eq!("excel".parse::<StatementFormat>().unwrap(), StatementFormat::Excel);
        assert_eq!("PDF".parse::<StatementFormat>().unwrap(), StatementFormat::Pdf);
        assert!("csv".parse::<StatementFormat>().is_err());
    }

    #[test]
    fn excel_maps_to_xlsx_and_spreadsheet_mime() {
        assert_eq!(StatementFormat::Excel.extension(), "xlsx");
        assert!(StatementFormat::Excel.accept().contains("spreadsheetml"));
        assert_eq!(StatementFormat::Pdf.accept(), "application/pdf");
    }

    #[test]
    fn fallback_filename_uses_date_prefixes() {
        let request = StatementRequest::new(
            StatementFormat::Excel,
            "2024-01-01T00:00:00.000Z",
            "2024-01-31T23:59:59.999Z",
        );
        assert_eq!(request.fallback_filename(), "statement_2024-01-01_2024-01-31.xlsx");
    }

    #[test]
    fn fallback_filename_tolerates_short_dates() {
        let request = StatementRequest::new(StatementFormat::Pdf, "2024-1-1", "");
        assert_eq!(request.fallback_filename(), "statement_2024-1-1_.pdf");
    }

    #[test]
    fn for_range_renders_iso_timestamps() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 12, 30, 0).unwrap();

        let request = StatementRequest::for_range(StatementFormat::Pdf, start, end);

        assert_eq!(request.start_date, "2024-03-01T00:00:00.000Z");
        assert_eq!(request.end_date, "2024-03-31T12:30:00.000Z");
        assert_eq!(
            request.query_pairs()[0],
            ("format", "pdf".to_string()),
        );
    }
}
