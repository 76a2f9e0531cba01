//! Timestamp parsing and date column standardization.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::{DataType, IntoColumn, NamedFrom, Series, TimeUnit};
use tracing::debug;

use retail_model::{ColumnKind, DateReport};

use crate::data_utils::string_values;
use crate::error::TransformError;
use crate::frame::CleanFrame;

/// Parse a timestamp in any of the accepted layouts.
///
/// Month-first is tried before day-first, so `01/02/2024` is January 2nd.
/// Date-only values resolve to midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_datetime(trimmed)
        .or_else(|| try_parse_date(trimmed).map(|date| date.and_time(NaiveTime::MIN)))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S", // US, as in the retail export
        "%m/%d/%Y %H:%M",
        "%d/%m/%Y %H:%M:%S", // European
        "%d/%m/%Y %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
        "%d-%b-%Y %H:%M",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%m/%d/%Y",
        "%d/%m/%Y",
        "%Y/%m/%d",
        "%d-%b-%Y",
        "%d-%B-%Y",
        "%d.%m.%Y",
        "%b %d, %Y",
        "%d %b %Y",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Parse the named column into a millisecond `Datetime` column.
///
/// Rows whose value does not parse are dropped. An absent column yields
/// [`TransformError::MissingOptionalColumn`] and leaves the frame as is.
pub fn standardize_dates(frame: &mut CleanFrame, column: &str) -> Result<DateReport, TransformError> {
    if !frame.has_column(column) {
        return Err(TransformError::MissingOptionalColumn {
            column: column.to_string(),
        });
    }

    let values = string_values(frame.data(), column)?;
    let parsed: Vec<Option<i64>> = values
        .iter()
        .map(|value| {
            value
                .as_deref()
                .and_then(parse_timestamp)
                .map(|timestamp| timestamp.and_utc().timestamp_millis())
        })
        .collect();

    let keep: Vec<bool> = parsed.iter().map(Option::is_some).collect();
    for (row, _) in keep.iter().enumerate().filter(|(_, ok)| !**ok) {
        debug!(column, row, "unparsable timestamp");
    }

    let series = Series::new(column.into(), parsed)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    frame.set_column(series.into_column(), ColumnKind::DateTime)?;
    let rows_dropped = frame.retain_rows(&keep)?;

    Ok(DateReport {
        column: column.to_string(),
        parsed: frame.height(),
        rows_dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_retail_export_layout() {
        assert_eq!(parse_timestamp("12/1/2010 8:26"), Some(at(2010, 12, 1, 8, 26, 0)));
        assert_eq!(
            parse_timestamp("12/09/2011 12:50:00"),
            Some(at(2011, 12, 9, 12, 50, 0))
        );
    }

    #[test]
    fn parses_iso_variants() {
        assert_eq!(
            parse_timestamp("2011-12-09T12:50:00"),
            Some(at(2011, 12, 9, 12, 50, 0))
        );
        assert_eq!(
            parse_timestamp("2011-12-09 12:50"),
            Some(at(2011, 12, 9, 12, 50, 0))
        );
        assert_eq!(parse_timestamp("2011-12-09"), Some(at(2011, 12, 9, 0, 0, 0)));
    }

    #[test]
    fn day_first_only_when_month_first_fails() {
        assert_eq!(parse_timestamp("01/02/2024"), Some(at(2024, 1, 2, 0, 0, 0)));
        assert_eq!(parse_timestamp("13/02/2024"), Some(at(2024, 2, 13, 0, 0, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }
}
