use chrono::{DateTime, FixedOffset, NaiveDate};

const DISPLAY_OFFSET_SECS: i32 = 6 * 60 * 60; // +0600

pub fn datetime_to_string(datetime: DateTime<FixedOffset>) -> String {
    match FixedOffset::east_opt(DISPLAY_OFFSET_SECS) {
        Some(offset) => datetime.with_timezone(&offset),
        None => datetime,
    }
    .format("%Y-%m-%d %H:%M:%S")
    .to_string()
}

pub fn datetime_to_string_opt(datetime: Option<DateTime<FixedOffset>>) -> Option<String> {
    datetime.map(datetime_to_string)
}

pub fn date_to_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
