use chrono::{DateTime, Local, NaiveDate, SecondsFormat, TimeZone, Utc};

// utc now datetime
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn now_utc_format_time() -> String {
    now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Calendar day of `time` in the given zone.
pub fn local_day_in<Tz: TimeZone>(time: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    time.with_timezone(tz).date_naive()
}

pub fn local_day(time: &DateTime<Utc>) -> NaiveDate {
    local_day_in(time, &Local)
}

/// "Monday, 4 Mar 2024"
pub fn format_day_label(day: NaiveDate) -> String {
    day.format("%A, %-d %b %Y").to_string()
}

/// 12-hour clock, zero padded: "02:05 PM".
pub fn formatted_hh_mm_in<Tz: TimeZone>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(tz).format("%I:%M %p").to_string()
}

pub fn formatted_hh_mm(time: &DateTime<Utc>) -> String {
    formatted_hh_mm_in(time, &Local)
}

pub fn from_timestamp_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
