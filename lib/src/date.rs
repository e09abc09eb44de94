use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const PT_MONTHS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.",
    "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a front-matter date into epoch milliseconds. Dates without an
/// offset are taken as UTC. Returns `None` for anything unrecognised.
///
/// ```rust
/// use quire::date::parse_timestamp;
///
/// assert_eq!(parse_timestamp("2024-01-01"), Some(1_704_067_200_000));
/// assert_eq!(parse_timestamp("2024-01-01T03:00:00-03:00"), Some(1_704_088_800_000));
/// assert_eq!(parse_timestamp("2024-01-01 12:30"), Some(1_704_112_200_000));
/// assert_eq!(parse_timestamp("ontem"), None);
/// ```
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.timestamp_millis());
    }

    if let Ok(datetime) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z") {
        return Some(datetime.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc().timestamp_millis())
}

/// Renders `timestamp` (epoch milliseconds, UTC) for the site's language:
/// `01 de jan. de 2024` for Portuguese, `Jan 01, 2024` otherwise. Returns an
/// empty string for `0`, the "no date" marker.
pub fn format_timestamp(timestamp: i64, lang: &str) -> String {
    if timestamp == 0 {
        return String::new();
    }

    let Some(datetime) = DateTime::<Utc>::from_timestamp_millis(timestamp) else {
        return String::new();
    };

    let month = datetime.month0() as usize;
    if lang.get(..2).is_some_and(|l| l.eq_ignore_ascii_case("pt")) {
        format!("{:02} de {} de {}", datetime.day(), PT_MONTHS[month], datetime.year())
    } else {
        format!("{} {:02}, {}", EN_MONTHS[month], datetime.day(), datetime.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_in_portuguese_and_english() {
        let june = parse_timestamp("2024-06-01").unwrap();
        assert_eq!(format_timestamp(june, "pt-BR"), "01 de jun. de 2024");
        assert_eq!(format_timestamp(june, "en-US"), "Jun 01, 2024");

        let may = parse_timestamp("2023-05-17T22:10:00Z").unwrap();
        assert_eq!(format_timestamp(may, "pt-BR"), "17 de mai. de 2023");
    }

    #[test]
    fn missing_dates_format_empty() {
        assert_eq!(format_timestamp(0, "pt-BR"), "");
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
        assert_eq!(parse_timestamp("32/01/2024"), None);
    }

    #[test]
    fn fractional_and_offset_forms() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:00.500"), Some(1_704_067_200_500));
        assert_eq!(parse_timestamp("2024-01-01 00:00:00 +0000"), Some(1_704_067_200_000));
    }
}
