use chrono::{DateTime, FixedOffset, NaiveDate};

pub fn datetime_to_string(datetime: DateTime<FixedOffset>) -> String {
    // +05:30
    let offset = FixedOffset::east_opt(5 * 60 * 60 + 30 * 60).unwrap_or(*datetime.offset());
    datetime
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn datetime_to_string_opt(datetime: Option<DateTime<FixedOffset>>) -> Option<String> {
    datetime.map(datetime_to_string)
}

pub fn date_to_string_opt(date: Option<NaiveDate>) -> Option<String> {
    date.map(|x| x.format("%Y-%m-%d").to_string())
}

pub fn parse_date_opt(date: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    match date {
        None => Ok(None),
        Some(val) if val.trim().is_empty() => Ok(None),
        Some(val) => NaiveDate::parse_from_str(val.trim(), "%Y-%m-%d").map(Some),
    }
}

/// Lower-case the text and collapse every whitespace run into one hyphen.
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(|x| x.to_lowercase())
        .collect::<Vec<String>>()
        .join("-")
}

/// Trimmed value, or `None` when the input is missing or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Udaipur"), "udaipur");
        assert_eq!(slugify("Udaipur  City Palace"), "udaipur-city-palace");
        assert_eq!(slugify("  Taj Lake\tPalace \n"), "taj-lake-palace");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_datetime_to_string_uses_ist() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let datetime = utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(datetime_to_string(datetime), "2025-01-01 05:30:00");
        assert_eq!(datetime_to_string_opt(None), None);
    }

    #[test]
    fn test_parse_date_opt() {
        assert_eq!(parse_date_opt(None).unwrap(), None);
        assert_eq!(parse_date_opt(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_date_opt(Some("2025-03-15")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 15)
        );
        assert!(parse_date_opt(Some("15/03/2025")).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(Some(" Goa ".to_string())), Some("Goa".to_string()));
    }
}
