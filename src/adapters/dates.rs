use chrono::NaiveDate;

/// Formats accepted for assignment dates, tried in order.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%a, %d %b %Y",
    "%d %b %Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
];

#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    pub fn new(formats: &[String]) -> Self {
        if formats.is_empty() {
            return Self::default();
        }
        Self {
            formats: formats.to_vec(),
        }
    }

    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        self.formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_common_formats() {
        let parser = DateParser::default();

        assert_eq!(parser.parse("2023-01-05"), Some(ymd(2023, 1, 5)));
        assert_eq!(parser.parse("2023/01/05"), Some(ymd(2023, 1, 5)));
        assert_eq!(parser.parse("2023.01.05"), Some(ymd(2023, 1, 5)));
        assert_eq!(parser.parse("20230105"), Some(ymd(2023, 1, 5)));
        assert_eq!(parser.parse("Sun, 1 Jan 2023"), Some(ymd(2023, 1, 1)));
        assert_eq!(parser.parse("05/01/2023"), Some(ymd(2023, 1, 5)));
        assert_eq!(parser.parse("January 5, 2023"), Some(ymd(2023, 1, 5)));
    }

    #[test]
    fn test_rejects_garbage() {
        let parser = DateParser::default();

        assert_eq!(parser.parse("yesterday"), None);
        assert_eq!(parser.parse("2023-13-01"), None);
    }

    #[test]
    fn test_custom_formats_replace_defaults() {
        let parser = DateParser::new(&["%m-%d-%Y".to_string()]);

        assert_eq!(parser.parse("01-05-2023"), Some(ymd(2023, 1, 5)));
        assert_eq!(parser.parse("2023-01-05"), None);
    }
}
