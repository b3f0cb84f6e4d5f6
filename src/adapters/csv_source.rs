use crate::adapters::dates::DateParser;
use crate::domain::model::AssignmentRecord;
use crate::utils::error::{OverlapError, Result};
use chrono::NaiveDate;
use std::io::Read;

const OPEN_END_MARKER: &str = "null";

/// Reads `EmpID, ProjectID, DateFrom, DateTo` rows into assignment records.
///
/// An empty or `NULL` end date means the assignment is still running and is
/// resolved to the reference date given at construction.
#[derive(Debug, Clone)]
pub struct CsvAssignmentSource {
    has_headers: bool,
    delimiter: u8,
    dates: DateParser,
    reference_date: NaiveDate,
}

impl CsvAssignmentSource {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            has_headers: false,
            delimiter: b',',
            dates: DateParser::default(),
            reference_date,
        }
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_date_parser(mut self, dates: DateParser) -> Self {
        self.dates = dates;
        self
    }

    pub fn read<R: Read>(&self, input: R) -> Result<Vec<AssignmentRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            if row.iter().all(str::is_empty) {
                continue;
            }
            records.push(self.parse_row(&row, line)?);
        }

        tracing::debug!("Parsed {} assignment records", records.len());
        Ok(records)
    }

    fn parse_row(&self, row: &csv::StringRecord, line: u64) -> Result<AssignmentRecord> {
        if row.len() < 4 {
            return Err(OverlapError::InvalidRecord {
                line,
                message: format!("expected 4 columns, found {}", row.len()),
            });
        }

        let employee_id = parse_id(&row[0], "employee id", line)?;
        let project_id = parse_id(&row[1], "project id", line)?;
        let date_from = self.parse_date(&row[2], line)?;
        let date_to = if row[3].is_empty() || row[3].eq_ignore_ascii_case(OPEN_END_MARKER) {
            self.reference_date
        } else {
            self.parse_date(&row[3], line)?
        };

        if date_from > date_to {
            return Err(OverlapError::InvalidRecord {
                line,
                message: format!("start date {} is after end date {}", date_from, date_to),
            });
        }

        Ok(AssignmentRecord::new(employee_id, project_id, date_from, date_to))
    }

    fn parse_date(&self, value: &str, line: u64) -> Result<NaiveDate> {
        self.dates.parse(value).ok_or_else(|| OverlapError::DateParse {
            line,
            value: value.to_string(),
        })
    }
}

fn parse_id(value: &str, what: &str, line: u64) -> Result<i64> {
    value.parse().map_err(|_| OverlapError::InvalidRecord {
        line,
        message: format!("{} '{}' is not an integer", what, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_reads_rows_with_mixed_formats() {
        let data = "143, 12, 2013-11-01, 2014-01-05\n218, 10, 2012/05/16, NULL\n\n143, 10, 20090101, 2011.04.27\n";

        let records = CsvAssignmentSource::new(reference()).read(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].employee_id(), 143);
        assert_eq!(records[0].project_id(), 12);
        assert_eq!(records[1].date_to(), reference());
        assert_eq!(
            records[2].date_from(),
            NaiveDate::from_ymd_opt(2009, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_skips_header_when_configured() {
        let data = "EmpID;ProjectID;DateFrom;DateTo\n1;10;2023-01-01;2023-01-10\n";

        let records = CsvAssignmentSource::new(reference())
            .with_headers(true)
            .with_delimiter(b';')
            .read(data.as_bytes())
            .unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_bad_id_reports_line() {
        let data = "1,10,2023-01-01,2023-01-10\nx,10,2023-01-01,2023-01-10\n";

        let err = CsvAssignmentSource::new(reference())
            .read(data.as_bytes())
            .unwrap_err();

        assert!(matches!(err, OverlapError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_bad_date_reports_value() {
        let data = "1,10,someday,2023-01-10\n";

        let err = CsvAssignmentSource::new(reference())
            .read(data.as_bytes())
            .unwrap_err();

        match err {
            OverlapError::DateParse { line, value } => {
                assert_eq!(line, 1);
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_reversed_interval_and_short_rows() {
        let reversed = "1,10,2023-02-01,2023-01-01\n";
        let short = "1,10,2023-02-01\n";
        let source = CsvAssignmentSource::new(reference());

        assert!(matches!(
            source.read(reversed.as_bytes()),
            Err(OverlapError::InvalidRecord { .. })
        ));
        assert!(matches!(
            source.read(short.as_bytes()),
            Err(OverlapError::InvalidRecord { .. })
        ));
    }
}
