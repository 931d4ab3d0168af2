//! Birthday roster: CSV loading and date matching.
//!
//! The CSV needs a header row with `First Name` and `Date of Birth`
//! columns; `Alias` is optional. Header names are matched without regard
//! to case or surrounding whitespace.

use std::fmt;
use std::io;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::{debug, info};

const FIRST_NAME: &str = "first name";
const ALIAS: &str = "alias";
const DATE_OF_BIRTH: &str = "date of birth";

/// Formats tried in order when reading a date of birth.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%m-%d-%Y",
    "%m-%d-%y",
];

/// Placeholder replaced by the display name in a message template.
pub const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Error, Debug)]
pub enum BirthdayError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column(s): {0}")]
    MissingColumns(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Birthday {
    pub first_name: String,
    pub alias: String,
    pub date_of_birth: NaiveDate,
}

impl Birthday {
    /// The alias when there is one, otherwise the first name.
    pub fn display_name(&self) -> &str {
        if self.alias.is_empty() {
            &self.first_name
        } else {
            &self.alias
        }
    }

    /// Same month and day as `date`, any year.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date_of_birth.month() == date.month() && self.date_of_birth.day() == date.day()
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.display_name(),
            self.date_of_birth.format("%B %d")
        )
    }
}

/// Parse a date of birth in any of the accepted formats.
///
/// `%Y` only matches four-digit years, so `03-05-05` falls through to the
/// two-digit `%m-%d-%y` form instead of reading as the year 3.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS.iter().find_map(|fmt| {
        let date = NaiveDate::parse_from_str(s, fmt).ok()?;
        (!fmt.contains("%Y") || date.year() >= 1000).then_some(date)
    })
}

/// Load a roster from a CSV file, sorted by month then day.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Birthday>, BirthdayError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| BirthdayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let roster = read(file)?;
    info!(path = %path.display(), count = roster.len(), "loaded birthdays");
    Ok(roster)
}

/// Read a roster from any CSV source, sorted by month then day.
///
/// Rows with no parseable date or no usable name are skipped.
pub fn read<R: io::Read>(reader: R) -> Result<Vec<Birthday>, BirthdayError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let first_col = column(FIRST_NAME);
    let dob_col = column(DATE_OF_BIRTH);
    let alias_col = column(ALIAS);
    let (first_col, dob_col) = match (first_col, dob_col) {
        (Some(f), Some(d)) => (f, d),
        (None, None) => {
            return Err(BirthdayError::MissingColumns(
                "First Name, Date of Birth".into(),
            ))
        }
        (None, _) => return Err(BirthdayError::MissingColumns("First Name".into())),
        (_, None) => return Err(BirthdayError::MissingColumns("Date of Birth".into())),
    };

    let mut roster = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        let dob_raw = field(dob_col);
        let Some(date_of_birth) = parse_date(&dob_raw) else {
            debug!(row = line + 1, date = %dob_raw, "skipping row with unreadable date");
            continue;
        };
        let entry = Birthday {
            first_name: field(first_col),
            alias: alias_col.map(field).unwrap_or_default(),
            date_of_birth,
        };
        if entry.display_name().is_empty() {
            debug!(row = line + 1, "skipping row with no name");
            continue;
        }
        roster.push(entry);
    }

    roster.sort_by_key(|b| (b.date_of_birth.month(), b.date_of_birth.day()));
    Ok(roster)
}

/// Entries whose birthday falls on `date`.
pub fn celebrants_on(roster: &[Birthday], date: NaiveDate) -> impl Iterator<Item = &Birthday> {
    roster.iter().filter(move |b| b.falls_on(date))
}

/// Fill a message template with `name`.
pub fn banner_text(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_every_accepted_format() {
        for s in [
            "2005-03-05",
            "03/05/2005",
            "03/05/05",
            "March 05, 2005",
            "Mar 5, 2005",
            "03-05-2005",
            "03-05-05",
        ] {
            let d = parse_date(s).unwrap_or_else(|| panic!("{s} did not parse"));
            assert_eq!((d.month(), d.day()), (3, 5), "{s}");
        }
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn alias_wins_over_first_name() {
        let csv = "First Name,Alias,Date of Birth\nAlice,Ally,2005-03-05\nBob,,1990-07-01\n";
        let roster = read(csv.as_bytes()).unwrap();
        assert_eq!(roster[0].display_name(), "Ally");
        assert_eq!(roster[1].display_name(), "Bob");
    }

    #[test]
    fn headers_are_case_insensitive_and_alias_is_optional() {
        let csv = "  first NAME , DATE OF BIRTH\nCarol,12/25/1980\n";
        let roster = read(csv.as_bytes()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].alias, "");
        assert_eq!(roster[0].date_of_birth, date(1980, 12, 25));
    }

    #[test]
    fn missing_columns_are_named() {
        let err = read("Name,Born\nX,2000-01-01\n".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required column(s): First Name, Date of Birth"
        );
        let err = read("First Name\nX\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BirthdayError::MissingColumns(c) if c == "Date of Birth"));
    }

    #[test]
    fn bad_rows_are_skipped_and_rest_sorted() {
        let csv = "First Name,Date of Birth\n\
                   Zed,2001-11-02\n\
                   NoDate,\n\
                   ,1999-01-01\n\
                   Amy,1970-02-14\n";
        let roster = read(csv.as_bytes()).unwrap();
        let names: Vec<_> = roster.iter().map(Birthday::display_name).collect();
        assert_eq!(names, ["Amy", "Zed"]);
    }

    #[test]
    fn matches_month_and_day_in_any_year() {
        let csv = "First Name,Alias,Date of Birth\nAlice,Ally,2005-03-05\n";
        let roster = read(csv.as_bytes()).unwrap();
        let today: Vec<_> = celebrants_on(&roster, date(2026, 3, 5))
            .map(Birthday::display_name)
            .collect();
        assert_eq!(today, ["Ally"]);
        assert_eq!(celebrants_on(&roster, date(2026, 3, 6)).count(), 0);
    }

    #[test]
    fn template_substitutes_name() {
        assert_eq!(banner_text("Happy Birthday {name}!", "Ally"), "Happy Birthday Ally!");
        assert_eq!(banner_text("{name}", "Bo"), "Bo");
    }

    #[test]
    fn display_shows_name_and_day() {
        let b = Birthday {
            first_name: "Alice".into(),
            alias: String::new(),
            date_of_birth: date(2005, 3, 5),
        };
        assert_eq!(b.to_string(), "Alice (March 05)");
    }
}
