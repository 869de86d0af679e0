use super::encoder::{reverse_words, strip_marker};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static YEAR_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[^0-9A-Za-z](\d{1,2})[^0-9A-Za-z](\d{1,2})$").unwrap()
});

/// A calendar day. Field order gives the chronological total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    /// Parses a year-first date (`1967-08-05`, `1967/08/05`).
    pub fn parse_year_first(text: &str) -> Option<Self> {
        let caps = YEAR_FIRST.captures(text.trim())?;
        let year = caps.get(1)?.as_str().parse::<u16>().ok()?;
        let month = caps.get(2)?.as_str().parse::<u8>().ok()?;
        let day = caps.get(3)?.as_str().parse::<u8>().ok()?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        Some(Self { year, month, day })
    }

    /// Parses a catalog date (`05-08-1967`, optionally marked with `*`).
    pub fn parse_catalog(text: &str) -> Option<Self> {
        Self::parse_year_first(&reverse_words(&strip_marker(text.trim())))
    }

    /// Key in the global date index layout, `YYYY/MM/DD`.
    pub fn index_key(&self) -> String {
        format!("{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
