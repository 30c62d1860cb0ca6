use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ── Record ────────────────────────────────────────────────────────────────────

/// One daily observation: the page views recorded on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub value: f64,
}

impl Record {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Calendar year of the observation.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month of the observation.
    pub fn month(&self) -> CalendarMonth {
        CalendarMonth::of(self.date)
    }
}

// ── Series ────────────────────────────────────────────────────────────────────

/// Raised when a series would contain two records for the same day.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("duplicate date {0}")]
pub struct DuplicateDateError(pub NaiveDate);

/// A date-indexed sequence of records.
///
/// Invariant: records are strictly ascending by date, so every date occurs
/// at most once. The only ways to build a `Series` keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    records: Vec<Record>,
}

impl Series {
    /// Sort `records` by date and reject repeated dates.
    pub fn from_records(mut records: Vec<Record>) -> Result<Self, DuplicateDateError> {
        records.sort_by_key(|r| r.date);
        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(DuplicateDateError(pair[0].date));
        }
        Ok(Self { records })
    }

    /// Keep the records for which `keep` returns `true`.
    ///
    /// A subset of a sorted, unique sequence is still sorted and unique.
    pub fn retain_where(&self, mut keep: impl FnMut(&Record) -> bool) -> Series {
        Series {
            records: self.records.iter().filter(|r| keep(r)).copied().collect(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values in date order.
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.value).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── CalendarMonth ─────────────────────────────────────────────────────────────

/// Month of the year, ordered January → December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CalendarMonth {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl CalendarMonth {
    /// All months in calendar order.
    pub const ALL: [CalendarMonth; 12] = [
        CalendarMonth::January,
        CalendarMonth::February,
        CalendarMonth::March,
        CalendarMonth::April,
        CalendarMonth::May,
        CalendarMonth::June,
        CalendarMonth::July,
        CalendarMonth::August,
        CalendarMonth::September,
        CalendarMonth::October,
        CalendarMonth::November,
        CalendarMonth::December,
    ];

    /// Month for a 1-based month number; `None` outside `1..=12`.
    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize))
            .copied()
    }

    pub fn of(date: NaiveDate) -> Self {
        // chrono guarantees month() is in 1..=12
        Self::ALL[date.month0() as usize]
    }

    /// Zero-based position (January = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Full English name, e.g. `"January"`.
    pub fn name(self) -> &'static str {
        match self {
            CalendarMonth::January => "January",
            CalendarMonth::February => "February",
            CalendarMonth::March => "March",
            CalendarMonth::April => "April",
            CalendarMonth::May => "May",
            CalendarMonth::June => "June",
            CalendarMonth::July => "July",
            CalendarMonth::August => "August",
            CalendarMonth::September => "September",
            CalendarMonth::October => "October",
            CalendarMonth::November => "November",
            CalendarMonth::December => "December",
        }
    }

    /// Three-letter abbreviation, e.g. `"Jan"`.
    pub fn abbrev(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
