//! Compact recurrence rules and the next-occurrence evaluator.
//!
//! A rule is a whitespace-separated token sequence whose first token selects
//! the kind:
//!
//! | Rule                 | Meaning                                                  |
//! |----------------------|----------------------------------------------------------|
//! | `d <N>`              | every `N` days (1..=400) counted from the anchor date    |
//! | `y`                  | every year on the anchor's month and day                 |
//! | `w <1,..7>`          | on the listed ISO weekdays (1 = Monday)                  |
//! | `m <days> [months]`  | on the listed days of month (`-1` last, `-2` penultimate),|
//! |                      | optionally restricted to the listed months               |
//!
//! Daily and yearly rules step from the anchor and so keep its phase. Weekly
//! and monthly rules are absolute, so they scan forward from the later of the
//! anchor and the reference date.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted interval for `d <N>`.
pub const MAX_DAY_INTERVAL: u32 = 400;

/// Upper bound on day-by-day scans (about ten years). Long enough to find a
/// Feb 29 across a skipped century leap year.
pub const MAX_SCAN_DAYS: u32 = 3660;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule is empty")]
    Empty,

    #[error("unknown rule kind '{0}'")]
    UnknownKind(String),

    #[error("'{kind}' rule expects {expected}, got {got}")]
    Arity {
        kind: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("day interval {0} is out of range 1..=400")]
    IntervalOutOfRange(i64),

    #[error("weekday {0} is out of range 1..=7")]
    WeekdayOutOfRange(i64),

    #[error("day of month {0} is out of range (1..=31, -1 or -2)")]
    DayOutOfRange(i64),

    #[error("month {0} is out of range 1..=12")]
    MonthOutOfRange(i64),

    #[error("{what} {value} is listed more than once")]
    Duplicate { what: &'static str, value: i64 },

    #[error("no matching date within {0} days")]
    NoOccurrence(u32),

    #[error("next occurrence is beyond the supported date range")]
    OutOfRange,
}

/// A day-of-month selector of a monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDay {
    /// A fixed day, 1..=31.
    Day(u32),
    /// Counted from the end of the month: `FromEnd(1)` is the last day.
    FromEnd(u32),
}

impl MonthDay {
    fn matches(self, date: NaiveDate) -> bool {
        match self {
            MonthDay::Day(day) => date.day() == day,
            MonthDay::FromEnd(n) => days_in_month(date) + 1 == date.day() + n,
        }
    }
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Daily { interval: u32 },
    Yearly,
    Weekly { weekdays: Vec<Weekday> },
    Monthly {
        days: Vec<MonthDay>,
        /// `None` means every month.
        months: Option<Vec<u32>>,
    },
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let (kind, args) = tokens.split_first().ok_or(RuleError::Empty)?;

        match *kind {
            "d" => {
                let [raw] = args else {
                    return Err(arity("d", "one interval", args.len()));
                };
                let interval = parse_number(raw)?;
                if !(1..=i64::from(MAX_DAY_INTERVAL)).contains(&interval) {
                    return Err(RuleError::IntervalOutOfRange(interval));
                }
                Ok(Rule::Daily {
                    interval: interval as u32,
                })
            }
            "y" => {
                if !args.is_empty() {
                    return Err(arity("y", "no arguments", args.len()));
                }
                Ok(Rule::Yearly)
            }
            "w" => {
                let [raw] = args else {
                    return Err(arity("w", "one weekday list", args.len()));
                };
                let weekdays = parse_list(raw, "weekday", |n| {
                    if (1..=7).contains(&n) {
                        Ok(WEEKDAYS[(n - 1) as usize])
                    } else {
                        Err(RuleError::WeekdayOutOfRange(n))
                    }
                })?;
                Ok(Rule::Weekly { weekdays })
            }
            "m" => {
                let (raw_days, raw_months) = match args {
                    [days] => (*days, None),
                    [days, months] => (*days, Some(*months)),
                    _ => return Err(arity("m", "a day list and an optional month list", args.len())),
                };
                let days = parse_list(raw_days, "day", |n| match n {
                    1..=31 => Ok(MonthDay::Day(n as u32)),
                    -2..=-1 => Ok(MonthDay::FromEnd(n.unsigned_abs() as u32)),
                    _ => Err(RuleError::DayOutOfRange(n)),
                })?;
                let months = raw_months
                    .map(|raw| {
                        parse_list(raw, "month", |n| {
                            if (1..=12).contains(&n) {
                                Ok(n as u32)
                            } else {
                                Err(RuleError::MonthOutOfRange(n))
                            }
                        })
                    })
                    .transpose()?;
                Ok(Rule::Monthly { days, months })
            }
            other => Err(RuleError::UnknownKind(other.to_string())),
        }
    }
}

impl Rule {
    /// Smallest date on this rule, anchored at `base`, that is strictly after
    /// `now`.
    pub fn next_after(&self, now: NaiveDate, base: NaiveDate) -> Result<NaiveDate, RuleError> {
        match self {
            Rule::Daily { interval } => next_daily(now, base, *interval),
            Rule::Yearly => next_yearly(now, base),
            Rule::Weekly { weekdays } => scan_forward(now, base, |date| {
                weekdays.contains(&date.weekday())
            }),
            Rule::Monthly { days, months } => scan_forward(now, base, |date| {
                months
                    .as_ref()
                    .map_or(true, |months| months.contains(&date.month()))
                    && days.iter().any(|day| day.matches(date))
            }),
        }
    }
}

/// Parses `rule` and returns its next occurrence after `now`, anchored at
/// `base`.
pub fn next_date(now: NaiveDate, base: NaiveDate, rule: &str) -> Result<NaiveDate, RuleError> {
    let parsed: Rule = rule.parse()?;
    let next = parsed.next_after(now, base)?;
    tracing::debug!(%now, %base, rule, %next, "evaluated repeat rule");
    Ok(next)
}

fn next_daily(now: NaiveDate, base: NaiveDate, interval: u32) -> Result<NaiveDate, RuleError> {
    let interval = i64::from(interval);
    let elapsed = now.signed_duration_since(base).num_days();
    // At least one step is always taken, even when the anchor is in the future.
    let steps = if elapsed < 0 { 1 } else { elapsed / interval + 1 };
    let offset = u64::try_from(steps * interval).map_err(|_| RuleError::OutOfRange)?;
    base.checked_add_days(Days::new(offset))
        .ok_or(RuleError::OutOfRange)
}

fn next_yearly(now: NaiveDate, base: NaiveDate) -> Result<NaiveDate, RuleError> {
    let mut years = (now.year() - base.year()).max(1);
    loop {
        let year = base
            .year()
            .checked_add(years)
            .ok_or(RuleError::OutOfRange)?;
        let candidate = anniversary(base, year).ok_or(RuleError::OutOfRange)?;
        if candidate > now {
            return Ok(candidate);
        }
        years += 1;
    }
}

/// The anchor's month and day in `year`; Feb 29 falls on Mar 1 in common years.
fn anniversary(base: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, base.month(), base.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

fn scan_forward<F>(now: NaiveDate, base: NaiveDate, matches: F) -> Result<NaiveDate, RuleError>
where
    F: Fn(NaiveDate) -> bool,
{
    let mut date = now.max(base);
    for _ in 0..MAX_SCAN_DAYS {
        date = date.succ_opt().ok_or(RuleError::OutOfRange)?;
        if matches(date) {
            return Ok(date);
        }
    }
    Err(RuleError::NoOccurrence(MAX_SCAN_DAYS))
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = match date.month() {
        12 => (date.year() + 1, 1),
        month => (date.year(), month + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

fn arity(kind: &'static str, expected: &'static str, got: usize) -> RuleError {
    RuleError::Arity {
        kind,
        expected,
        got,
    }
}

/// Bare digits with an optional leading `-`; an explicit `+` sign is rejected.
fn parse_number(raw: &str) -> Result<i64, RuleError> {
    if raw.starts_with('+') {
        return Err(RuleError::NotANumber(raw.to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| RuleError::NotANumber(raw.to_string()))
}

/// Parses a comma-separated list, validating each value and rejecting
/// repeats of the same raw value.
fn parse_list<T, F>(raw: &str, what: &'static str, convert: F) -> Result<Vec<T>, RuleError>
where
    F: Fn(i64) -> Result<T, RuleError>,
{
    let mut seen = Vec::new();
    let mut items = Vec::new();
    for part in raw.split(',') {
        let value = parse_number(part)?;
        if seen.contains(&value) {
            return Err(RuleError::Duplicate { what, value });
        }
        seen.push(value);
        items.push(convert(value)?);
    }
    Ok(items)
}
