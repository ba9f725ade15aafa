//! UTCTime and GeneralizedTime values.
//!
//! Both types validate every component on construction, including the
//! Gregorian leap rule for the day of month. GeneralizedTime keeps its
//! fractional seconds as the verbatim digit bytes so that re-encoding
//! is loss-free and ordering can break numeric ties the way the
//! canonical encoding does.

use crate::tag::Tag;
use crate::Asn1Type;
use std::cmp::Ordering;

/// A time component is out of range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DateError {
    #[error("year out of range")]
    YearOutOfRange,
    #[error("month out of range")]
    MonthOutOfRange,
    #[error("day out of range for month")]
    DayOutOfRange,
    #[error("hours out of range")]
    HoursOutOfRange,
    #[error("minutes out of range")]
    MinutesOutOfRange,
    #[error("seconds out of range")]
    SecondsOutOfRange,
    #[error("malformed fractional seconds")]
    InvalidFraction,
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn validate_components(
    year: u16,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: u8,
) -> Result<(), DateError> {
    if !(1..=12).contains(&month) {
        return Err(DateError::MonthOutOfRange);
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(DateError::DayOutOfRange);
    }
    if hours > 23 {
        return Err(DateError::HoursOutOfRange);
    }
    if minutes > 59 {
        return Err(DateError::MinutesOutOfRange);
    }
    // 60 and 61 admit leap seconds
    if seconds > 61 {
        return Err(DateError::SecondsOutOfRange);
    }
    Ok(())
}

/// A UTCTime: second resolution, years 1950 through 2049.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UtcTime {
    year: u16,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl UtcTime {
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Result<Self, DateError> {
        if !(1950..=2049).contains(&year) {
            return Err(DateError::YearOutOfRange);
        }
        validate_components(year, month, day, hours, minutes, seconds)?;
        Ok(UtcTime {
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }
}

impl Asn1Type for UtcTime {
    const TAG: Tag = Tag::UTC_TIME;
    const NAME: &'static str = "UtcTime";
}

/// A GeneralizedTime: years 0 through 9999 with optional fractional
/// seconds.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GeneralizedTime {
    year: u16,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: u8,
    fraction_digits: Vec<u8>,
}

impl GeneralizedTime {
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Result<Self, DateError> {
        if year > 9999 {
            return Err(DateError::YearOutOfRange);
        }
        validate_components(year, month, day, hours, minutes, seconds)?;
        Ok(GeneralizedTime {
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
            fraction_digits: Vec::new(),
        })
    }

    /// Attaches fractional seconds given as decimal digits. The digits
    /// must be non-empty and must not end in zero (the canonical form
    /// has no trailing zeros).
    pub fn with_fraction(mut self, digits: impl Into<Vec<u8>>) -> Result<Self, DateError> {
        let digits = digits.into();
        if digits.is_empty()
            || !digits.iter().all(u8::is_ascii_digit)
            || digits.last() == Some(&b'0')
        {
            return Err(DateError::InvalidFraction);
        }
        self.fraction_digits = digits;
        Ok(self)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// The verbatim fractional-second digits; empty when the time has
    /// whole-second resolution.
    pub fn fraction_digits(&self) -> &[u8] {
        &self.fraction_digits
    }

    /// Fractional seconds as a number in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        let mut value = 0.0;
        let mut scale = 0.1;
        for &digit in &self.fraction_digits {
            value += f64::from(digit - b'0') * scale;
            scale /= 10.0;
        }
        value
    }
}

/// Numeric comparison of two fraction digit strings, ties broken by
/// the raw bytes.
fn cmp_fractions(a: &[u8], b: &[u8]) -> Ordering {
    let width = a.len().max(b.len());
    for i in 0..width {
        let da = a.get(i).copied().unwrap_or(b'0');
        let db = b.get(i).copied().unwrap_or(b'0');
        match da.cmp(&db) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    a.cmp(b)
}

impl Ord for GeneralizedTime {
    fn cmp(&self, other: &Self) -> Ordering {
        (
            self.year,
            self.month,
            self.day,
            self.hours,
            self.minutes,
            self.seconds,
        )
            .cmp(&(
                other.year,
                other.month,
                other.day,
                other.hours,
                other.minutes,
                other.seconds,
            ))
            .then_with(|| cmp_fractions(&self.fraction_digits, &other.fraction_digits))
    }
}

impl PartialOrd for GeneralizedTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Asn1Type for GeneralizedTime {
    const TAG: Tag = Tag::GENERALIZED_TIME;
    const NAME: &'static str = "GeneralizedTime";
}

impl From<UtcTime> for GeneralizedTime {
    fn from(t: UtcTime) -> Self {
        GeneralizedTime {
            year: t.year,
            month: t.month,
            day: t.day,
            hours: t.hours,
            minutes: t.minutes,
            seconds: t.seconds,
            fraction_digits: Vec::new(),
        }
    }
}

#[cfg(feature = "chrono_conversion")]
mod chrono_conversion {
    use super::*;
    use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

    impl TryFrom<NaiveDateTime> for UtcTime {
        type Error = DateError;

        fn try_from(d: NaiveDateTime) -> Result<Self, Self::Error> {
            let year = u16::try_from(d.year()).map_err(|_| DateError::YearOutOfRange)?;
            UtcTime::new(
                year,
                d.month() as u8,
                d.day() as u8,
                d.hour() as u8,
                d.minute() as u8,
                d.second() as u8,
            )
        }
    }

    impl TryFrom<NaiveDateTime> for GeneralizedTime {
        type Error = DateError;

        fn try_from(d: NaiveDateTime) -> Result<Self, Self::Error> {
            let year = u16::try_from(d.year()).map_err(|_| DateError::YearOutOfRange)?;
            GeneralizedTime::new(
                year,
                d.month() as u8,
                d.day() as u8,
                d.hour() as u8,
                d.minute() as u8,
                d.second() as u8,
            )
        }
    }

    impl TryFrom<GeneralizedTime> for NaiveDateTime {
        type Error = DateError;

        fn try_from(t: GeneralizedTime) -> Result<Self, Self::Error> {
            NaiveDate::from_ymd_opt(i32::from(t.year), u32::from(t.month), u32::from(t.day))
                .ok_or(DateError::DayOutOfRange)?
                .and_hms_opt(
                    u32::from(t.hours),
                    u32::from(t.minutes),
                    u32::from(t.seconds),
                )
                .ok_or(DateError::SecondsOutOfRange)
        }
    }

    impl TryFrom<UtcTime> for NaiveDateTime {
        type Error = DateError;

        fn try_from(t: UtcTime) -> Result<Self, Self::Error> {
            NaiveDateTime::try_from(GeneralizedTime::from(t))
        }
    }
}
