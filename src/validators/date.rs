//! Date and time validators
//!
//! Timestamps are `chrono::DateTime` values in any zone and compare as
//! instants. Calendar dates are `NaiveDate`s; validators that compare against
//! "today" take the time zone that today should be computed in, and read the
//! current time from a [`Clock`] so tests can pin it with [`FixedClock`].
//!
//! # Example
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use composable_validation::ValueValidator;
//! use composable_validation::validators::{date_in_future, FixedClock};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());
//! let delivery = date_in_future(Utc).with_clock(clock);
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let yesterday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
//! assert!(delivery.validate(&today).is_empty());
//! assert_eq!(delivery.validate(&yesterday), vec!["Please enter a date in the future"]);
//! ```

use std::fmt;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone, Utc};

use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

/// Source of the current instant.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to `now`.
    pub fn new<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        FixedClock(now.with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An inclusive span between two dates or timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateRange<T> {
    /// Start of the range.
    pub from: T,
    /// End of the range.
    pub to: T,
}

impl<T> DateRange<T> {
    /// A range from `from` to `to`.
    pub fn new(from: T, to: T) -> Self {
        DateRange { from, to }
    }
}

impl<T> crate::presence::Blank for DateRange<T> {}

/// Formats a date as `1st January 2015`.
fn long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{}{} {}", day, suffix, date.format("%B %Y"))
}

/// Parses an RFC 3339 timestamp, or a `YYYY-MM-DD` date at midnight UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

/// Today's date in a zone, according to a clock.
#[derive(Debug, Clone, Copy)]
struct Today<Tz, C> {
    tz: Tz,
    clock: C,
}

impl<Tz: TimeZone, C: Clock> Today<Tz, C> {
    fn date(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.tz).date_naive()
    }
}

macro_rules! impl_with_clock {
    ($($name:ident),+) => {
        $(
            impl<Tz, C> $name<Tz, C> {
                /// Read the current time from `clock` instead.
                pub fn with_clock<D: Clock>(self, clock: D) -> $name<Tz, D> {
                    $name {
                        today: Today {
                            tz: self.today.tz,
                            clock,
                        },
                    }
                }
            }
        )+
    };
}

/// Rejects timestamps at or before now.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampInFuture<C = SystemClock> {
    clock: C,
}

impl<C> TimestampInFuture<C> {
    /// Read the current time from `clock` instead.
    pub fn with_clock<D: Clock>(self, clock: D) -> TimestampInFuture<D> {
        TimestampInFuture { clock }
    }
}

impl<Tz: TimeZone, C: Clock> ValueValidator<DateTime<Tz>> for TimestampInFuture<C> {
    fn validate(&self, value: &DateTime<Tz>) -> ValidationErrors {
        if value.with_timezone(&Utc) <= self.clock.now() {
            vec!["Please enter a time in the future".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Require a timestamp after now.
pub fn timestamp_in_future() -> TimestampInFuture {
    TimestampInFuture { clock: SystemClock }
}

/// Rejects timestamps after now.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampInPast<C = SystemClock> {
    clock: C,
}

impl<C> TimestampInPast<C> {
    /// Read the current time from `clock` instead.
    pub fn with_clock<D: Clock>(self, clock: D) -> TimestampInPast<D> {
        TimestampInPast { clock }
    }
}

impl<Tz: TimeZone, C: Clock> ValueValidator<DateTime<Tz>> for TimestampInPast<C> {
    fn validate(&self, value: &DateTime<Tz>) -> ValidationErrors {
        if value.with_timezone(&Utc) > self.clock.now() {
            vec!["Please enter a time in the past".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Require a timestamp at or before now.
pub fn timestamp_in_past() -> TimestampInPast {
    TimestampInPast { clock: SystemClock }
}

/// Rejects timestamps on or after the start of a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampBefore {
    cutoff: DateTime<Utc>,
    day: NaiveDate,
}

impl<Tz: TimeZone> ValueValidator<DateTime<Tz>> for TimestampBefore {
    fn validate(&self, value: &DateTime<Tz>) -> ValidationErrors {
        if value.with_timezone(&Utc) >= self.cutoff {
            vec![format!("Please enter a date before {}", long_date(self.day))]
        } else {
            Vec::new()
        }
    }
}

/// Require a timestamp before the day containing `latest` starts.
///
/// The day boundary is taken in `latest`'s own zone.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::timestamp_before;
///
/// let latest = Utc.with_ymd_and_hms(2015, 1, 1, 2, 30, 0).unwrap();
/// let earlier_that_day = Utc.with_ymd_and_hms(2015, 1, 1, 2, 29, 0).unwrap();
///
/// assert_eq!(
///     timestamp_before(latest).validate(&earlier_that_day),
///     vec!["Please enter a date before 1st January 2015"]
/// );
/// ```
pub fn timestamp_before<Tz: TimeZone>(latest: DateTime<Tz>) -> TimestampBefore {
    let day = latest.date_naive();
    let cutoff = day
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| latest.timezone().from_local_datetime(&midnight).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| latest.with_timezone(&Utc));
    TimestampBefore { cutoff, day }
}

/// Rejects dates before today.
#[derive(Debug, Clone, Copy)]
pub struct DateInFuture<Tz, C = SystemClock> {
    today: Today<Tz, C>,
}

impl<Tz, C> ValueValidator<NaiveDate> for DateInFuture<Tz, C>
where
    Tz: TimeZone + Send + Sync,
    C: Clock,
{
    fn validate(&self, value: &NaiveDate) -> ValidationErrors {
        if *value < self.today.date() {
            vec!["Please enter a date in the future".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Require today or a later date, with today computed in `tz`.
pub fn date_in_future<Tz: TimeZone>(tz: Tz) -> DateInFuture<Tz> {
    DateInFuture {
        today: Today {
            tz,
            clock: SystemClock,
        },
    }
}

/// Rejects today and later dates.
#[derive(Debug, Clone, Copy)]
pub struct DateInPast<Tz, C = SystemClock> {
    today: Today<Tz, C>,
}

impl<Tz, C> ValueValidator<NaiveDate> for DateInPast<Tz, C>
where
    Tz: TimeZone + Send + Sync,
    C: Clock,
{
    fn validate(&self, value: &NaiveDate) -> ValidationErrors {
        if *value >= self.today.date() {
            vec!["Please enter a date in the past".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Require a date strictly before today, with today computed in `tz`.
pub fn date_in_past<Tz: TimeZone>(tz: Tz) -> DateInPast<Tz> {
    DateInPast {
        today: Today {
            tz,
            clock: SystemClock,
        },
    }
}

/// Rejects dates after today.
#[derive(Debug, Clone, Copy)]
pub struct DateOnOrBeforeToday<Tz, C = SystemClock> {
    today: Today<Tz, C>,
}

impl<Tz, C> ValueValidator<NaiveDate> for DateOnOrBeforeToday<Tz, C>
where
    Tz: TimeZone + Send + Sync,
    C: Clock,
{
    fn validate(&self, value: &NaiveDate) -> ValidationErrors {
        if *value > self.today.date() {
            vec!["Please enter a date in the past".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Require today or an earlier date, with today computed in `tz`.
pub fn date_on_or_before_today<Tz: TimeZone>(tz: Tz) -> DateOnOrBeforeToday<Tz> {
    DateOnOrBeforeToday {
        today: Today {
            tz,
            clock: SystemClock,
        },
    }
}

/// [`DateOnOrBeforeToday`] applied to both ends of a range.
#[derive(Debug, Clone, Copy)]
pub struct DatesOnOrBeforeToday<Tz, C = SystemClock> {
    today: Today<Tz, C>,
}

impl<Tz, C> ValueValidator<DateRange<NaiveDate>> for DatesOnOrBeforeToday<Tz, C>
where
    Tz: TimeZone + Send + Sync,
    C: Clock,
{
    fn validate(&self, value: &DateRange<NaiveDate>) -> ValidationErrors {
        let today = self.today.date();
        [value.from, value.to]
            .into_iter()
            .filter(|date| *date > today)
            .map(|_| "Please enter a date in the past".to_string())
            .collect()
    }
}

/// Require both ends of a range to be today or earlier.
pub fn dates_on_or_before_today<Tz: TimeZone>(tz: Tz) -> DatesOnOrBeforeToday<Tz> {
    DatesOnOrBeforeToday {
        today: Today {
            tz,
            clock: SystemClock,
        },
    }
}

impl_with_clock!(DateInFuture, DateInPast, DateOnOrBeforeToday, DatesOnOrBeforeToday);

/// Rejects dates after a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSameOrBefore {
    max: NaiveDate,
}

impl ValueValidator<NaiveDate> for DateSameOrBefore {
    fn validate(&self, value: &NaiveDate) -> ValidationErrors {
        if *value > self.max {
            vec![format!(
                "Please enter a date on or before {}",
                long_date(self.max)
            )]
        } else {
            Vec::new()
        }
    }
}

/// Require a date on or before `max`.
pub fn date_same_or_before(max: NaiveDate) -> DateSameOrBefore {
    DateSameOrBefore { max }
}

/// Rejects text that is neither an RFC 3339 timestamp nor a `YYYY-MM-DD` date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidTimestamp;

impl ValueValidator<str> for ValidTimestamp {
    fn validate(&self, value: &str) -> ValidationErrors {
        match parse_timestamp(value) {
            Some(_) => Vec::new(),
            None => vec!["Please enter a valid date".to_string()],
        }
    }
}

impl ValueValidator<String> for ValidTimestamp {
    #[inline]
    fn validate(&self, value: &String) -> ValidationErrors {
        ValueValidator::<str>::validate(self, value.as_str())
    }
}

/// Require parseable date text.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::valid_timestamp;
///
/// assert!(valid_timestamp().validate("2016-01-02").is_empty());
/// assert!(valid_timestamp().validate("2016-01-02T10:00:00Z").is_empty());
/// assert_eq!(valid_timestamp().validate("2016-13-14T01:01"), vec!["Please enter a valid date"]);
/// ```
pub fn valid_timestamp() -> ValidTimestamp {
    ValidTimestamp
}

/// Checks both ends of a range parse and are in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidDateRange;

impl ValidDateRange {
    fn check_text(&self, from: &str, to: &str) -> ValidationErrors {
        let mut errors = ValidTimestamp.validate(from);
        errors.extend(ValidTimestamp.validate(to));
        if let (Some(from), Some(to)) = (parse_timestamp(from), parse_timestamp(to)) {
            errors.extend(self.check_order(&from, &to));
        }
        errors
    }

    fn check_order<T: PartialOrd>(&self, from: &T, to: &T) -> ValidationErrors {
        if to < from {
            vec!["Please enter a from date that is earlier than the to date".to_string()]
        } else {
            Vec::new()
        }
    }
}

impl ValueValidator<DateRange<String>> for ValidDateRange {
    fn validate(&self, value: &DateRange<String>) -> ValidationErrors {
        self.check_text(&value.from, &value.to)
    }
}

impl<'a> ValueValidator<DateRange<&'a str>> for ValidDateRange {
    fn validate(&self, value: &DateRange<&'a str>) -> ValidationErrors {
        self.check_text(value.from, value.to)
    }
}

impl ValueValidator<DateRange<NaiveDate>> for ValidDateRange {
    fn validate(&self, value: &DateRange<NaiveDate>) -> ValidationErrors {
        self.check_order(&value.from, &value.to)
    }
}

/// Require a range whose ends parse and whose `to` is not before `from`.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::{valid_date_range, DateRange};
///
/// assert!(valid_date_range().validate(&DateRange::new("2016-01-01", "2016-01-02")).is_empty());
/// assert_eq!(
///     valid_date_range().validate(&DateRange::new("2016-01-02", "2016-01-01")),
///     vec!["Please enter a from date that is earlier than the to date"]
/// );
/// ```
pub fn valid_date_range() -> ValidDateRange {
    ValidDateRange
}

/// Rejects ranges longer than a number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLengthInDays {
    days: u64,
}

impl ValueValidator<DateRange<NaiveDate>> for MaxLengthInDays {
    fn validate(&self, value: &DateRange<NaiveDate>) -> ValidationErrors {
        match value.from.checked_add_days(Days::new(self.days)) {
            Some(latest) if value.to > latest => vec![format!(
                "Please enter a date range of {} days or less",
                self.days
            )],
            _ => Vec::new(),
        }
    }
}

/// Allow `to` to be at most `days` days after `from`.
pub fn max_length_in_days(days: u64) -> MaxLengthInDays {
    MaxLengthInDays { days }
}

/// Rejects ranges longer than a number of calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLengthInMonths {
    months: u32,
}

impl ValueValidator<DateRange<NaiveDate>> for MaxLengthInMonths {
    fn validate(&self, value: &DateRange<NaiveDate>) -> ValidationErrors {
        match value.to.checked_sub_months(Months::new(self.months)) {
            Some(earliest) if value.from < earliest => vec![format!(
                "Please select dates that are less than {} month{} apart",
                self.months,
                if self.months == 1 { "" } else { "s" }
            )],
            _ => Vec::new(),
        }
    }
}

/// Allow `from` to be at most `months` calendar months before `to`.
pub fn max_length_in_months(months: u32) -> MaxLengthInMonths {
    MaxLengthInMonths { months }
}
