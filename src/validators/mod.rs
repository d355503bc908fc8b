//! Ready-made leaf validators
//!
//! Each validator is a small struct with a constructor function, in the same
//! way as the combinators. They return user-facing messages and never panic.
//!
//! Text validators accept both `str` and `String`; collection validators accept
//! slices and `Vec`s; number validators accept any `PartialOrd + Display` type.
//!
//! # Example
//!
//! ```rust
//! use composable_validation::prelude::*;
//! use composable_validation::validators::*;
//!
//! struct Signup {
//!     email: Option<String>,
//!     age: u32,
//!     tags: Vec<String>,
//! }
//!
//! let validator = Validator::<Signup>::nested()
//!     .field("email", |s: &Signup| &s.email, required().with(valid_email()))
//!     .field("age", |s: &Signup| &s.age, rules((min_value(18), max_value(130))))
//!     .field("tags", |s: &Signup| &s.tags, max_items(3))
//!     .build();
//!
//! let result = validate(
//!     &validator,
//!     &Signup { email: Some("nope".into()), age: 12, tags: vec![] },
//! );
//! assert_eq!(result.errors_at(["email"]), ["Please enter a valid email"]);
//! assert_eq!(result.errors_at(["age"]), ["Value must be greater than or equal to 18"]);
//! ```

mod collection;
#[cfg(feature = "chrono")]
mod date;
mod file;
mod number;
mod text;

pub use collection::{max_items, min_items, MaxItems, MinItems};
pub use file::{
    file_extension, has_file_type, max_file_size_in_megabytes, max_megabytes, FileExtension,
    FileInfo, HasFileType, MaxFileSizeInMegabytes, MaxMegabytes,
};
pub use number::{max_value, min_value, MaxValue, MinValue};
pub use text::{
    max_length, min_length, trimmed, valid_email, MaxLength, MinLength, Trimmed, ValidEmail,
};

#[cfg(feature = "chrono")]
pub use date::{
    date_in_future, date_in_past, date_on_or_before_today, date_same_or_before,
    dates_on_or_before_today, max_length_in_days, max_length_in_months, timestamp_before,
    timestamp_in_future, timestamp_in_past, valid_date_range, valid_timestamp, Clock, DateInFuture,
    DateInPast, DateOnOrBeforeToday, DateRange, DateSameOrBefore, DatesOnOrBeforeToday,
    FixedClock, MaxLengthInDays, MaxLengthInMonths, SystemClock, TimestampBefore,
    TimestampInFuture, TimestampInPast, ValidDateRange, ValidTimestamp,
};
