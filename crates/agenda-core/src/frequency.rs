//! Calendar step units used by repeating events.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a repeating event comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Advances `date` by `steps` whole units of this frequency.
    ///
    /// Month and year steps clamp to the last day of the target month, so
    /// January 31st plus one month lands on the last day of February.
    /// Returns `None` when the result falls outside the representable range.
    pub fn add_steps(self, date: NaiveDate, steps: u64) -> Option<NaiveDate> {
        match self {
            Self::Daily => date.checked_add_days(Days::new(steps)),
            Self::Weekly => date.checked_add_days(Days::new(steps.checked_mul(7)?)),
            Self::Monthly => date.checked_add_months(Months::new(u32::try_from(steps).ok()?)),
            Self::Yearly => {
                let months = u32::try_from(steps.checked_mul(12)?).ok()?;
                date.checked_add_months(Months::new(months))
            }
        }
    }

    /// Number of whole units between `from` and `to`, truncated toward zero.
    ///
    /// Negative when `to` is before `from`. A month only counts once its
    /// day-of-month has been reached: Jan 31 to Feb 28 is zero months.
    pub fn steps_between(self, from: NaiveDate, to: NaiveDate) -> i64 {
        match self {
            Self::Daily => (to - from).num_days(),
            Self::Weekly => (to - from).num_days() / 7,
            Self::Monthly => months_between(from, to),
            Self::Yearly => months_between(from, to) / 12,
        }
    }
}

/// Packs year, month and day so that integer division by 32 yields whole months.
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let packed = |d: NaiveDate| {
        let month_index = i64::from(d.year()) * 12 + i64::from(d.month0());
        month_index * 32 + i64::from(d.day())
    };
    (packed(to) - packed(from)) / 32
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" | "days" => Ok(Self::Daily),
            "weekly" | "weeks" => Ok(Self::Weekly),
            "monthly" | "months" => Ok(Self::Monthly),
            "yearly" | "years" => Ok(Self::Yearly),
            _ => Err(UnknownFrequency(s.to_string())),
        }
    }
}

impl Serialize for Frequency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown frequency names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFrequency(String);

impl fmt::Display for UnknownFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown frequency: {}", self.0)
    }
}

impl std::error::Error for UnknownFrequency {}
