use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::validate::{compare, is_within_bounds};
use crate::DateValue;

/// Optional inclusive lower and upper limits on selectable dates.
///
/// The two ends may be given in different calendars; they are compared
/// after normalising to a common one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct DateBounds {
    min: Option<DateValue>,
    max: Option<DateValue>,
}

/// Error type for bounds construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// Lower limit is after upper limit.
    #[error("Invalid bounds: min ({min}) is after max ({max})")]
    InvalidRange { min: DateValue, max: DateValue },
}

impl DateBounds {
    /// No limits at either end.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// # Errors
    /// Returns `BoundsError::InvalidRange` if `min` is after `max`.
    pub fn new(min: Option<DateValue>, max: Option<DateValue>) -> Result<Self, BoundsError> {
        if let (Some(min), Some(max)) = (min, max) {
            if compare(min, max) == Some(Ordering::Greater) {
                return Err(BoundsError::InvalidRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub const fn min(&self) -> Option<DateValue> {
        self.min
    }

    pub const fn max(&self) -> Option<DateValue> {
        self.max
    }

    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Inclusive at both ends.
    pub fn contains(&self, date: DateValue) -> bool {
        is_within_bounds(date, self.min, self.max)
    }
}

impl std::fmt::Display for DateBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let end = |value: Option<DateValue>| value.map_or_else(|| "..".to_owned(), |v| v.to_string());
        write!(f, "{} / {}", end(self.min), end(self.max))
    }
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<DateValue>,
}

impl TryFrom<RawBounds> for DateBounds {
    type Error = BoundsError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl From<DateBounds> for RawBounds {
    fn from(bounds: DateBounds) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
        }
    }
}
