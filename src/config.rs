//! Options a host passes to [`crate::PickerController`].

use serde::{Deserialize, Serialize};

use crate::bounds::{BoundsError, DateBounds};
use crate::consts::CANONICAL_PATTERN;
use crate::format::{DatePattern, Locale, looks_like_bs};
use crate::prelude::*;
use crate::{Calendar, DateValue, ParseError};

/// How the picker interprets dates typed as free text.
///
/// Years 1970-2100 exist in both calendars, so the calendar of typed text
/// cannot be inferred reliably. Hosts pick the rule explicitly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TypedCalendar {
    /// Typed text is always a BS date.
    #[default]
    #[display(fmt = "bs")]
    Bs,
    /// Typed text is always an AD date and is converted for display.
    #[display(fmt = "ad")]
    Ad,
    /// Guess from the leading year with [`looks_like_bs`].
    #[display(fmt = "sniff")]
    Sniff,
}

impl TypedCalendar {
    /// The calendar `text` is read in under this policy.
    pub fn resolve(self, text: &str) -> Calendar {
        match self {
            Self::Bs => Calendar::Bs,
            Self::Ad => Calendar::Ad,
            Self::Sniff if looks_like_bs(text) => Calendar::Bs,
            Self::Sniff => Calendar::Ad,
        }
    }
}

/// Error type for picker configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid picker bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("Invalid display pattern: {0}")]
    Pattern(#[source] ParseError),
}

/// Picker options, fixed for the lifetime of a controller.
///
/// Keys use camelCase when (de)serialised, and every key is optional:
///
/// ```
/// use sambat::{Locale, PickerConfig};
///
/// let config: PickerConfig =
///     serde_json::from_str(r#"{"calendarLocale":"ne","convertToBs":true,"minAge":18}"#)?;
/// assert_eq!(config.calendar_locale, Locale::Ne);
/// assert_eq!(config.min_age, 18);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// Language of month and weekday names.
    pub calendar_locale: Locale,
    /// Digits used in the text field.
    pub value_locale: Locale,
    /// Emit BS values instead of AD ones.
    pub convert_to_bs: bool,
    /// Minimum age in whole years; `0` disables the rule.
    pub min_age: u16,
    /// Presentation only.
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<DateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<DateValue>,
    /// Layout of the text field.
    pub display_pattern: String,
    pub typed_calendar: TypedCalendar,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            calendar_locale: Locale::En,
            value_locale: Locale::En,
            convert_to_bs: false,
            min_age: 0,
            required: false,
            min: None,
            max: None,
            display_pattern: CANONICAL_PATTERN.to_owned(),
            typed_calendar: TypedCalendar::Bs,
        }
    }
}

impl PickerConfig {
    #[must_use]
    pub const fn with_calendar_locale(mut self, locale: Locale) -> Self {
        self.calendar_locale = locale;
        self
    }

    #[must_use]
    pub const fn with_value_locale(mut self, locale: Locale) -> Self {
        self.value_locale = locale;
        self
    }

    #[must_use]
    pub const fn with_convert_to_bs(mut self, convert_to_bs: bool) -> Self {
        self.convert_to_bs = convert_to_bs;
        self
    }

    #[must_use]
    pub const fn with_min_age(mut self, years: u16) -> Self {
        self.min_age = years;
        self
    }

    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, min: Option<DateValue>, max: Option<DateValue>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_display_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.display_pattern = pattern.into();
        self
    }

    #[must_use]
    pub const fn with_typed_calendar(mut self, policy: TypedCalendar) -> Self {
        self.typed_calendar = policy;
        self
    }

    /// The calendar of emitted values.
    pub const fn value_calendar(&self) -> Calendar {
        if self.convert_to_bs { Calendar::Bs } else { Calendar::Ad }
    }

    /// Checks the options and builds the derived values a controller needs.
    ///
    /// # Errors
    /// `ConfigError::InvalidBounds` when `min` is after `max`,
    /// `ConfigError::Pattern` when `display_pattern` does not parse.
    pub(crate) fn validate(&self) -> Result<(DateBounds, DatePattern), ConfigError> {
        let bounds = DateBounds::new(self.min, self.max)?;
        let pattern = DatePattern::new(&self.display_pattern).map_err(ConfigError::Pattern)?;
        Ok((bounds, pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BsDate;

    fn bs(year: u16, month: u8, day: u8) -> DateValue {
        DateValue::Bs(BsDate::new(year, month, day).expect("valid BS date"))
    }

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.calendar_locale, Locale::En);
        assert!(!config.convert_to_bs);
        assert_eq!(config.min_age, 0);
        assert_eq!(config.typed_calendar, TypedCalendar::Bs);
        assert_eq!(config.value_calendar(), Calendar::Ad);

        let (bounds, pattern) = config.validate().expect("default config is valid");
        assert!(bounds.is_unbounded());
        assert_eq!(pattern, DatePattern::canonical());
    }

    #[test]
    fn test_builders() {
        let config = PickerConfig::default()
            .with_calendar_locale(Locale::Ne)
            .with_value_locale(Locale::Ne)
            .with_convert_to_bs(true)
            .with_min_age(18)
            .with_required(true)
            .with_display_pattern("DD/MM/YYYY")
            .with_typed_calendar(TypedCalendar::Sniff);

        assert_eq!(config.value_calendar(), Calendar::Bs);
        assert_eq!(config.value_locale, Locale::Ne);
        assert!(config.required);
        let (_, pattern) = config.validate().expect("valid config");
        assert_eq!(pattern.as_str(), "DD/MM/YYYY");
    }

    #[test]
    fn test_validate_rejects_reversed_bounds() {
        let config = PickerConfig::default().with_bounds(Some(bs(2082, 1, 1)), Some(bs(2081, 1, 1)));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds(BoundsError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let config = PickerConfig::default().with_display_pattern("YYYYMMDD");
        let err = config.validate().expect_err("pattern without separators");
        assert!(matches!(err, ConfigError::Pattern(ParseError::InvalidPattern(_))));
        assert!(err.to_string().starts_with("Invalid display pattern"));
    }

    #[test]
    fn test_serde_camel_case() {
        let json = r#"{
            "calendarLocale": "ne",
            "valueLocale": "en",
            "convertToBs": true,
            "minAge": 18,
            "required": true,
            "min": {"calendar": "bs", "date": "2000-01-01"},
            "displayPattern": "YYYY/MM/DD",
            "typedCalendar": "sniff"
        }"#;
        let config: PickerConfig = serde_json::from_str(json).expect("failed to parse config");
        assert_eq!(config.calendar_locale, Locale::Ne);
        assert!(config.convert_to_bs);
        assert_eq!(config.min_age, 18);
        assert_eq!(config.min, Some(bs(2000, 1, 1)));
        assert_eq!(config.max, None);
        assert_eq!(config.display_pattern, "YYYY/MM/DD");
        assert_eq!(config.typed_calendar, TypedCalendar::Sniff);

        let back = serde_json::to_value(&config).expect("failed to serialize config");
        assert_eq!(back["convertToBs"], true);
        assert_eq!(back["typedCalendar"], "sniff");
        assert!(back.get("max").is_none());
    }

    #[test]
    fn test_serde_empty_object_is_default() {
        let config: PickerConfig = serde_json::from_str("{}").expect("failed to parse config");
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn test_typed_calendar_resolve() {
        assert_eq!(TypedCalendar::Bs.resolve("2024-04-13"), Calendar::Bs);
        assert_eq!(TypedCalendar::Ad.resolve("2081-01-01"), Calendar::Ad);
        assert_eq!(TypedCalendar::Sniff.resolve("2081-01-01"), Calendar::Bs);
        assert_eq!(TypedCalendar::Sniff.resolve("1960-01-01"), Calendar::Ad);
        assert_eq!(TypedCalendar::Sniff.to_string(), "sniff");
    }
}
