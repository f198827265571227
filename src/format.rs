//! Rendering dates to text and reading them back.
//!
//! Numeral script (Latin or Devanagari) is chosen by [`Locale`] and is
//! independent of the calendar: a BS date can be written with Latin digits
//! and an AD date with Devanagari ones. The parser accepts either script.

use crate::consts::{CANONICAL_PATTERN, DATE_SEPARATOR, MAX_BS_YEAR, MIN_BS_YEAR};
use crate::prelude::*;
use crate::{CalendarDate, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Language used for names and digits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[display(fmt = "en")]
    En,
    #[display(fmt = "ne")]
    Ne,
}

const DEVANAGARI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Replaces ASCII digits with Devanagari digits; everything else is kept.
pub fn to_devanagari_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => DEVANAGARI_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Replaces Devanagari digits with ASCII digits; everything else is kept.
pub fn to_latin_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            DEVANAGARI_DIGITS
                .iter()
                .position(|&d| d == c)
                .and_then(|i| char::from_digit(i as u32, 10))
                .unwrap_or(c)
        })
        .collect()
}

fn localize_digits(text: String, locale: Locale) -> String {
    match locale {
        Locale::En => text,
        Locale::Ne => to_devanagari_digits(&text),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year,
    Month { padded: bool },
    Day { padded: bool },
    Literal(char),
}

impl Token {
    const fn is_field(self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

/// A date layout such as `YYYY-MM-DD` or `DD/MM/YYYY`.
///
/// Recognised tokens are `YYYY`, `MM`, `M`, `DD` and `D` (unpadded forms
/// print without a leading zero). Every other character is a literal. Each
/// field must appear exactly once and adjacent fields must be separated by
/// at least one literal so that text can be split back into fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatePattern {
    source: String,
    tokens: Vec<Token>,
}

impl DatePattern {
    /// # Errors
    /// Returns `ParseError::InvalidPattern` for missing, repeated or
    /// unseparated fields.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let invalid = |why: &str| ParseError::InvalidPattern(format!("{source}: {why}"));
        let chars: Vec<char> = source.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let run = chars[i..].iter().take_while(|&&x| x == c).count();
            match (c, run) {
                ('Y', 4) => tokens.push(Token::Year),
                ('Y', _) => return Err(invalid("year must be written YYYY")),
                ('M', 1 | 2) => tokens.push(Token::Month { padded: run == 2 }),
                ('D', 1 | 2) => tokens.push(Token::Day { padded: run == 2 }),
                ('M' | 'D', _) => return Err(invalid("month and day take one or two letters")),
                _ => {
                    tokens.extend(std::iter::repeat_n(Token::Literal(c), run));
                }
            }
            i += run;
        }

        let count = |pred: fn(&Token) -> bool| tokens.iter().filter(|t| pred(t)).count();
        if count(|t| *t == Token::Year) != 1
            || count(|t| matches!(t, Token::Month { .. })) != 1
            || count(|t| matches!(t, Token::Day { .. })) != 1
        {
            return Err(invalid("needs exactly one year, month and day"));
        }
        if tokens.windows(2).any(|w| w[0].is_field() && w[1].is_field()) {
            return Err(invalid("fields must be separated"));
        }

        Ok(Self {
            source: source.to_owned(),
            tokens,
        })
    }

    /// `YYYY-MM-DD`
    pub fn canonical() -> Self {
        Self {
            source: CANONICAL_PATTERN.to_owned(),
            tokens: vec![
                Token::Year,
                Token::Literal(DATE_SEPARATOR),
                Token::Month { padded: true },
                Token::Literal(DATE_SEPARATOR),
                Token::Day { padded: true },
            ],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self::canonical()
    }
}

impl TryFrom<String> for DatePattern {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<DatePattern> for String {
    fn from(pattern: DatePattern) -> Self {
        pattern.source
    }
}

impl std::fmt::Display for DatePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Renders `date` following `pattern`, with digits in the script of `locale`.
pub fn format(date: CalendarDate, pattern: &DatePattern, locale: Locale) -> String {
    let mut out = String::with_capacity(pattern.source.len());
    for token in &pattern.tokens {
        // Writing to a String cannot fail
        let _ = match *token {
            Token::Year => write!(out, "{:04}", date.year),
            Token::Month { padded: true } => write!(out, "{:02}", date.month),
            Token::Month { padded: false } => write!(out, "{}", date.month),
            Token::Day { padded: true } => write!(out, "{:02}", date.day),
            Token::Day { padded: false } => write!(out, "{}", date.day),
            Token::Literal(c) => {
                out.push(c);
                Ok(())
            }
        };
    }
    localize_digits(out, locale)
}

/// The canonical exchange form: `YYYY-MM-DD` with ASCII digits.
pub fn format_canonical(date: CalendarDate) -> String {
    date.to_string()
}

/// Reads text laid out as `pattern` into raw fields.
///
/// Devanagari digits are accepted. The result is not checked against any
/// calendar; whether it is a BS or an AD date is the caller's decision.
///
/// # Errors
/// `EmptyInput` for blank text, `Malformed` for a wrong number of fields,
/// non-numeric fields, or fields too long for their slot.
pub fn parse(text: &str, pattern: &DatePattern) -> Result<CalendarDate, ParseError> {
    let normalized = to_latin_digits(text.trim());
    if normalized.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let malformed = || ParseError::Malformed(text.trim().to_owned());

    let mut fields = CalendarDate::new(0, 0, 0);
    let mut rest = normalized.as_str();
    let mut tokens = pattern.tokens.iter().peekable();

    while let Some(&token) = tokens.next() {
        if let Token::Literal(c) = token {
            rest = rest.strip_prefix(c).ok_or_else(malformed)?;
            continue;
        }

        // The field runs up to the literal that follows it, or to the end
        let field = match tokens.peek() {
            Some(&&Token::Literal(sep)) => {
                let end = rest.find(sep).ok_or_else(malformed)?;
                let (field, tail) = rest.split_at(end);
                rest = tail;
                field
            }
            _ => std::mem::take(&mut rest),
        };

        let max_len = if token == Token::Year { 4 } else { 2 };
        if field.is_empty() || field.len() > max_len || !field.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }
        match token {
            Token::Year => fields.year = field.parse().map_err(|_| malformed())?,
            Token::Month { .. } => fields.month = field.parse().map_err(|_| malformed())?,
            Token::Day { .. } => fields.day = field.parse().map_err(|_| malformed())?,
            Token::Literal(_) => {}
        }
    }

    if !rest.is_empty() {
        return Err(malformed());
    }
    Ok(fields)
}

/// Guesses whether `text` holds a BS date: true iff its leading number falls
/// inside the supported BS year range.
///
/// This is a heuristic only. Gregorian years 1970 to the present sit inside
/// that range too, so an AD date such as `2024-04-13` is reported as BS.
/// Hosts that know which calendar they collect should say so instead of
/// relying on this.
pub fn looks_like_bs(text: &str) -> bool {
    let normalized = to_latin_digits(text.trim());
    let digits: String = normalized.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || digits.len() > 4 {
        return false;
    }
    digits
        .parse::<u16>()
        .is_ok_and(|year| (MIN_BS_YEAR..=MAX_BS_YEAR).contains(&year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd() -> DatePattern {
        DatePattern::canonical()
    }

    #[test]
    fn test_digit_conversion() {
        assert_eq!(to_devanagari_digits("2081-01-15"), "२०८१-०१-१५");
        assert_eq!(to_latin_digits("२०८१-०१-१५"), "2081-01-15");
        assert_eq!(to_latin_digits("२०८1-0१"), "2081-01");
        assert_eq!(to_devanagari_digits("Baisakh"), "Baisakh");
    }

    #[test]
    fn test_pattern_new() {
        assert_eq!(DatePattern::new("YYYY-MM-DD").unwrap(), ymd());
        assert!(DatePattern::new("DD/MM/YYYY").is_ok());
        assert!(DatePattern::new("YYYY.M.D").is_ok());
    }

    #[test]
    fn test_pattern_rejects_bad_layouts() {
        for source in ["YY-MM-DD", "YYYY-MM", "YYYYMMDD", "YYYY-MM-DD-DD", "YYYY-MMM-DD", ""] {
            assert!(
                matches!(DatePattern::new(source), Err(ParseError::InvalidPattern(_))),
                "{source} should be rejected"
            );
        }
    }

    #[test]
    fn test_pattern_serde() {
        let pattern: DatePattern = serde_json::from_str(r#""DD/MM/YYYY""#).unwrap();
        assert_eq!(pattern.as_str(), "DD/MM/YYYY");
        assert_eq!(serde_json::to_string(&pattern).unwrap(), r#""DD/MM/YYYY""#);
        let result: Result<DatePattern, _> = serde_json::from_str(r#""YY""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_format() {
        let date = CalendarDate::new(2081, 1, 5);
        assert_eq!(format(date, &ymd(), Locale::En), "2081-01-05");
        assert_eq!(format(date, &ymd(), Locale::Ne), "२०८१-०१-०५");

        let dmy = DatePattern::new("D/M/YYYY").unwrap();
        assert_eq!(format(date, &dmy, Locale::En), "5/1/2081");
        assert_eq!(format_canonical(date), "2081-01-05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            parse("2081-01-15", &ymd()).unwrap(),
            CalendarDate::new(2081, 1, 15)
        );
        assert_eq!(
            parse(" २०८१-०१-१५ ", &ymd()).unwrap(),
            CalendarDate::new(2081, 1, 15)
        );
        assert_eq!(
            parse("2081-1-5", &ymd()).unwrap(),
            CalendarDate::new(2081, 1, 5)
        );

        let dmy = DatePattern::new("DD/MM/YYYY").unwrap();
        assert_eq!(
            parse("15/01/2081", &dmy).unwrap(),
            CalendarDate::new(2081, 1, 15)
        );
    }

    #[test]
    fn test_parse_does_not_validate_calendar() {
        // Field ranges are the calendar's business
        assert_eq!(
            parse("2081-13-40", &ymd()).unwrap(),
            CalendarDate::new(2081, 13, 40)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in [
            "2081-0",
            "2081-01",
            "2081-01-15-23",
            "2081-0A-15",
            "2081--15",
            "20811-01-15",
            "2081-001-15",
            "2081/01/15",
            "-2081-01-15",
        ] {
            assert!(
                matches!(parse(text, &ymd()), Err(ParseError::Malformed(_))),
                "{text} should be malformed"
            );
        }
        assert!(matches!(parse("   ", &ymd()), Err(ParseError::EmptyInput)));
    }

    #[test]
    fn test_format_parse_scenario() {
        let parsed = parse("2081-01-15", &ymd()).unwrap();
        assert_eq!(format(parsed, &ymd(), Locale::En), "2081-01-15");
    }

    #[test]
    fn test_looks_like_bs() {
        assert!(looks_like_bs("2081-01-15"));
        assert!(looks_like_bs("२०८१-०१-१५"));
        assert!(looks_like_bs("1970"));
        assert!(looks_like_bs("2100-12-30"));
        assert!(!looks_like_bs("1969-01-01"));
        assert!(!looks_like_bs("2101-01-01"));
        assert!(!looks_like_bs("15/01/2081"));
        assert!(!looks_like_bs(""));
        // The documented ambiguity: Gregorian years in range look like BS
        assert!(looks_like_bs("2024-04-13"));
    }

    #[test]
    fn test_locale_serde() {
        assert_eq!(serde_json::to_string(&Locale::Ne).unwrap(), r#""ne""#);
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::Ne.to_string(), "ne");
    }
}
