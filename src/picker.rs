//! Headless BS date picker.
//!
//! [`PickerController`] owns the view (day grid, month list, year list),
//! the selected date and the text field, and mediates between three inputs:
//! typing, clicks, and the value the host feeds back in. Every operation is
//! synchronous. Operations that may produce a value for the host return an
//! [`Emission`]; nothing is emitted any other way.
//!
//! The host usually echoes an emitted value straight back through
//! [`PickerController::receive_external_value`]. The controller remembers
//! the last value it emitted and treats a matching input as an echo, so the
//! round trip never re-parses or re-emits.

use crate::bounds::DateBounds;
use crate::config::{ConfigError, PickerConfig};
use crate::consts::{MAX_MONTH, MIN_DAY, YEAR_WINDOW};
use crate::date::{AdDate, BsDate, DateValue};
use crate::format::{DatePattern, format, format_canonical, parse, to_devanagari_digits};
use crate::grid::{DayGrid, MonthCell, YearCell};
use crate::prelude::*;
use crate::table::{month_name, table, weekday_name};
use crate::types::Month;
use crate::validate::meets_minimum_age;
use crate::{Calendar, CalendarDate, ConversionError, DAYS_IN_WEEK, Locale, ParseError};

/// Which of the three views is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum ViewMode {
    /// Day grid of `view_year`/`view_month`
    #[default]
    #[display(fmt = "calendar")]
    Calendar,
    /// The twelve months of `view_year`
    #[display(fmt = "month list")]
    MonthList,
    /// A window of `YEAR_WINDOW` years
    #[display(fmt = "year list")]
    YearList,
}

/// Everything the host needs to render the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    pub view_mode: ViewMode,
    pub view_year: u16,
    /// Always `1..=12`
    pub view_month: u8,
    pub selected: Option<BsDate>,
    /// Contents of the text field, exactly as typed or as last formatted.
    pub raw_text: String,
    /// First and last year of the year list, inclusive.
    pub year_window: (u16, u16),
    /// Whether the popover is showing.
    pub open: bool,
}

/// A value handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Emission {
    /// Canonical `YYYY-MM-DD` in the configured calendar.
    Value(String),
    /// The field was emptied.
    Cleared,
}

impl Emission {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Cleared => None,
        }
    }
}

/// What [`PickerController::receive_external_value`] did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalSync {
    /// The value was the controller's own last emission.
    Echo,
    /// A new value was parsed and displayed.
    Adopted,
    /// No value; the selection was cleared.
    Cleared,
    /// The value could not be read; it is shown verbatim with no selection.
    Unparsable,
}

/// Why the text field does not hold an acceptable date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Parsed, but outside the bounds or below the minimum age.
    #[error("{0} is not selectable")]
    Disabled(DateValue),
}

/// Date-picker state machine. See the module docs.
#[derive(Debug, Clone)]
pub struct PickerController {
    config: PickerConfig,
    bounds: DateBounds,
    pattern: DatePattern,
    today: AdDate,
    state: PickerState,
    last_emitted: Option<String>,
}

impl PickerController {
    /// Creates a closed picker showing the current month.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is inconsistent.
    pub fn new(config: PickerConfig) -> Result<Self, ConfigError> {
        Self::with_today(config, AdDate::today())
    }

    /// Like [`PickerController::new`] with a fixed "today", used for the
    /// minimum-age rule and the initial view.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is inconsistent.
    pub fn with_today(config: PickerConfig, today: AdDate) -> Result<Self, ConfigError> {
        let (bounds, pattern) = config.validate()?;
        let (view_year, view_month) = view_for(today);
        let state = PickerState {
            view_mode: ViewMode::Calendar,
            view_year,
            view_month,
            selected: None,
            raw_text: String::new(),
            year_window: window_for(view_year),
            open: false,
        };
        debug!("picker created at {view_year}-{view_month:02} (today {today})");
        Ok(Self {
            config,
            bounds,
            pattern,
            today,
            state,
            last_emitted: None,
        })
    }

    /// Seeds the picker with the host's controlled value.
    #[must_use]
    pub fn with_value(mut self, value: Option<&str>) -> Self {
        self.receive_external_value(value);
        self
    }

    pub const fn state(&self) -> &PickerState {
        &self.state
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn today(&self) -> AdDate {
        self.today
    }

    /// The canonical value most recently emitted, until the host replaces it.
    pub fn last_emitted(&self) -> Option<&str> {
        self.last_emitted.as_deref()
    }

    /// The selection in the configured value calendar.
    pub fn selected_value(&self) -> Option<DateValue> {
        let selected = DateValue::Bs(self.state.selected?);
        selected.to_calendar(self.config.value_calendar()).ok()
    }

    pub fn open(&mut self) {
        if let Some(selected) = self.state.selected {
            self.show(selected.year(), selected.month());
        }
        self.state.view_mode = ViewMode::Calendar;
        self.state.open = true;
        debug!("picker opened at {}-{:02}", self.state.view_year, self.state.view_month);
    }

    pub fn close(&mut self) {
        self.state.open = false;
        debug!("picker closed");
    }

    pub fn navigate_prev(&mut self) {
        self.navigate(-1);
    }

    pub fn navigate_next(&mut self) {
        self.navigate(1);
    }

    /// Pages the current view. Moves that would leave the month table are
    /// ignored.
    fn navigate(&mut self, delta: i32) {
        let t = table();
        match self.state.view_mode {
            ViewMode::Calendar => {
                let total = i32::from(self.state.view_month) - 1 + delta;
                let year = i32::from(self.state.view_year) + total.div_euclid(12);
                let month = total.rem_euclid(12) + 1;
                if let (Ok(year), Ok(month)) = (u16::try_from(year), u8::try_from(month)) {
                    if t.contains_year(year) {
                        self.show(year, month);
                    }
                }
            }
            ViewMode::MonthList => {
                let year = i32::from(self.state.view_year) + delta;
                if let Ok(year) = u16::try_from(year) {
                    if t.contains_year(year) {
                        self.state.view_year = year;
                    }
                }
            }
            ViewMode::YearList => {
                let (start, _) = self.state.year_window;
                let start = i32::from(start) + delta * i32::from(YEAR_WINDOW);
                let end = start + i32::from(YEAR_WINDOW) - 1;
                if start <= i32::from(t.last_year()) && end >= i32::from(t.first_year()) {
                    if let (Ok(start), Ok(end)) = (u16::try_from(start), u16::try_from(end)) {
                        self.state.year_window = (start, end);
                    }
                }
            }
        }
        debug!(
            "picker navigated {delta:+} in {}: {}-{:02}, years {:?}",
            self.state.view_mode, self.state.view_year, self.state.view_month, self.state.year_window
        );
    }

    /// Header click: day grid, then month list, then year list, then back.
    pub fn drill_in(&mut self) {
        self.state.view_mode = match self.state.view_mode {
            ViewMode::Calendar => ViewMode::MonthList,
            ViewMode::MonthList => {
                self.state.year_window = window_for(self.state.view_year);
                ViewMode::YearList
            }
            ViewMode::YearList => ViewMode::Calendar,
        };
        debug!("picker drilled into {}", self.state.view_mode);
    }

    /// Chooses a year from the year list. Years outside the table are ignored.
    pub fn pick_year(&mut self, year: u16) {
        if !table().contains_year(year) {
            return;
        }
        self.state.view_year = year;
        self.state.view_mode = ViewMode::MonthList;
        debug!("picker year {year}");
    }

    /// Chooses a month from the month list.
    pub fn pick_month(&mut self, month: u8) {
        if Month::new(month).is_err() {
            return;
        }
        self.state.view_month = month;
        self.state.view_mode = ViewMode::Calendar;
        debug!("picker month {}-{month:02}", self.state.view_year);
    }

    /// Clicks a day of the shown month. Selects it, emits it and closes the
    /// popover, unless the day is disabled, in which case nothing happens.
    pub fn pick_day(&mut self, day: u8) -> Option<Emission> {
        let date = BsDate::new(self.state.view_year, self.state.view_month, day).ok()?;
        if self.is_disabled(date) {
            debug!("picker ignored click on disabled {date}");
            return None;
        }
        let value = self.canonical_value(date).ok()?;
        self.state.selected = Some(date);
        self.state.raw_text = self.display_text(date);
        self.state.open = false;
        Some(self.emit(value))
    }

    /// Records a keystroke's worth of text.
    ///
    /// The text is kept as typed. When it reads as a selectable date the
    /// selection and view follow it, and the value is emitted if it changed.
    /// Anything else, such as a half-typed `2081-0`, is tolerated silently.
    pub fn type_text(&mut self, text: &str) -> Option<Emission> {
        self.state.raw_text = text.to_owned();

        if text.trim().is_empty() {
            self.state.selected.take()?;
            self.last_emitted = None;
            debug!("picker cleared by typing");
            return Some(Emission::Cleared);
        }

        let date = match self.resolve_text(text) {
            Ok(date) => date,
            Err(err) => {
                trace!("picker holding partial input {text:?}: {err}");
                return None;
            }
        };
        self.show(date.year(), date.month());
        if self.state.selected == Some(date) {
            return None;
        }
        let value = self.canonical_value(date).ok()?;
        self.state.selected = Some(date);
        Some(self.emit(value))
    }

    /// Accepts the host's controlled value (canonical `YYYY-MM-DD` in the
    /// configured calendar, or nothing). Never emits.
    pub fn receive_external_value(&mut self, value: Option<&str>) -> ExternalSync {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            self.state.selected = None;
            self.state.raw_text.clear();
            self.last_emitted = None;
            debug!("picker value cleared by host");
            return ExternalSync::Cleared;
        };

        if self.last_emitted.as_deref() == Some(value) {
            if let Some(selected) = self.state.selected {
                self.show(selected.year(), selected.month());
            }
            debug!("picker ignored echo of {value}");
            return ExternalSync::Echo;
        }

        self.last_emitted = None;
        let calendar = self.config.value_calendar();
        let parsed = parse(value, &DatePattern::canonical())
            .and_then(|fields| Ok(fields.in_calendar(calendar)?))
            .map_err(PickerError::from)
            .and_then(|date| Ok(date.to_bs()?));
        match parsed {
            Ok(date) => {
                self.state.selected = Some(date);
                self.state.raw_text = self.display_text(date);
                self.show(date.year(), date.month());
                debug!("picker adopted host value {value} as {date} BS");
                ExternalSync::Adopted
            }
            Err(err) => {
                self.state.selected = None;
                self.state.raw_text = value.to_owned();
                debug!("picker could not read host value {value:?}: {err}");
                ExternalSync::Unparsable
            }
        }
    }

    /// Resolves the text field on blur or submit.
    ///
    /// # Errors
    /// Returns why the text is not an acceptable date. Empty text is not an
    /// error; whether a value is required is the host's concern.
    pub fn commit(&self) -> Result<Option<DateValue>, PickerError> {
        if self.state.raw_text.trim().is_empty() {
            return Ok(None);
        }
        let date = self.resolve_text(&self.state.raw_text)?;
        let value = DateValue::Bs(date).to_calendar(self.config.value_calendar())?;
        Ok(Some(value))
    }

    /// Shows the day grid of the current month.
    pub fn show_today(&mut self) {
        let (year, month) = view_for(self.today);
        self.show(year, month);
        self.state.view_mode = ViewMode::Calendar;
        debug!("picker jumped to today");
    }

    /// Whether `date` is out of bounds or too recent for the minimum age.
    pub fn is_disabled(&self, date: BsDate) -> bool {
        if !self.bounds.contains(DateValue::Bs(date)) {
            return true;
        }
        self.config.min_age > 0
            && !meets_minimum_age(date.fields(), Calendar::Bs, self.config.min_age, self.today)
    }

    /// [`PickerController::is_disabled`] for a day of the shown month; days
    /// the month does not have are disabled.
    pub fn is_day_disabled(&self, day: u8) -> bool {
        match BsDate::new(self.state.view_year, self.state.view_month, day) {
            Ok(date) => self.is_disabled(date),
            Err(_) => true,
        }
    }

    pub fn day_grid(&self) -> DayGrid {
        let (year, month) = (self.state.view_year, self.state.view_month);
        let length = table().month_length(year, month).unwrap_or(0);
        let first_weekday = BsDate::new(year, month, MIN_DAY)
            .ok()
            .and_then(|first| first.weekday().ok())
            .unwrap_or(0);
        let today = self.today.to_bs().ok().map(|d| d.fields());
        let selected = self.state.selected.map(|d| d.fields());

        DayGrid::new(year, month, first_weekday, length, |day| {
            let here = Some(CalendarDate::new(year, month, day));
            (selected == here, today == here, self.is_day_disabled(day))
        })
    }

    pub fn month_cells(&self) -> Vec<MonthCell> {
        let selected = self.state.selected;
        (1..=MAX_MONTH)
            .filter_map(|m| Month::new(m).ok())
            .map(|month| MonthCell {
                month: month.get(),
                name: month_name(Calendar::Bs, month, self.config.calendar_locale),
                current: month.get() == self.state.view_month,
                selected: selected
                    .is_some_and(|d| d.year() == self.state.view_year && d.month() == month.get()),
            })
            .collect()
    }

    pub fn year_cells(&self) -> Vec<YearCell> {
        let (start, end) = self.state.year_window;
        let selected = self.state.selected.map(|d| d.year());
        (start..=end)
            .map(|year| YearCell {
                year,
                label: self.localized_number(year),
                current: year == self.state.view_year,
                selected: selected == Some(year),
                disabled: !table().contains_year(year),
            })
            .collect()
    }

    /// Short weekday names, Sunday first.
    pub fn weekday_labels(&self) -> [&'static str; DAYS_IN_WEEK as usize] {
        std::array::from_fn(|i| weekday_name(i as u8, self.config.calendar_locale, true))
    }

    /// Title above the current view, e.g. `Baisakh 2081`.
    pub fn header_label(&self) -> String {
        let year = self.localized_number(self.state.view_year);
        match self.state.view_mode {
            ViewMode::Calendar => {
                let name = Month::new(self.state.view_month)
                    .map_or("", |m| month_name(Calendar::Bs, m, self.config.calendar_locale));
                format!("{name} {year}")
            }
            ViewMode::MonthList => year,
            ViewMode::YearList => {
                let (start, end) = self.state.year_window;
                format!(
                    "{} - {}",
                    self.localized_number(start),
                    self.localized_number(end)
                )
            }
        }
    }

    /// Parses text under the typed-calendar policy and checks it is
    /// selectable.
    fn resolve_text(&self, text: &str) -> Result<BsDate, PickerError> {
        let fields = parse(text, &self.pattern)?;
        // Sniff the year field, whatever position the pattern puts it in
        let calendar = self.config.typed_calendar.resolve(&format_canonical(fields));
        let value = fields.in_calendar(calendar).map_err(ParseError::from)?;
        let date = value.to_bs()?;
        if self.is_disabled(date) {
            return Err(PickerError::Disabled(value));
        }
        Ok(date)
    }

    fn canonical_value(&self, date: BsDate) -> Result<String, ConversionError> {
        Ok(DateValue::Bs(date)
            .to_calendar(self.config.value_calendar())?
            .canonical())
    }

    /// Text-field rendering of `date`, in the calendar typed text is read
    /// in so the field commits back to the same date.
    fn display_text(&self, date: BsDate) -> String {
        let calendar = self.config.typed_calendar.resolve(&format_canonical(date.fields()));
        let fields = DateValue::Bs(date)
            .to_calendar(calendar)
            .map_or_else(|_| date.fields(), |shown| shown.fields());
        format(fields, &self.pattern, self.config.value_locale)
    }

    fn localized_number(&self, n: u16) -> String {
        match self.config.calendar_locale {
            Locale::En => n.to_string(),
            Locale::Ne => to_devanagari_digits(&n.to_string()),
        }
    }

    fn emit(&mut self, value: String) -> Emission {
        debug!("picker emitting {value}");
        self.last_emitted = Some(value.clone());
        Emission::Value(value)
    }

    fn show(&mut self, year: u16, month: u8) {
        self.state.view_year = year;
        self.state.view_month = month;
    }
}

/// BS year and month containing `today`, clamped to the table.
fn view_for(today: AdDate) -> (u16, u8) {
    if let Ok(bs) = today.to_bs() {
        return (bs.year(), bs.month());
    }
    let t = table();
    match t.ad_range() {
        Ok((first, _)) if today < first => (t.first_year(), 1),
        Ok(_) => (t.last_year(), MAX_MONTH),
        Err(_) => (t.first_year(), 1),
    }
}

/// The aligned year-list window holding `year`.
fn window_for(year: u16) -> (u16, u16) {
    let first = table().first_year();
    let start = year - year.saturating_sub(first) % YEAR_WINDOW;
    (start, start + YEAR_WINDOW - 1)
}
