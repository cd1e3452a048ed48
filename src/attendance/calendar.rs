use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Month, NaiveDate, NaiveTime};

use crate::error::AttendanceError;
use crate::model::punch::PunchEvent;

/// A validated month/year reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    month: u32,
    year: i32,
}

impl ReportPeriod {
    /// Accepts months 1-12 of years `min_year..=today.year()` that have already started.
    pub fn new(month: u32, year: i32, min_year: i32, today: NaiveDate) -> Result<Self, AttendanceError> {
        if !(1..=12).contains(&month) {
            return Err(AttendanceError::invalid_period(month, year, "month must be between 1 and 12"));
        }
        if year < min_year || year > today.year() {
            return Err(AttendanceError::invalid_period(
                month,
                year,
                format!("year must be between {} and {}", min_year, today.year()),
            ));
        }

        let period = ReportPeriod { month, year };
        if period.first_day() > today {
            return Err(AttendanceError::invalid_period(month, year, "period has not started yet"));
        }
        Ok(period)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn month_name(&self) -> &'static str {
        Month::try_from(self.month as u8)
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    /// `October-2026`, used for report titles and download names.
    pub fn label(&self) -> String {
        format!("{}-{}", self.month_name(), self.year)
    }
}

/// The check-in/check-out pair for one employee on one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySlot {
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

impl DaySlot {
    pub fn is_set(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some()
    }
}

/// Reporting window plus one unset slot per roster employee per date.
///
/// Every employee's slot row has exactly `dates.len()` entries; index `i`
/// always refers to `dates[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSkeleton {
    dates: Vec<NaiveDate>,
    slots: BTreeMap<u32, Vec<DaySlot>>,
}

impl CalendarSkeleton {
    fn with_dates(dates: Vec<NaiveDate>, employee_ids: &[u32]) -> Self {
        let slots = employee_ids
            .iter()
            .map(|&id| (id, vec![DaySlot::default(); dates.len()]))
            .collect();
        Self { dates, slots }
    }

    /// Every distinct date seen in the punch log, ascending.
    pub fn full_history(punches: &[PunchEvent], employee_ids: &[u32]) -> Self {
        let dates: BTreeSet<NaiveDate> = punches.iter().map(PunchEvent::date).collect();
        Self::with_dates(dates.into_iter().collect(), employee_ids)
    }

    /// Weekdays of `period`, stopping at `today` when the period is the current month.
    pub fn for_period(period: ReportPeriod, employee_ids: &[u32], today: NaiveDate) -> Self {
        let first = period.first_day();
        let last = if period.contains(today) {
            today
        } else {
            period.last_day()
        };

        let dates = first
            .iter_days()
            .take_while(|d| *d <= last)
            .filter(|d| d.weekday().number_from_monday() <= 5)
            .collect();

        Self::with_dates(dates, employee_ids)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    pub fn date_index(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    pub fn employee_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.keys().copied()
    }

    pub fn slots(&self, employee_id: u32) -> Option<&[DaySlot]> {
        self.slots.get(&employee_id).map(Vec::as_slice)
    }

    pub(crate) fn slot_mut(&mut self, employee_id: u32, index: usize) -> Option<&mut DaySlot> {
        self.slots.get_mut(&employee_id)?.get_mut(index)
    }

    pub fn has_activity(&self, employee_id: u32) -> bool {
        self.slots(employee_id)
            .is_some_and(|row| row.iter().any(DaySlot::is_set))
    }
}
