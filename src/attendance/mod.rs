pub mod calendar;
pub mod export;
pub mod overtime;
pub mod reconcile;
pub mod report;

use chrono::NaiveDate;

use crate::error::AttendanceError;
use crate::model::punch::{PunchEvent, parse_punches};
use crate::model::roster::EmployeeRoster;
use crate::source::DeviceSnapshot;
use calendar::{CalendarSkeleton, ReportPeriod};

/// A validated device snapshot, ready to be reconciled.
#[derive(Debug, Clone)]
pub struct PunchLog {
    pub roster: EmployeeRoster,
    pub punches: Vec<PunchEvent>,
}

impl PunchLog {
    pub fn from_snapshot(snapshot: &DeviceSnapshot) -> Result<Self, AttendanceError> {
        if snapshot.attendance.is_empty() {
            return Err(AttendanceError::no_data("terminal punch log"));
        }
        Ok(Self {
            roster: EmployeeRoster::from_users(&snapshot.users),
            punches: parse_punches(&snapshot.attendance)?,
        })
    }

    /// Weekday calendar for `period`, filled from the log.
    pub fn monthly(&self, period: ReportPeriod, today: NaiveDate) -> (CalendarSkeleton, EmployeeRoster) {
        let mut skeleton = CalendarSkeleton::for_period(period, &self.roster.ids(), today);
        let names = reconcile::reconcile(&self.punches, &mut skeleton, &self.roster, Some(period));
        (skeleton, names)
    }

    /// Calendar of every date present in the log, filled from the log.
    pub fn full_history(&self) -> (CalendarSkeleton, EmployeeRoster) {
        let mut skeleton = CalendarSkeleton::full_history(&self.punches, &self.roster.ids());
        let names = reconcile::reconcile(&self.punches, &mut skeleton, &self.roster, None);
        (skeleton, names)
    }
}
