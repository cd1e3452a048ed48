use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::{Serialize, Serializer};

use crate::error::AttendanceError;

const STANDARD_SHIFT_HOURS: i64 = 9;
/// Overages at or below this many minutes are not counted.
const OVERTIME_THRESHOLD_MINUTES: i64 = 40;

/// Overtime in whole minutes, written as `HH:MM`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExtraTime(u32);

impl ExtraTime {
    pub const ZERO: ExtraTime = ExtraTime(0);

    #[cfg(test)]
    pub fn from_minutes(minutes: u32) -> Self {
        ExtraTime(minutes)
    }

    pub fn total_minutes(self) -> u32 {
        self.0
    }

    pub fn hours(self) -> u32 {
        self.0 / 60
    }

    pub fn minutes(self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for ExtraTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl Serialize for ExtraTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Overtime beyond the 9-hour standard shift.
///
/// Either side unset means no overtime. Check-out earlier than check-in on the
/// same day (overnight shifts, or a break punched out before the return) is
/// rejected here; report builders decide how to carry on.
pub fn calculate_extra_time(
    check_in: Option<NaiveTime>,
    check_out: Option<NaiveTime>,
) -> Result<ExtraTime, AttendanceError> {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return Ok(ExtraTime::ZERO);
    };

    let worked = check_out - check_in;
    if worked < Duration::zero() {
        return Err(AttendanceError::InvalidShift {
            check_in,
            check_out,
        });
    }

    let standard = Duration::hours(STANDARD_SHIFT_HOURS);
    if worked <= standard {
        return Ok(ExtraTime::ZERO);
    }

    // seconds are dropped, not rounded
    let excess_minutes = (worked - standard).num_minutes();
    if excess_minutes > OVERTIME_THRESHOLD_MINUTES {
        Ok(ExtraTime(excess_minutes as u32))
    } else {
        Ok(ExtraTime::ZERO)
    }
}
