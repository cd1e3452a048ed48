use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::AttendanceError;

/// Direction flag as recorded by the terminal. Never inferred from the time of day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum PunchDirection {
    In,
    Out,
}

impl PunchDirection {
    /// Maps a terminal status code. 0 is check-in. 1 to 5 cover check-out,
    /// break out/in and overtime in/out, all of which close the day.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PunchDirection::In),
            1..=5 => Some(PunchDirection::Out),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchEvent {
    pub employee_id: u32,
    pub timestamp: NaiveDateTime,
    pub direction: PunchDirection,
}

impl PunchEvent {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}

/// A punch exactly as the terminal export carries it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPunch {
    pub user_id: String,
    pub timestamp: String,
    pub punch: i64,
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub(crate) fn parse_employee_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

impl RawPunch {
    /// Validates one raw punch. `index` is its position in the device log.
    pub fn to_event(&self, index: usize) -> Result<PunchEvent, AttendanceError> {
        let employee_id = parse_employee_id(&self.user_id).ok_or_else(|| {
            AttendanceError::MalformedPunch {
                index,
                reason: format!("employee id {:?} is not numeric", self.user_id),
            }
        })?;

        let timestamp = TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(self.timestamp.trim(), fmt).ok())
            .ok_or_else(|| AttendanceError::MalformedPunch {
                index,
                reason: format!("unparseable timestamp {:?}", self.timestamp),
            })?;

        let direction =
            PunchDirection::from_code(self.punch).ok_or_else(|| AttendanceError::MalformedPunch {
                index,
                reason: format!("unknown punch direction code {}", self.punch),
            })?;

        Ok(PunchEvent {
            employee_id,
            timestamp,
            direction,
        })
    }
}

pub fn parse_punches(raw: &[RawPunch]) -> Result<Vec<PunchEvent>, AttendanceError> {
    raw.iter()
        .enumerate()
        .map(|(index, punch)| punch.to_event(index))
        .collect()
}
