use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveTime;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    #[error("invalid period {month:02}/{year}: {reason}")]
    InvalidPeriod { month: u32, year: i32, reason: String },

    #[error("malformed punch at position {index}: {reason}")]
    MalformedPunch { index: usize, reason: String },

    #[error("no attendance data for {0}")]
    NoData(String),

    #[error("check-out {check_out} is earlier than check-in {check_in}")]
    InvalidShift {
        check_in: NaiveTime,
        check_out: NaiveTime,
    },
}

impl AttendanceError {
    pub fn invalid_period(month: u32, year: i32, reason: impl Into<String>) -> Self {
        AttendanceError::InvalidPeriod {
            month,
            year,
            reason: reason.into(),
        }
    }

    pub fn no_data(scope: impl Into<String>) -> Self {
        AttendanceError::NoData(scope.into())
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::InvalidPeriod { .. } => StatusCode::BAD_REQUEST,
            AttendanceError::NoData(_) => StatusCode::NOT_FOUND,
            AttendanceError::InvalidShift { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            // the terminal handed us data we cannot trust
            AttendanceError::MalformedPunch { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            AttendanceError::invalid_period(13, 2024, "month out of range").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AttendanceError::no_data("May 2024").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AttendanceError::InvalidShift {
                check_in: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                check_out: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn messages_name_the_problem() {
        let err = AttendanceError::invalid_period(2, 2019, "year must be between 2023 and 2026");
        assert_eq!(
            err.to_string(),
            "invalid period 02/2019: year must be between 2023 and 2026"
        );
    }
}
