use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::attendance::overtime::ExtraTime;

/// One employee, one day: the reconciled attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": 7,
        "name": "Nadia Rahman",
        "date": "2024-05-06",
        "check_in": "08:55:00",
        "check_out": "19:05:00",
        "extra_time": "01:10"
    })
)]
pub struct ResolvedAttendanceRecord {
    #[schema(example = 7)]
    pub employee_id: u32,

    #[schema(example = "Nadia Rahman")]
    pub name: String,

    #[schema(example = "2024-05-06", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "08:55:00", value_type = Option<String>)]
    pub check_in: Option<NaiveTime>,

    #[schema(example = "19:05:00", value_type = Option<String>)]
    pub check_out: Option<NaiveTime>,

    #[schema(example = "01:10", value_type = String)]
    pub extra_time: ExtraTime,
}

