use crate::attendance::calendar::ReportPeriod;
use crate::attendance::export::{sheet_file_name, to_csv};
use crate::attendance::report::{build_report, day_report, employee_report, total_extra_minutes};
use crate::attendance::PunchLog;
use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::error::AttendanceError;
use crate::model::record::ResolvedAttendanceRecord;
use crate::source::{PunchSource, fetch_snapshot};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PeriodQuery {
    #[schema(example = 5)]
    pub month: u32,

    #[schema(example = 2024)]
    pub year: i32,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceReportResponse {
    #[schema(example = "May-2024")]
    pub period: String,
    pub records: Vec<ResolvedAttendanceRecord>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeReportResponse {
    #[schema(example = 7)]
    pub employee_id: u32,
    #[schema(example = "Nadia Rahman")]
    pub name: String,
    #[schema(example = "May-2024")]
    pub period: String,
    pub records: Vec<ResolvedAttendanceRecord>,
}

#[derive(Serialize, ToSchema)]
pub struct ExtraTimeResponse {
    #[schema(example = 7)]
    pub employee_id: u32,
    #[schema(example = "May-2024")]
    pub period: String,
    #[schema(example = 125)]
    pub total_extra_minutes: u32,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn report_period(
    query: &PeriodQuery,
    config: &Config,
    today: NaiveDate,
) -> Result<ReportPeriod, AttendanceError> {
    ReportPeriod::new(query.month, query.year, config.min_report_year, today)
}

async fn load_log(source: &dyn PunchSource) -> Result<PunchLog, AttendanceError> {
    let snapshot = fetch_snapshot(source).await?;
    PunchLog::from_snapshot(&snapshot)
}

fn csv_download(rows: &[ResolvedAttendanceRecord], file_name: String) -> actix_web::Result<HttpResponse> {
    let body = to_csv(rows).map_err(|e| {
        error!(error = %e, file_name, "Failed to render attendance sheet");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(body))
}

/// Monthly attendance of every employee with activity
#[utoipa::path(
    get,
    path = "/api/attendance/records",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Reconciled attendance for the month", body = AttendanceReportResponse),
        (status = 400, description = "Invalid month or year", body = Object, example = json!({
            "message": "invalid period 13/2024: month must be between 1 and 12"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No attendance in the period", body = Object, example = json!({
            "message": "no attendance data for May-2024"
        })),
        (status = 502, description = "Terminal sent a malformed punch")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(name = "monthly_records", skip(auth, source, config), fields(month = query.month, year = query.year))]
pub async fn monthly_records(
    auth: AuthUser,
    source: web::Data<dyn PunchSource>,
    config: web::Data<Config>,
    query: web::Query<PeriodQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let today = today();
    let period = report_period(&query, &config, today)?;
    let log = load_log(source.get_ref()).await?;
    let (skeleton, names) = log.monthly(period, today);
    let records = build_report(&skeleton, &names, &period.label())?;

    info!(user = %auth.username, rows = records.len(), "Monthly report built");

    Ok(HttpResponse::Ok().json(AttendanceReportResponse {
        period: period.label(),
        records,
    }))
}

/// Monthly attendance of every employee as a CSV sheet
#[utoipa::path(
    get,
    path = "/api/attendance/records/export",
    params(PeriodQuery),
    responses(
        (status = 200, description = "CSV sheet: User ID, Name, Date, Check-in, Check-out, Extra Time", content_type = "text/csv"),
        (status = 400, description = "Invalid month or year"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No attendance in the period")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn export_monthly_records(
    auth: AuthUser,
    source: web::Data<dyn PunchSource>,
    config: web::Data<Config>,
    query: web::Query<PeriodQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    let today = today();
    let period = report_period(&query, &config, today)?;
    let log = load_log(source.get_ref()).await?;
    let (skeleton, names) = log.monthly(period, today);
    let records = build_report(&skeleton, &names, &period.label())?;

    csv_download(&records, sheet_file_name(&period.label(), None))
}

/// Attendance over every date the terminal has punches for
#[utoipa::path(
    get,
    path = "/api/attendance/history",
    responses(
        (status = 200, description = "Reconciled attendance for the whole punch log", body = AttendanceReportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Terminal has no punches")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn history_records(
    auth: AuthUser,
    source: web::Data<dyn PunchSource>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let log = load_log(source.get_ref()).await?;
    let (skeleton, names) = log.full_history();
    let records = build_report(&skeleton, &names, "full terminal history")?;

    info!(rows = records.len(), dates = skeleton.date_count(), "History report built");

    Ok(HttpResponse::Ok().json(AttendanceReportResponse {
        period: "history".to_string(),
        records,
    }))
}

/// Today's reconciled punches
#[utoipa::path(
    get,
    path = "/api/attendance/daily",
    responses(
        (status = 200, description = "Rows of employees who punched today", body = AttendanceReportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Nobody punched today")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn daily_records(
    auth: AuthUser,
    source: web::Data<dyn PunchSource>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let date = today();
    let log = load_log(source.get_ref()).await?;
    let (skeleton, names) = log.full_history();
    let records = day_report(&skeleton, &names, date)?;

    Ok(HttpResponse::Ok().json(AttendanceReportResponse {
        period: date.format("%Y-%m-%d").to_string(),
        records,
    }))
}

/// Monthly attendance of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id", description = "Terminal user id"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "Reconciled attendance for the employee", body = EmployeeReportResponse),
        (status = 400, description = "Invalid month or year"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown employee or no attendance in the period")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn employee_records(
    auth: AuthUser,
    source: web::Data<dyn PunchSource>,
    config: web::Data<Config>,
    path: web::Path<u32>,
    query: web::Query<PeriodQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    auth.require_access_to(employee_id)?;

    let today = today();
    let period = report_period(&query, &config, today)?;
    let log = load_log(source.get_ref()).await?;
    let (skeleton, names) = log.monthly(period, today);
    let records = employee_report(&skeleton, &names, employee_id, &period.label())?;

    Ok(HttpResponse::Ok().json(EmployeeReportResponse {
        employee_id,
        name: names.name(employee_id).unwrap_or_default().to_string(),
        period: period.label(),
        records,
    }))
}

/// Monthly attendance of one employee as a CSV sheet
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}/export",
    params(
        ("employee_id", description = "Terminal user id"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "CSV sheet for the employee", content_type = "text/csv"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown employee or no attendance in the period")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn export_employee_records(
    auth: AuthUser,
    source: web::Data<dyn PunchSource>,
    config: web::Data<Config>,
    path: web::Path<u32>,
    query: web::Query<PeriodQuery>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.require_access_to(employee_id)?;

    let today = today();
    let period = report_period(&query, &config, today)?;
    let log = load_log(source.get_ref()).await?;
    let (skeleton, names) = log.monthly(period, today);
    let records = employee_report(&skeleton, &names, employee_id, &period.label())?;

    csv_download(
        &records,
        sheet_file_name(&period.label(), names.name(employee_id)),
    )
}

/// Total counted overtime of one employee over a month
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}/extra-time",
    params(
        ("employee_id", description = "Terminal user id"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "Sum of extra minutes", body = ExtraTimeResponse),
        (status = 400, description = "Invalid month or year"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown employee")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn employee_extra_time(
    auth: AuthUser,
    source: web::Data<dyn PunchSource>,
    config: web::Data<Config>,
    path: web::Path<u32>,
    query: web::Query<PeriodQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    auth.require_access_to(employee_id)?;

    let today = today();
    let period = report_period(&query, &config, today)?;
    let log = load_log(source.get_ref()).await?;
    let (skeleton, _) = log.monthly(period, today);
    let total = total_extra_minutes(&skeleton, employee_id)?;

    Ok(HttpResponse::Ok().json(ExtraTimeResponse {
        employee_id,
        period: period.label(),
        total_extra_minutes: total,
    }))
}
