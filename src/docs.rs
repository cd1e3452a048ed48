use crate::api::attendance::{
    AttendanceReportResponse, EmployeeReportResponse, ExtraTimeResponse, PeriodQuery,
};
use crate::model::record::ResolvedAttendanceRecord;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Punch Clock Attendance API",
        version = "1.0.0",
        description = r#"
## Punch clock attendance

Reconciles the raw punch log of a biometric terminal into one check-in and one
check-out per employee per day, and derives extra time over a 9-hour shift.

### Reconciliation rules
- Several punches of one direction on a day: first is the check-in, last the check-out
- A lone punch keeps the direction the terminal recorded
- Both directions present: first check-in, last check-out
- Extra time is counted only when it exceeds 40 minutes

### Security
Every endpoint needs a **JWT Bearer** access token issued by the HR portal.
HR and Admin see every employee; employees see only their own record.
"#,
    ),
    paths(
        crate::api::attendance::monthly_records,
        crate::api::attendance::export_monthly_records,
        crate::api::attendance::history_records,
        crate::api::attendance::daily_records,
        crate::api::attendance::employee_records,
        crate::api::attendance::export_employee_records,
        crate::api::attendance::employee_extra_time
    ),
    components(
        schemas(
            PeriodQuery,
            ResolvedAttendanceRecord,
            AttendanceReportResponse,
            EmployeeReportResponse,
            ExtraTimeResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Punch reconciliation and overtime reports"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
