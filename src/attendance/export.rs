use serde::Serialize;

use crate::model::record::ResolvedAttendanceRecord;

#[derive(Serialize)]
struct SheetRow<'a> {
    #[serde(rename = "User ID")]
    user_id: u32,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Check-in")]
    check_in: Option<String>,
    #[serde(rename = "Check-out")]
    check_out: Option<String>,
    #[serde(rename = "Extra Time")]
    extra_time: String,
}

impl<'a> From<&'a ResolvedAttendanceRecord> for SheetRow<'a> {
    fn from(record: &'a ResolvedAttendanceRecord) -> Self {
        SheetRow {
            user_id: record.employee_id,
            name: &record.name,
            date: record.date.format("%Y-%m-%d").to_string(),
            check_in: record.check_in.map(|t| t.format("%H:%M:%S").to_string()),
            check_out: record.check_out.map(|t| t.format("%H:%M:%S").to_string()),
            extra_time: record.extra_time.to_string(),
        }
    }
}

/// Renders report rows as a CSV sheet with a header line.
pub fn to_csv(rows: &[ResolvedAttendanceRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in rows {
        writer.serialize(SheetRow::from(record))?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

pub fn sheet_file_name(label: &str, employee_name: Option<&str>) -> String {
    match employee_name {
        Some(name) if !name.trim().is_empty() => format!("{}_{}.csv", name.trim().replace(' ', "_"), label),
        _ => format!("{label}.csv"),
    }
}
