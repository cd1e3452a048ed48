use chrono::NaiveDate;
use tracing::warn;

use crate::attendance::calendar::{CalendarSkeleton, DaySlot};
use crate::attendance::overtime::{ExtraTime, calculate_extra_time};
use crate::error::AttendanceError;
use crate::model::record::ResolvedAttendanceRecord;
use crate::model::roster::EmployeeRoster;

/// Overtime for one reconciled day. A day whose check-out precedes its
/// check-in counts as no overtime; the rest of the report is unaffected.
fn slot_extra_time(employee_id: u32, date: NaiveDate, slot: &DaySlot) -> ExtraTime {
    match calculate_extra_time(slot.check_in, slot.check_out) {
        Ok(extra) => extra,
        Err(e) => {
            warn!(employee_id, %date, error = %e, "Extra time not counted for inverted day");
            ExtraTime::ZERO
        }
    }
}

fn record(employee_id: u32, name: &str, date: NaiveDate, slot: &DaySlot) -> ResolvedAttendanceRecord {
    ResolvedAttendanceRecord {
        employee_id,
        name: name.to_string(),
        date,
        check_in: slot.check_in,
        check_out: slot.check_out,
        extra_time: slot_extra_time(employee_id, date, slot),
    }
}

fn employee_rows(
    skeleton: &CalendarSkeleton,
    names: &EmployeeRoster,
    employee_id: u32,
) -> Vec<ResolvedAttendanceRecord> {
    let Some(slots) = skeleton.slots(employee_id) else {
        return Vec::new();
    };
    let name = names.name(employee_id).unwrap_or_default();

    skeleton
        .dates()
        .iter()
        .zip(slots)
        .map(|(date, slot)| record(employee_id, name, *date, slot))
        .collect()
}

/// One row per date for every employee with at least one punch in the window,
/// ordered by employee id then date.
pub fn build_report(
    skeleton: &CalendarSkeleton,
    names: &EmployeeRoster,
    scope: &str,
) -> Result<Vec<ResolvedAttendanceRecord>, AttendanceError> {
    let mut rows = Vec::new();
    for employee_id in skeleton.employee_ids() {
        if !skeleton.has_activity(employee_id) {
            continue;
        }
        rows.extend(employee_rows(skeleton, names, employee_id));
    }

    if rows.is_empty() {
        return Err(AttendanceError::no_data(scope));
    }
    Ok(rows)
}

pub fn employee_report(
    skeleton: &CalendarSkeleton,
    names: &EmployeeRoster,
    employee_id: u32,
    scope: &str,
) -> Result<Vec<ResolvedAttendanceRecord>, AttendanceError> {
    if skeleton.slots(employee_id).is_none() {
        return Err(AttendanceError::no_data(format!("unknown employee {employee_id}")));
    }
    if !skeleton.has_activity(employee_id) {
        return Err(AttendanceError::no_data(format!("employee {employee_id} in {scope}")));
    }
    Ok(employee_rows(skeleton, names, employee_id))
}

/// Sum of counted overtime minutes for one employee over the window.
pub fn total_extra_minutes(
    skeleton: &CalendarSkeleton,
    employee_id: u32,
) -> Result<u32, AttendanceError> {
    let slots = skeleton
        .slots(employee_id)
        .ok_or_else(|| AttendanceError::no_data(format!("unknown employee {employee_id}")))?;

    Ok(skeleton
        .dates()
        .iter()
        .zip(slots)
        .map(|(date, slot)| slot_extra_time(employee_id, *date, slot).total_minutes())
        .sum())
}

/// Rows of a single date, only for employees who punched that day.
pub fn day_report(
    skeleton: &CalendarSkeleton,
    names: &EmployeeRoster,
    date: NaiveDate,
) -> Result<Vec<ResolvedAttendanceRecord>, AttendanceError> {
    let scope = date.format("%Y-%m-%d").to_string();
    let index = skeleton
        .date_index(date)
        .ok_or_else(|| AttendanceError::no_data(scope.as_str()))?;

    let mut rows = Vec::new();
    for employee_id in skeleton.employee_ids() {
        let Some(slot) = skeleton.slots(employee_id).and_then(|row| row.get(index)) else {
            continue;
        };
        if !slot.is_set() {
            continue;
        }
        rows.push(record(employee_id, names.name(employee_id).unwrap_or_default(), date, slot));
    }

    if rows.is_empty() {
        return Err(AttendanceError::no_data(scope));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::calendar::ReportPeriod;
    use crate::attendance::reconcile::reconcile;
    use crate::model::punch::{PunchDirection, PunchEvent};
    use chrono::{NaiveDateTime, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn punch(id: u32, ts: &str, direction: PunchDirection) -> PunchEvent {
        PunchEvent {
            employee_id: id,
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            direction,
        }
    }

    fn filled(punches: &[PunchEvent]) -> (CalendarSkeleton, EmployeeRoster) {
        let today = date(2024, 6, 10);
        let period = ReportPeriod::new(5, 2024, 2023, today).unwrap();
        let roster: EmployeeRoster = [(1, "Nadia".to_string()), (2, "Omar".to_string()), (5, "Lina".to_string())]
            .into_iter()
            .collect();
        let mut skeleton = CalendarSkeleton::for_period(period, &roster.ids(), today);
        let names = reconcile(punches, &mut skeleton, &roster, Some(period));
        (skeleton, names)
    }

    fn sample() -> Vec<PunchEvent> {
        vec![
            punch(2, "2024-05-06 09:00:00", PunchDirection::In),
            punch(2, "2024-05-06 19:05:00", PunchDirection::Out),
            punch(1, "2024-05-06 09:00:00", PunchDirection::In),
            punch(1, "2024-05-06 18:15:00", PunchDirection::Out),
            punch(1, "2024-05-07 09:00:00", PunchDirection::In),
            punch(2, "2024-05-08 08:00:00", PunchDirection::In),
            punch(2, "2024-05-08 18:00:00", PunchDirection::Out),
        ]
    }

    #[test]
    fn report_skips_inactive_employees_and_is_sorted() {
        let (skeleton, names) = filled(&sample());
        let rows = build_report(&skeleton, &names, "May-2024").unwrap();

        // two active employees, 23 weekdays each
        assert_eq!(rows.len(), 46);
        assert!(rows.iter().all(|r| r.employee_id != 5));
        assert!(rows.windows(2).all(|w| (w[0].employee_id, w[0].date) < (w[1].employee_id, w[1].date)));
        assert_eq!(rows[0].name, "Nadia");
    }

    #[test]
    fn every_date_appears_once_per_employee() {
        let (skeleton, names) = filled(&sample());
        let rows = build_report(&skeleton, &names, "May-2024").unwrap();
        for id in [1, 2] {
            let dates: Vec<NaiveDate> = rows.iter().filter(|r| r.employee_id == id).map(|r| r.date).collect();
            assert_eq!(dates, skeleton.dates());
        }
    }

    #[test]
    fn rows_carry_extra_time() {
        let (skeleton, names) = filled(&sample());
        let rows = build_report(&skeleton, &names, "May-2024").unwrap();

        let omar = rows.iter().find(|r| r.employee_id == 2 && r.date == date(2024, 5, 6)).unwrap();
        assert_eq!(omar.extra_time.to_string(), "01:05");

        let nadia = rows.iter().find(|r| r.employee_id == 1 && r.date == date(2024, 5, 6)).unwrap();
        assert_eq!(nadia.extra_time, ExtraTime::ZERO);

        let half_day = rows.iter().find(|r| r.employee_id == 1 && r.date == date(2024, 5, 7)).unwrap();
        assert_eq!(half_day.check_in, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(half_day.check_out, None);
        assert_eq!(half_day.extra_time, ExtraTime::ZERO);
    }

    #[test]
    fn empty_report_is_no_data() {
        let (skeleton, names) = filled(&[]);
        assert_eq!(
            build_report(&skeleton, &names, "May-2024"),
            Err(AttendanceError::NoData("May-2024".into()))
        );
    }

    #[test]
    fn employee_report_checks_roster_and_activity() {
        let (skeleton, names) = filled(&sample());
        assert_eq!(employee_report(&skeleton, &names, 2, "May-2024").unwrap().len(), 23);
        assert!(matches!(
            employee_report(&skeleton, &names, 5, "May-2024"),
            Err(AttendanceError::NoData(_))
        ));
        assert!(matches!(
            employee_report(&skeleton, &names, 42, "May-2024"),
            Err(AttendanceError::NoData(_))
        ));
    }

    #[test]
    fn sums_extra_minutes() {
        let (skeleton, _) = filled(&sample());
        // 65 minutes on the 6th, 60 on the 8th
        assert_eq!(total_extra_minutes(&skeleton, 2).unwrap(), 125);
        assert_eq!(total_extra_minutes(&skeleton, 1).unwrap(), 0);
        assert_eq!(total_extra_minutes(&skeleton, 5).unwrap(), 0);
        assert!(total_extra_minutes(&skeleton, 42).is_err());
    }

    #[test]
    fn inverted_day_counts_no_extra_time() {
        let mut punches = sample();
        // lunch break: out at noon, back in at one, nothing else that day
        punches.push(punch(5, "2024-05-09 12:00:00", PunchDirection::Out));
        punches.push(punch(5, "2024-05-09 13:00:00", PunchDirection::In));
        let (skeleton, names) = filled(&punches);

        let rows = build_report(&skeleton, &names, "May-2024").unwrap();
        assert_eq!(rows.len(), 69);
        let lunch = rows.iter().find(|r| r.employee_id == 5 && r.date == date(2024, 5, 9)).unwrap();
        assert_eq!(lunch.check_in, NaiveTime::from_hms_opt(13, 0, 0));
        assert_eq!(lunch.check_out, NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(lunch.extra_time, ExtraTime::ZERO);

        let omar = rows.iter().find(|r| r.employee_id == 2 && r.date == date(2024, 5, 6)).unwrap();
        assert_eq!(omar.extra_time.to_string(), "01:05");

        assert_eq!(total_extra_minutes(&skeleton, 5).unwrap(), 0);
        assert_eq!(employee_report(&skeleton, &names, 5, "May-2024").unwrap().len(), 23);
        assert_eq!(day_report(&skeleton, &names, date(2024, 5, 9)).unwrap().len(), 1);
    }

    #[test]
    fn day_report_keeps_active_rows_for_the_date() {
        let (skeleton, names) = filled(&sample());
        let day = day_report(&skeleton, &names, date(2024, 5, 7)).unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].employee_id, 1);
        assert_eq!(day[0].name, "Nadia");

        // nobody punched on the 9th; the 11th is a Saturday and not in the calendar
        assert!(matches!(day_report(&skeleton, &names, date(2024, 5, 9)), Err(AttendanceError::NoData(_))));
        assert!(matches!(day_report(&skeleton, &names, date(2024, 5, 11)), Err(AttendanceError::NoData(_))));
    }
}
