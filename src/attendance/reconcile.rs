use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, trace};

use crate::attendance::calendar::{CalendarSkeleton, DaySlot, ReportPeriod};
use crate::model::punch::{PunchDirection, PunchEvent};
use crate::model::roster::EmployeeRoster;

/// Punch times of one employee on one date, split by direction, in device order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPunchGroup {
    pub ins: Vec<NaiveTime>,
    pub outs: Vec<NaiveTime>,
}

impl DayPunchGroup {
    fn push(&mut self, punch: &PunchEvent) {
        match punch.direction {
            PunchDirection::In => self.ins.push(punch.time()),
            PunchDirection::Out => self.outs.push(punch.time()),
        }
    }
}

/// Picks the effective check-in and check-out for one day.
///
/// The terminal sometimes records the morning punch with the wrong direction,
/// so a day with several punches of a single direction is read as first =
/// check-in, last = check-out. A lone punch keeps its recorded meaning.
pub fn resolve_day(group: &DayPunchGroup) -> DaySlot {
    match (group.ins.as_slice(), group.outs.as_slice()) {
        ([], []) => DaySlot::default(),
        ([], [only]) => DaySlot {
            check_in: None,
            check_out: Some(*only),
        },
        ([only], []) => DaySlot {
            check_in: Some(*only),
            check_out: None,
        },
        ([first, .., last], []) | ([], [first, .., last]) => DaySlot {
            check_in: Some(*first),
            check_out: Some(*last),
        },
        ([first, ..], [.., last]) => DaySlot {
            check_in: Some(*first),
            check_out: Some(*last),
        },
    }
}

/// Buckets punches by (employee, date), dropping dates outside the skeleton
/// and, when a period is given, outside that month.
pub fn group_punches(
    punches: &[PunchEvent],
    skeleton: &CalendarSkeleton,
    period: Option<ReportPeriod>,
) -> BTreeMap<(u32, NaiveDate), DayPunchGroup> {
    let mut groups: BTreeMap<(u32, NaiveDate), DayPunchGroup> = BTreeMap::new();

    for punch in punches {
        let date = punch.date();
        if period.is_some_and(|p| !p.contains(date)) || skeleton.date_index(date).is_none() {
            trace!(
                employee_id = punch.employee_id,
                %date,
                direction = %punch.direction,
                "Punch outside the reporting window"
            );
            continue;
        }
        groups
            .entry((punch.employee_id, date))
            .or_default()
            .push(punch);
    }

    groups
}

/// Fills `skeleton` from the punch log.
///
/// Returns the roster restricted to employees that punched at least once in
/// the window, which is where report rows take their names from.
pub fn reconcile(
    punches: &[PunchEvent],
    skeleton: &mut CalendarSkeleton,
    roster: &EmployeeRoster,
    period: Option<ReportPeriod>,
) -> EmployeeRoster {
    let groups = group_punches(punches, skeleton, period);

    let mut observed: BTreeMap<u32, String> = BTreeMap::new();
    for &(employee_id, _) in groups.keys() {
        if let Some(name) = roster.name(employee_id) {
            observed.insert(employee_id, name.to_string());
        }
    }

    let mut skipped = 0usize;
    for ((employee_id, date), group) in &groups {
        let Some(index) = skeleton.date_index(*date) else {
            continue;
        };
        match skeleton.slot_mut(*employee_id, index) {
            Some(slot) => *slot = resolve_day(group),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "Ignored punch days for employees missing from the roster");
    }
    debug!(
        groups = groups.len(),
        dates = skeleton.date_count(),
        employees = observed.len(),
        "Reconciled punch log"
    );

    observed.into_iter().collect()
}
