//! Slot availability checks.
//!
//! A slot is a (barber, date, time) triple. It is free unless a
//! non-cancelled appointment holds exactly that triple.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::config::ScheduleConfig;
use crate::models::Appointment;

/// Returns true if `barber_id` has no non-cancelled appointment at `date` `time`.
///
/// Appointments for other barbers or other dates never block the slot, and
/// neither do cancelled ones. An empty appointment list leaves every slot free.
/// Cost is linear in the number of appointments.
///
/// # Examples
///
/// ```
/// use barbershop_engine::booking::is_slot_available;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();
/// let time = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
/// assert!(is_slot_available(time, &[], "barber1", date));
/// ```
pub fn is_slot_available(
    time: NaiveTime,
    appointments: &[Appointment],
    barber_id: &str,
    date: NaiveDate,
) -> bool {
    !appointments
        .iter()
        .any(|appointment| appointment.occupies(barber_id, date, time))
}

/// Returns the start times of every slot between opening and closing.
///
/// Opening is included, closing is not. Generation stops at midnight.
pub fn day_slots(schedule: &ScheduleConfig) -> Vec<NaiveTime> {
    let step = Duration::minutes(i64::from(schedule.slot_minutes.max(1)));
    let mut slots = Vec::new();
    let mut current = schedule.opening_time;

    while current < schedule.closing_time {
        slots.push(current);
        let (next, wrapped_seconds) = current.overflowing_add_signed(step);
        if wrapped_seconds != 0 {
            break;
        }
        current = next;
    }

    slots
}

/// Filters `candidates` down to the slots still free for `barber_id` on `date`.
pub fn available_slots(
    candidates: &[NaiveTime],
    appointments: &[Appointment],
    barber_id: &str,
    date: NaiveDate,
) -> Vec<NaiveTime> {
    candidates
        .iter()
        .copied()
        .filter(|time| is_slot_available(*time, appointments, barber_id, date))
        .collect()
}
