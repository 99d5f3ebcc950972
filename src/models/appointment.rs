//! Appointment model and related types.
//!
//! This module defines the Appointment struct and the AppointmentStatus enum
//! for representing bookings of a (barber, date, time) slot.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Serde helpers for slot times, stored as `HH:MM`.
///
/// Deserialization also accepts `HH:MM:SS`.
pub mod slot_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    /// Serializes a slot time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    /// Deserializes a slot time from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parses a slot time from `HH:MM` or `HH:MM:SS`.
    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }

    /// Formats a slot time as `HH:MM`.
    pub fn format(time: NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }
}

/// The lifecycle status of an appointment.
///
/// `Completed` and `Cancelled` are terminal. The legal moves between
/// statuses live in [`crate::booking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Requested, awaiting confirmation by staff.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// The service was performed.
    Completed,
    /// The booking was called off.
    Cancelled,
}

impl AppointmentStatus {
    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking of one slot with a barber for a service.
///
/// The customer, barber and service are referenced by id, not owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Opaque identifier assigned by the store.
    #[serde(default)]
    pub id: String,
    /// The customer who booked.
    pub customer_id: String,
    /// The barber performing the service.
    pub barber_id: String,
    /// The booked service.
    pub service_id: String,
    /// The calendar date of the slot.
    pub date: NaiveDate,
    /// The start time of the slot.
    #[serde(with = "slot_time")]
    pub time: NaiveTime,
    /// The current lifecycle status.
    pub status: AppointmentStatus,
    /// The date the booking was made.
    pub created_at: NaiveDate,
    /// Service price captured at booking time.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl Appointment {
    /// Returns true if this appointment holds the given slot.
    ///
    /// Cancelled appointments never hold a slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use barbershop_engine::models::{Appointment, AppointmentStatus};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let date = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();
    /// let time = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
    /// let appointment = Appointment {
    ///     id: "apt_001".to_string(),
    ///     customer_id: "cus_001".to_string(),
    ///     barber_id: "barber1".to_string(),
    ///     service_id: "svc_001".to_string(),
    ///     date,
    ///     time,
    ///     status: AppointmentStatus::Confirmed,
    ///     created_at: date,
    ///     price: None,
    /// };
    /// assert!(appointment.occupies("barber1", date, time));
    /// assert!(!appointment.occupies("barber2", date, time));
    /// ```
    pub fn occupies(&self, barber_id: &str, date: NaiveDate, time: NaiveTime) -> bool {
        self.status != AppointmentStatus::Cancelled
            && self.barber_id == barber_id
            && self.date == date
            && self.time == time
    }
}
