use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use shared_models::de::{optional_string_or_number, string_or_number};

/// An appointment as listed or returned by the API.
///
/// List endpoints may omit the doctor id and the status, and may send a bare
/// date; `date` is then midnight and `status` is `Scheduled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(
        rename = "doctorId",
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub doctor_id: Option<String>,
    #[serde(rename = "doctorName", default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub appointment_type: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

/// Unknown statuses sent by the backend are kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
    Other(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Other(status) => status,
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "scheduled" => AppointmentStatus::Scheduled,
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Other(status),
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the booking call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    #[serde(rename = "doctorId")]
    pub doctor_id: String,
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub appointment_type: String,
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    // offset-carrying timestamps are kept as UTC wall time
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|day| day.and_time(NaiveTime::MIN))
        })
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}
