use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use shared_models::de::string_or_number;
use shared_models::error::AppError;

/// Bookable time slots a doctor opened for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub slots: Vec<String>,
}

impl Availability {
    pub fn new(id: Option<i64>, date: NaiveDate, slots: Vec<String>) -> Self {
        Self {
            id,
            date: Some(date),
            slots,
        }
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s == slot)
    }
}

/// Body of the create and update availability calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityPayload {
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

impl TryFrom<&Availability> for AvailabilityPayload {
    type Error = AppError;

    fn try_from(availability: &Availability) -> Result<Self, Self::Error> {
        let date = availability
            .date
            .ok_or_else(|| AppError::Validation("Availability has no date".to_string()))?;

        Ok(Self {
            date,
            slots: availability.slots.clone(),
        })
    }
}

/// Slots already taken by appointments on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlots {
    #[serde(deserialize_with = "strict_date")]
    pub date: NaiveDate,
    #[serde(default, alias = "hours")]
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub speciality: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub availabilities: Vec<Availability>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorFilters {
    pub speciality: Option<String>,
    pub location: Option<String>,
}

impl DoctorFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(speciality) = &self.speciality {
            query.push(("speciality", speciality.clone()));
        }
        if let Some(location) = &self.location {
            query.push(("location", location.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    pub hour: String,
    #[serde(rename = "patientCount")]
    pub patient_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyAppointments {
    #[serde(rename = "hourlyData", default)]
    pub hourly_data: Vec<HourlyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAppointments {
    #[serde(rename = "weeklyData", default)]
    pub weekly_data: Vec<BookedSlots>,
}

/// One column of the Monday..Saturday grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayInfo {
    pub short_label: &'static str,
    pub full_label: &'static str,
    pub date: NaiveDate,
}

/// Events the calendar emits towards the view that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarEvent {
    AvailabilityWasUpdated(Availability),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalendarValidationError {
    #[error("Veuillez sélectionner au moins un créneau")]
    NoSlotSelected,

    #[error("Veuillez sélectionner une date")]
    NoDateSelected,
}

#[derive(Debug)]
pub enum SaveOutcome {
    /// Persisted; carries the draft that was sent.
    Saved(Availability),
    /// Rejected before any network call; the inline error is set.
    Invalid(CalendarValidationError),
    /// The API call failed; an error toast was shown.
    Failed(AppError),
    /// A newer save for the same date was started; this result was dropped.
    Superseded,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    // accept both `2024-03-04` and `2024-03-04T00:00:00+00:00`
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse_day(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw))),
    }
}

fn strict_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}
