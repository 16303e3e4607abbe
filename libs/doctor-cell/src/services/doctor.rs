use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::Paginated;
use shared_utils::date_format::yyyy_mm_dd;

use crate::models::{
    Availability, AvailabilityPayload, Doctor, DoctorFilters, HourlyAppointments,
    WeeklyAppointments,
};
use crate::services::weekly_calendar::AvailabilityGateway;

pub struct DoctorService {
    api: Arc<ApiClient>,
}

impl DoctorService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List doctors, optionally narrowed by speciality and location
    pub async fn get_all_doctors(
        &self,
        filters: Option<&DoctorFilters>,
    ) -> Result<Vec<Doctor>, AppError> {
        let query = filters.map(DoctorFilters::to_query).unwrap_or_default();
        debug!("Fetching doctors with {} filter(s)", query.len());

        if query.is_empty() {
            self.api.get("/doctors").await
        } else {
            self.api.get_with_query("/doctors", &query).await
        }
    }

    /// Availabilities of the week containing `date`, one page at a time
    pub async fn get_doctor_availabilities(
        &self,
        date: NaiveDate,
        page: u32,
    ) -> Result<Vec<Availability>, AppError> {
        debug!("Fetching availabilities for week of {} (page {})", date, page);

        self.api
            .get_with_query(
                "/availabilities/week",
                &[("date", yyyy_mm_dd(date)), ("page", page.to_string())],
            )
            .await
    }

    pub async fn get_current_and_next_day_availability(&self) -> Result<Vec<Availability>, AppError> {
        self.api.get("/next-two-days-availabilities").await
    }

    pub async fn create_availabilities(&self, availability: &Availability) -> Result<Value, AppError> {
        let payload = AvailabilityPayload::try_from(availability)?;
        self.create_availability(&payload).await
    }

    pub async fn update_availabilities(
        &self,
        availability: &Availability,
        availability_id: i64,
    ) -> Result<Value, AppError> {
        let payload = AvailabilityPayload::try_from(availability)?;
        self.update_availability(&payload, availability_id).await
    }

    /// Today's appointments of the signed-in doctor
    pub async fn get_current_day_appointments(&self, page: u32) -> Result<Paginated<Value>, AppError> {
        let today = yyyy_mm_dd(Utc::now().date_naive());
        debug!("Fetching appointments for {} (page {})", today, page);

        self.api
            .get_with_query("/appointments", &[("date", today), ("page", page.to_string())])
            .await
    }

    /// Patient count per hour for today
    pub async fn get_today_appointments_hourly(&self) -> Result<HourlyAppointments, AppError> {
        let today = yyyy_mm_dd(Utc::now().date_naive());
        self.api
            .get_with_query("/appointments/hours", &[("date", today)])
            .await
    }

    /// Booked hours per date for the current week
    pub async fn get_weekly_date_and_hour_appointments(&self) -> Result<WeeklyAppointments, AppError> {
        self.api.get("/appointments/week").await
    }
}

#[async_trait]
impl AvailabilityGateway for DoctorService {
    async fn create_availability(&self, payload: &AvailabilityPayload) -> Result<Value, AppError> {
        debug!("Creating availability for {}", payload.date);
        self.api.post("/availabilities", payload).await
    }

    async fn update_availability(
        &self,
        payload: &AvailabilityPayload,
        availability_id: i64,
    ) -> Result<Value, AppError> {
        debug!("Updating availability {} for {}", availability_id, payload.date);
        let path = format!("/availabilities/{}", availability_id);
        self.api.put(&path, payload).await
    }
}
