use std::sync::Arc;

use tracing::{debug, info};

use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_models::pagination::Paginated;

use crate::models::{Appointment, NewAppointment};

pub struct AppointmentService {
    api: Arc<ApiClient>,
}

impl AppointmentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Appointments of the signed-in user, first page
    pub async fn get_user_appointments(&self) -> Result<Paginated<Appointment>, AppError> {
        debug!("Fetching user appointments");
        self.api.get("/appointments").await
    }

    pub async fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment, AppError> {
        debug!(
            "Booking {} with doctor {} at {}",
            appointment.appointment_type, appointment.doctor_id, appointment.date
        );

        let created: Appointment = self.api.post("/appointments", appointment).await?;
        info!("Appointment {} booked", created.id);
        Ok(created)
    }

    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<Appointment, AppError> {
        let path = format!("/appointments/{}/cancel", appointment_id);
        let cancelled: Appointment = self.api.patch(&path).await?;
        info!("Appointment {} cancelled", appointment_id);
        Ok(cancelled)
    }
}
