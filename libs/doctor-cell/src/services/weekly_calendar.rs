use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use shared_models::error::AppError;
use shared_utils::date_format::{french_weekday, long_french_date};
use shared_utils::notify::Notifier;

use crate::models::{
    Availability, AvailabilityPayload, BookedSlots, CalendarEvent, CalendarValidationError,
    DayInfo, SaveOutcome,
};

pub const SAVE_SUCCESS_MESSAGE: &str = "Disponibilités chargées avec succès";
pub const SAVE_FAILURE_MESSAGE: &str = "Erreur lors de l'ajout des disponibilités";

const DAYS_IN_GRID: i64 = 6;

/// Where the calendar persists a day's slots.
#[async_trait]
pub trait AvailabilityGateway: Send + Sync {
    async fn create_availability(&self, payload: &AvailabilityPayload) -> Result<Value, AppError>;

    async fn update_availability(
        &self,
        payload: &AvailabilityPayload,
        availability_id: i64,
    ) -> Result<Value, AppError>;
}

/// Monday..Saturday of the week containing `reference`. A Sunday belongs to
/// the week that started six days earlier.
pub fn week_days(reference: NaiveDate) -> Vec<DayInfo> {
    let from_sunday = i64::from(reference.weekday().num_days_from_sunday());
    let offset = if from_sunday == 0 { -6 } else { 1 - from_sunday };
    let monday = reference + Duration::days(offset);

    (0..DAYS_IN_GRID)
        .map(|i| {
            let date = monday + Duration::days(i);
            let (short_label, full_label) = french_weekday(date.weekday());
            DayInfo {
                short_label,
                full_label,
                date,
            }
        })
        .collect()
}

/// View-model behind the doctor's weekly availability grid.
///
/// Holds the week's availabilities (edited in place as slots are toggled),
/// a read-only overlay of booked slots, and the draft for the day currently
/// open in the edit form.
pub struct WeeklyCalendar {
    days: Vec<DayInfo>,
    week_availability: Vec<Availability>,
    week_appointments: Vec<BookedSlots>,
    selected_day: String,
    current_availability_id: i64,
    draft: Availability,
    booked_slots: Vec<String>,
    form_visible: bool,
    error: String,
    in_flight: HashMap<NaiveDate, u64>,
    next_generation: u64,
    gateway: Arc<dyn AvailabilityGateway>,
    notifier: Arc<dyn Notifier>,
    events: UnboundedSender<CalendarEvent>,
}

impl WeeklyCalendar {
    /// The grid shows the current week, whatever week the data belongs to.
    pub fn new(
        week_availability: Vec<Availability>,
        week_appointments: Vec<BookedSlots>,
        gateway: Arc<dyn AvailabilityGateway>,
        notifier: Arc<dyn Notifier>,
        events: UnboundedSender<CalendarEvent>,
    ) -> Self {
        let today = Local::now().date_naive();

        Self {
            days: week_days(today),
            week_availability,
            week_appointments,
            selected_day: String::new(),
            current_availability_id: 0,
            draft: Availability::new(None, today, Vec::new()),
            booked_slots: Vec::new(),
            form_visible: false,
            error: String::new(),
            in_flight: HashMap::new(),
            next_generation: 0,
            gateway,
            notifier,
            events,
        }
    }

    /// Lay the grid out on the week containing `reference` instead of today.
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.days = week_days(reference);
        self
    }

    pub fn days(&self) -> &[DayInfo] {
        &self.days
    }

    pub fn week_availability(&self) -> &[Availability] {
        &self.week_availability
    }

    pub fn week_appointments(&self) -> &[BookedSlots] {
        &self.week_appointments
    }

    pub fn selected_day(&self) -> &str {
        &self.selected_day
    }

    pub fn current_availability_id(&self) -> i64 {
        self.current_availability_id
    }

    pub fn draft(&self) -> &Availability {
        &self.draft
    }

    pub fn booked_slots(&self) -> &[String] {
        &self.booked_slots
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn is_saving(&self, date: NaiveDate) -> bool {
        self.in_flight.contains_key(&date)
    }

    /// Open the edit form on `date`. Unsaved edits of the previous day are
    /// discarded.
    pub fn select_day(&mut self, label: &str, date: NaiveDate) {
        let found = self
            .week_availability
            .iter()
            .find(|availability| availability.date == Some(date));
        let booked = self.week_appointments.iter().find(|day| day.date == date);

        self.current_availability_id = found.and_then(|availability| availability.id).unwrap_or(0);
        self.draft = Availability {
            id: found.and_then(|availability| availability.id),
            date: Some(date),
            slots: found.map(|availability| availability.slots.clone()).unwrap_or_default(),
        };
        self.booked_slots = booked.map(|day| day.slots.clone()).unwrap_or_default();
        self.selected_day = format!("{} {}", label, long_french_date(date));
        self.form_visible = true;

        debug!(
            "Selected {} (availability id {}, {} slot(s), {} booked)",
            date,
            self.current_availability_id,
            self.draft.slots.len(),
            self.booked_slots.len()
        );
    }

    pub fn toggle_slot(&mut self, hour: &str) {
        let Some(position) = self.draft.slots.iter().position(|slot| slot == hour) else {
            self.draft.slots.push(hour.to_string());
            return;
        };

        self.draft.slots.remove(position);

        // keep the stored record in step with the draft until the next save
        let date = self.draft.date;
        if let Some(record) = self
            .week_availability
            .iter_mut()
            .find(|availability| date.is_some() && availability.date == date)
        {
            record.slots.retain(|slot| slot != hour);
        }
    }

    /// Validate the draft and snapshot what has to be sent.
    ///
    /// On failure the inline error is set and nothing is sent. On success
    /// the returned plan owns everything it needs, so the view stays free to
    /// select other days while it runs.
    pub fn prepare_save(&mut self) -> Result<SavePlan, CalendarValidationError> {
        if self.draft.slots.is_empty() {
            return Err(self.reject(CalendarValidationError::NoSlotSelected));
        }

        let Some(date) = self.draft.date else {
            return Err(self.reject(CalendarValidationError::NoDateSelected));
        };

        let generation = self.next_generation;
        self.next_generation += 1;
        self.in_flight.insert(date, generation);

        Ok(SavePlan {
            date,
            generation,
            availability_id: self.current_availability_id,
            draft: self.draft.clone(),
            gateway: Arc::clone(&self.gateway),
        })
    }

    fn reject(&mut self, error: CalendarValidationError) -> CalendarValidationError {
        self.error = error.to_string();
        error
    }

    /// Apply the result of a finished plan. Only the most recent save of a
    /// given date is applied; older ones come back as `Superseded`.
    pub fn finish_save(&mut self, response: SaveResponse) -> SaveOutcome {
        match self.in_flight.get(&response.date) {
            Some(&latest) if latest == response.generation => {
                self.in_flight.remove(&response.date);
            }
            _ => {
                debug!("Dropping stale save result for {}", response.date);
                return SaveOutcome::Superseded;
            }
        }

        match response.result {
            Ok(_) => {
                self.form_visible = false;

                let event = CalendarEvent::AvailabilityWasUpdated(response.draft.clone());
                if self.events.send(event).is_err() {
                    debug!("Calendar view is gone, availability update not delivered");
                }

                info!("Availability saved for {}", response.date);
                self.notifier.success(SAVE_SUCCESS_MESSAGE);
                SaveOutcome::Saved(response.draft)
            }
            Err(e) => {
                error!("Failed to save availability for {}: {}", response.date, e);
                self.notifier.error(SAVE_FAILURE_MESSAGE);
                SaveOutcome::Failed(e)
            }
        }
    }

    /// Validate, persist and apply in one go.
    pub async fn save(&mut self) -> SaveOutcome {
        let plan = match self.prepare_save() {
            Ok(plan) => plan,
            Err(e) => return SaveOutcome::Invalid(e),
        };

        let response = plan.execute().await;
        self.finish_save(response)
    }
}

/// A validated save, detached from the calendar while the request runs.
pub struct SavePlan {
    date: NaiveDate,
    generation: u64,
    availability_id: i64,
    draft: Availability,
    gateway: Arc<dyn AvailabilityGateway>,
}

impl SavePlan {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_update(&self) -> bool {
        self.availability_id != 0
    }

    pub async fn execute(self) -> SaveResponse {
        let payload = AvailabilityPayload {
            date: self.date,
            slots: self.draft.slots.clone(),
        };

        let result = if self.is_update() {
            self.gateway
                .update_availability(&payload, self.availability_id)
                .await
        } else {
            self.gateway.create_availability(&payload).await
        };

        SaveResponse {
            date: self.date,
            generation: self.generation,
            draft: self.draft,
            result,
        }
    }
}

pub struct SaveResponse {
    date: NaiveDate,
    generation: u64,
    draft: Availability,
    result: Result<Value, AppError>,
}
