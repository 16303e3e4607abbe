pub mod doctor;
pub mod weekly_calendar;

pub use doctor::DoctorService;
pub use weekly_calendar::{week_days, AvailabilityGateway, SavePlan, SaveResponse, WeeklyCalendar};
