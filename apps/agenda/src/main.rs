use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use dotenv::dotenv;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appointment_cell::services::AppointmentService;
use auth_cell::{
    AuthService, GuardDecision, InactivityMonitor, InactivitySettings, RouteGuard, RouteMeta,
    SessionContext, SessionStore,
};
use doctor_cell::services::{week_days, DoctorService, WeeklyCalendar};
use shared_config::AppConfig;
use shared_http::ApiClient;
use shared_models::auth::{LoginCredentials, Role};
use shared_utils::navigation::{LogNavigator, Navigator};
use shared_utils::notify::TracingNotifier;
use shared_utils::storage::{FileStorage, MemoryStorage, SessionStorage};

mod render;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting agenda");

    let config = AppConfig::from_env();

    let storage: Arc<dyn SessionStorage> = match &config.session_file {
        Some(path) => Arc::new(
            FileStorage::open(path)
                .with_context(|| format!("opening session file {}", path.display()))?,
        ),
        None => Arc::new(MemoryStorage::new()),
    };
    let navigator: Arc<dyn Navigator> = Arc::new(LogNavigator);
    let api = Arc::new(ApiClient::new(&config, storage.clone(), navigator.clone()));

    let mut session = SessionStore::restore(storage.clone());
    if session.token().is_none() {
        let credentials = credentials_from_env()?;
        let login = AuthService::new(api.clone())
            .login(&credentials)
            .await
            .context("login failed")?;
        session.establish(login)?;
    }

    if let Some(user) = session.user() {
        info!("Signed in as {}", user.full_name());
    }

    // idle logout applies for as long as the agenda runs
    let _monitor = InactivityMonitor::start(
        InactivitySettings::from_config(&config),
        storage.clone(),
        navigator.clone(),
    );

    let context = Arc::new(SessionContext::new(storage.clone()));
    let guard = RouteGuard::new(context.clone());

    if let GuardDecision::Redirect(path) = guard.check(&RouteMeta::authenticated()) {
        navigator.push(path);
        return Ok(());
    }

    if guard.check(&RouteMeta::for_role(Role::Doctor)) == GuardDecision::Proceed {
        show_doctor_week(api).await
    } else {
        show_patient_appointments(api).await
    }
}

fn credentials_from_env() -> Result<LoginCredentials> {
    Ok(LoginCredentials {
        username: env::var("AGENDA_USERNAME").context("AGENDA_USERNAME must be set to sign in")?,
        password: env::var("AGENDA_PASSWORD").context("AGENDA_PASSWORD must be set to sign in")?,
    })
}

async fn show_doctor_week(api: Arc<ApiClient>) -> Result<()> {
    let service = Arc::new(DoctorService::new(api));
    let today = Local::now().date_naive();
    let monday = week_days(today)[0].date;

    let week = service.get_doctor_availabilities(monday, 1).await?;
    let booked = service.get_weekly_date_and_hour_appointments().await?;

    // read-only view, nothing listens for edits
    let (events, _updates) = mpsc::unbounded_channel();
    let calendar = WeeklyCalendar::new(
        week,
        booked.weekly_data,
        service,
        Arc::new(TracingNotifier),
        events,
    );

    print!("{}", render::week_grid(&calendar));
    Ok(())
}

async fn show_patient_appointments(api: Arc<ApiClient>) -> Result<()> {
    let appointments = AppointmentService::new(api).get_user_appointments().await?;

    if appointments.results.is_empty() {
        println!("Aucun rendez-vous");
        return Ok(());
    }

    for appointment in &appointments.results {
        println!("{}", render::appointment_line(appointment));
    }

    if !appointments.is_last_page() {
        println!("... {} rendez-vous au total", appointments.total);
    }

    Ok(())
}
