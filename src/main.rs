mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use std::sync::Arc;

use axum::Router;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    domain::services::clock::Clock,
    infrastructure::{
        event_repository::SeaOrmEventRepository, hmac_payment_gateway::HmacPaymentGateway,
        log_notifier::LogNotifier, payment_repository::SeaOrmPaymentRepository,
        registration_repository::SeaOrmRegistrationRepository,
        reservation_repository::SeaOrmReservationRepository, system_clock::SystemClock,
        text_food_pass_encoder::TextFoodPassEncoder,
    },
    presentation::handlers::{
        event_handler::create_event_router, payment_handler::create_payment_router,
        registration_handler::create_registration_router,
        reservation_handler::create_reservation_router,
    },
    usecase::{
        finalize_registration_usecase::FinalizeRegistrationUsecase,
        list_events_usecase::ListEventsUsecase,
        release_reservation_usecase::ReleaseReservationUsecase,
        reserve_slots_usecase::ReserveSlotsUsecase, verify_payment_usecase::VerifyPaymentUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sympo_registration=info,sea_orm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(1)
        .sqlx_logging(config.sqlx_logging);
    let db = Database::connect(opt).await?;
    Migrator::up(&db, None).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let event_repository = SeaOrmEventRepository::new(db.clone(), clock.clone());
    let reservation_repository =
        SeaOrmReservationRepository::new(db.clone(), clock.clone(), config.reservation_ttl);
    let registration_repository =
        SeaOrmRegistrationRepository::new(db.clone(), clock.clone(), config.require_payment);
    let payment_repository = SeaOrmPaymentRepository::new(db.clone(), clock.clone());
    let payment_gateway = HmacPaymentGateway::new(config.payment_key_secret.clone());

    let api = Router::new()
        .merge(create_event_router(ListEventsUsecase::new(event_repository)))
        .merge(create_reservation_router(
            ReserveSlotsUsecase::new(reservation_repository.clone()),
            ReleaseReservationUsecase::new(reservation_repository.clone()),
        ))
        .merge(create_registration_router(FinalizeRegistrationUsecase::new(
            registration_repository,
            reservation_repository,
            LogNotifier,
            TextFoodPassEncoder,
        )))
        .merge(create_payment_router(VerifyPaymentUsecase::new(
            payment_gateway,
            payment_repository,
        )));
    let app = Router::new().nest("/api", api);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        addr = %config.listen_addr,
        require_payment = config.require_payment,
        ttl_minutes = config.reservation_ttl.num_minutes(),
        "listening"
    );
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
