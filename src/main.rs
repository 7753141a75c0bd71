mod config;
mod domain;
mod infrastructure;
mod logging;
mod presentation;
#[cfg(test)]
mod testing;
mod usecase;

use axum::{Router, routing::get};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::AppConfig,
    domain::repositories::{identity_provider::IdentityProvider, profile_store::ProfileStore},
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher,
        sea_orm_identity_provider::SeaOrmIdentityProvider,
        sea_orm_profile_store::SeaOrmProfileStore,
    },
    presentation::handlers::registration_handler::create_registration_router,
    usecase::registration_coordinator::RegistrationCoordinator,
};

/// Root router: liveness at `/`, registration under `/api`
pub fn create_app<I, S>(coordinator: RegistrationCoordinator<I, S>) -> Router
where
    I: IdentityProvider + 'static,
    S: ProfileStore + 'static,
{
    Router::new()
        .route("/", get(|| async { "registration-api is running" }))
        .nest("/api", create_registration_router(coordinator))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    logging::init_tracing(&config.log_level)?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    Migrator::up(&db, None).await?;
    info!("migrations applied");

    let password_hasher = Argon2PasswordHasher::new(config.min_password_length);
    let identity_provider = SeaOrmIdentityProvider::new(db.clone(), password_hasher);
    let profile_store = SeaOrmProfileStore::new(db.clone());
    let coordinator = RegistrationCoordinator::new(identity_provider, profile_store);

    let app = create_app(coordinator);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
