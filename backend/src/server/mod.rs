//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};

use registration::Trace;
#[cfg(debug_assertions)]
use registration::doc::ApiDoc;
use registration::domain::RegistrationService;
use registration::domain::ports::{RegistrationCommand, UserRepository};
use registration::inbound::http::health::{HealthState, live, ready};
use registration::inbound::http::registration::configure;
use registration::inbound::http::state::HttpState;
use registration::outbound::credentials::Argon2CredentialHasher;
use registration::outbound::memory::InMemoryUserRepository;
use registration::outbound::persistence::DieselUserRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the registration use-case to the configured store.
///
/// Uses PostgreSQL when a pool is available, otherwise a process-local
/// store that forgets every user on restart.
fn build_registration_command(config: &ServerConfig) -> Arc<dyn RegistrationCommand> {
    let users: Arc<dyn UserRepository> = match &config.db_pool {
        Some(pool) => {
            info!("persisting users in PostgreSQL");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    };
    Arc::new(RegistrationService::new(
        users,
        Arc::new(Argon2CredentialHasher::new()),
        Arc::new(DefaultClock),
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness
/// flips to true once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let (host, port) = config.bind_addr();
    info!(host, port, "starting registration server");
    let http_state = web::Data::new(HttpState::new(build_registration_command(&config)));
    let server_health_state = health_state.clone();
    let ServerConfig { bind_addr, .. } = config;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
