//! Service entry-point: wires configuration, persistence, and REST routes.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use user_service::ApiDoc;
use user_service::domain::UserService;
use user_service::inbound::http::health::{live, ready, HealthState};
use user_service::inbound::http::state::HttpState;
use user_service::inbound::http::users::{create_user, get_user, json_config, list_users};
use user_service::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

/// Runtime configuration, resolved from flags with environment fallbacks.
#[derive(Debug, Parser)]
#[command(name = "user-service", about = "Minimal user CRUD service")]
struct Config {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind_addr: String,

    /// Port to bind the HTTP listener to.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pool_size: u32,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = Config::parse();

    let pool = DbPool::new(
        PoolConfig::new(&config.database_url).with_max_size(config.pool_size),
    )
    .await
    .map_err(std::io::Error::other)?;
    let users = UserService::new(Arc::new(DieselUserRepository::new(pool)));
    let state = HttpState::new(users);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(state.clone(), server_health_state.clone()))
        .bind((config.bind_addr.as_str(), config.port))?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(health_state)
        .service(get_user)
        .service(list_users)
        .service(create_user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
