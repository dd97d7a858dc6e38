use std::sync::Arc;

use axum::routing::get;
use config::Config;
use device::service::DeviceService;
use device::store::PgDeviceStore;
use device::SystemClock;
use sqlx::postgres::PgPoolOptions;
use std::future::ready;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

mod config;
mod device;
mod handlers;

#[derive(Clone)]
pub struct State {
    pub device_service: Arc<DeviceService>,
}

#[derive(OpenApi)]
#[openapi(info(title = "Device API", description = "CRUD and search over devices"))]
struct ApiDoc;

fn main() {
    let config: &'static Config = Box::leak(Box::new(
        Config::new().expect("error: failed to construct config"),
    ));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("error: failed to initialize tokio runtime")
        .block_on(async { start_main_server(config).await });
}

async fn start_main_server(config: &'static Config) {
    info!("Starting up Device API");

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.database_url)
        .await
        .expect("can't connect to database.");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("sqlx migration failed");

    let device_service = Arc::new(DeviceService::new(
        Arc::new(PgDeviceStore::new(pool)),
        Arc::new(SystemClock),
    ));

    let state = State { device_service };

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            handlers::devices::add_device,
            handlers::devices::get_all_devices
        ))
        .routes(routes!(handlers::devices::search_device_by_brand))
        .routes(routes!(
            handlers::devices::get_device_by_id,
            handlers::devices::update_device,
            handlers::devices::update_device_partially,
            handlers::devices::delete_device
        ))
        .split_for_parts();

    let json_specification = api.to_pretty_json().expect("API docs generation failed");

    let app = router
        .route("/health", get(handlers::health::check))
        .layer(axum::Extension(state))
        .route(
            "/api-docs/openapi.json",
            get(move || ready(json_specification.clone())),
        )
        .merge(Scalar::with_url("/api-docs", api));

    let listener = TcpListener::bind(&config.http_address)
        .await
        .expect("error: failed to bind to port");
    info!("{:<12} - {:?}", "LISTENING", listener.local_addr());

    axum::serve(listener, app.into_make_service())
        .await
        .expect("error: failed to initialize axum server");
}
