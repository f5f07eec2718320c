use dotenvy::dotenv;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method},
    routing::{any, get},
    Router,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use std::sync::Arc;

mod config {
    pub mod mailer_config;
}
mod handlers {
    pub mod contact_dtos;
    pub mod contact_handlers;
}
mod api {
    pub mod mailer;
}
mod models {
    pub mod contact_models;
}
mod utils {
    pub mod html_page;
    pub mod inquiry_body;
}

use api::mailer::{InquiryMailer, LettreMailer};
use config::mailer_config::MailerConfig;
use handlers::contact_handlers;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    config: MailerConfig,
    mailer: Arc<dyn InquiryMailer>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let dist = state.config.frontend_dist.clone();
    // Unknown paths get index.html so the frontend router can take over.
    let frontend = ServeDir::new(&dist).not_found_service(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contact", any(contact_handlers::send_contact))
        // Action of the contact form when it is posted without script.
        .route("/send_mail", any(contact_handlers::send_contact))
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_origin(Any)
                .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-requested-with")])
                .expose_headers([header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MailerConfig::from_env().context("invalid mail relay configuration")?;

    let _guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    let mailer = LettreMailer::from_config(&config).context("failed to set up mail transport")?;
    let bind_addr = config.bind_addr;
    info!(
        to = %config.contact_to.email,
        transport = config.transport_kind(),
        dist = %config.frontend_dist.display(),
        "starting contact relay"
    );

    let state = Arc::new(AppState {
        config,
        mailer: Arc::new(mailer),
    });
    let app = build_router(state);

    use tokio::net::TcpListener;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!(addr = %bind_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
