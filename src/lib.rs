//! Car rental SaaS demo backend.
//!
//! A handful of pass-through REST endpoints (registration, blog, contact
//! form) over a MongoDB document store. Control flow per request is
//! strictly linear: validate, build a record, one store call, respond.
//! No background work, no shared mutable state beyond the database
//! handle itself.
//!
//! Not production hardened: credentials are persisted as submitted and
//! CORS is wide open. See DESIGN.md for the open hardening decisions.

use std::{sync::Arc, time::Duration};

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod schemas;
pub mod state;

use routes::{
    create_blog_post_handler, diagnostics_handler, hello_handler, list_blog_posts_handler,
    register_handler, root_handler, submit_contact_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    // The demo policy is any origin, any header, credentials allowed.
    // Wildcards cannot be combined with credentials, so origin and
    // headers mirror whatever the request carries.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(root_handler))
        .route("/api/hello", get(hello_handler))
        .route("/test", get(diagnostics_handler))
        .route("/api/auth/register", post(register_handler))
        .route(
            "/api/blog",
            get(list_blog_posts_handler).post(create_blog_post_handler),
        )
        .route("/api/contact", post(submit_contact_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
