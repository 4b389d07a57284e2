//! Append-only feedback log for the birthday site.
//!
//! A single endpoint, `POST /api/feedback`, takes `{ "feedback": "<text>" }`
//! and appends a timestamped block to one text file:
//!
//! ```text
//! [2024-03-09T14:05:00.000Z]
//! Happy birthday!
//!
//! ```
//!
//! The in-browser site mirrors each new journal note here when
//! `mirror_to_log` is on. Nothing is ever read back.
//!
//! # Environment
//! - `FEEDBACK_PORT` (default `3000`)
//! - `FEEDBACK_LOG_PATH` (default `feedback.txt`)
//! - `FEEDBACK_ALLOWED_ORIGIN` (optional; enables CORS for that origin)
//!
//! Log verbosity follows `RUST_LOG`.
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::post,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod log_file;
pub mod routes;
pub mod state;

use config::Config;
use routes::feedback_handler;
use state::AppState;

pub async fn start_server() -> std::io::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let state = AppState::new(Config::load());
    info!("Appending feedback to {}", state.log.path().display());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let router = Router::new().route("/api/feedback", post(feedback_handler));

    let router = match state.config.allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => {
            info!("CORS enabled for {origin:?}");
            router.layer(
                CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::POST, Method::OPTIONS])
                    .allow_headers([CONTENT_TYPE])
                    .max_age(Duration::from_secs(60 * 60)),
            )
        }
        Some(Err(e)) => {
            warn!("Ignoring invalid FEEDBACK_ALLOWED_ORIGIN: {e}");
            router
        }
        None => router,
    };

    router.with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn test_app(log_path: PathBuf) -> Router {
        app(AppState::new(Config {
            port: 0,
            log_path,
            allowed_origin: None,
        }))
    }

    async fn post_feedback(app: Router, body: impl Into<Body>) -> (StatusCode, serde_json::Value) {
        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/feedback")
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn saves_feedback_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.txt");
        let (status, body) =
            post_feedback(test_app(path.clone()), json!({ "feedback": "great job" }).to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with('['));
        assert!(contents.ends_with("]\ngreat job\n\n"));
        assert_eq!(contents.matches("great job").count(), 1);
    }

    #[tokio::test]
    async fn second_post_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.txt");
        let app = test_app(path.clone());
        post_feedback(app.clone(), json!({ "feedback": "first" }).to_string()).await;
        post_feedback(app, json!({ "feedback": "second" }).to_string()).await;

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.find("first").unwrap() < contents.find("second").unwrap());
    }

    #[tokio::test]
    async fn missing_or_bad_feedback_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.txt");
        for body in [
            json!({}),
            json!({ "feedback": 42 }),
            json!({ "feedback": "" }),
            json!([]),
        ] {
            let (status, json) = post_feedback(test_app(path.clone()), body.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, json!({ "error": "Invalid feedback data" }));
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn malformed_body_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        for body in ["{not json", "null"] {
            let (status, json) = post_feedback(test_app(dir.path().join("f.txt")), body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(json, json!({ "error": "Internal server error" }));
        }
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let (status, json) = post_feedback(
            test_app(dir.path().to_path_buf()),
            json!({ "feedback": "lost" }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Failed to save feedback" }));
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let res = test_app(dir.path().join("f.txt"))
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/feedback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
