use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures_util::future::join_all;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed future for readiness checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs readiness checks concurrently and aggregates the results.
///
/// Returns 200 with per-dependency status when everything answers,
/// 503 otherwise.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![
///     ("database", Box::pin(async {
///         if check_health(&client).await { Ok(()) } else { Err("unreachable".into()) }
///     })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut status_map = HashMap::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(_) => {
                status_map.insert(name, "connected");
            }
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                status_map.insert(name, "disconnected");
                all_healthy = false;
            }
        }
    }

    let mut response = json!({
        "status": if all_healthy { "ready" } else { "not ready" }
    });

    if let Value::Object(ref mut map) = response {
        for (name, status) in status_map {
            map.insert(name.to_string(), json!(status));
        }
    }

    if all_healthy {
        Ok((StatusCode::OK, Json(response)))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness endpoint handler. Always answers 200 while the process runs.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Router exposing `/health` with the app name and version.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = Router::new().merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn all_checks_passing_answers_ready() {
        let checks: Vec<(&str, HealthCheckFuture)> =
            vec![("database", Box::pin(async { Ok(()) }))];

        let result = run_health_checks(checks).await;
        let (status, Json(body)) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn failing_check_answers_503() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("database", Box::pin(async { Err("down".to_string()) })),
            ("other", Box::pin(async { Ok(()) })),
        ];

        let result = run_health_checks(checks).await;
        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["database"], "disconnected");
        assert_eq!(body["other"], "connected");
    }
}
