//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DependencyHealth,
    pub cache: DependencyHealth,
}

/// Connectivity of one backing service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DependencyHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

impl DependencyHealth {
    fn from_check(connected: bool, start: std::time::Instant) -> Self {
        Self {
            connected,
            latency_ms: connected.then(|| start.elapsed().as_millis() as u64),
        }
    }
}

/// Simple status response for liveness and readiness checks.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /ping`.
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "pong!".to_string(),
    })
}

/// Full health check covering the database and the OTP cache.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let start = std::time::Instant::now();
    let database = DependencyHealth::from_check(
        persistence::db::ping(&state.pool).await.is_ok(),
        start,
    );

    let start = std::time::Instant::now();
    let cache = DependencyHealth::from_check(state.otp_store.ping().await.is_ok(), start);

    let healthy = database.connected && cache.connected;
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        cache,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness check endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness check endpoint. Ready once the database answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    if persistence::db::ping(&state.pool).await.is_ok() {
        Ok(Json(StatusResponse {
            status: "ready".to_string(),
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping() {
        let Json(body) = ping().await;
        assert_eq!(body.message, "pong!");
    }

    #[tokio::test]
    async fn test_live() {
        let Json(body) = live().await;
        assert_eq!(body.status, "alive");
    }

    #[test]
    fn test_dependency_health_down_has_no_latency() {
        let health = DependencyHealth::from_check(false, std::time::Instant::now());
        assert!(!health.connected);
        assert_eq!(health.latency_ms, None);
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            database: DependencyHealth {
                connected: true,
                latency_ms: Some(3),
            },
            cache: DependencyHealth {
                connected: true,
                latency_ms: Some(1),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database"]["latency_ms"], 3);
        assert_eq!(json["cache"]["connected"], true);
    }
}
