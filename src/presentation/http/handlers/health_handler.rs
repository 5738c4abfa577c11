use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::infrastructure::database::DbPool;
use crate::presentation::http::dto::{ApiResponse, DatabaseHealthDto, HealthResponseDto};

pub struct HealthHandler {
    pool: Option<DbPool>,
}

impl HealthHandler {
    /// Without a pool only liveness is reported.
    pub fn new(pool: Option<DbPool>) -> Self {
        Self { pool }
    }

    fn database(&self) -> Option<DatabaseHealthDto> {
        self.pool.as_ref().map(|pool| {
            let state = pool.state();
            DatabaseHealthDto {
                connections: state.connections,
                idle_connections: state.idle_connections,
            }
        })
    }

    pub async fn health(State(handler): State<Arc<HealthHandler>>) -> impl IntoResponse {
        let database = handler.database();
        let ready = database.as_ref().is_none_or(DatabaseHealthDto::is_ready);

        let health_response = HealthResponseDto {
            status: if ready { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
        };

        let status = if ready {
            StatusCode::OK
        } else {
            tracing::warn!("Health check found no database connections");
            StatusCode::SERVICE_UNAVAILABLE
        };

        (status, Json(ApiResponse::success(health_response)))
    }
}
