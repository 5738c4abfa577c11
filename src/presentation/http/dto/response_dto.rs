use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// A failed response that still carries a body, e.g. the per-upload
    /// outcomes of a notification that has to be re-delivered.
    pub fn failure(data: T, code: String, message: String) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(ApiError {
                code,
                message,
                details: None,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: String, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message,
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
    pub database: Option<DatabaseHealthDto>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealthDto {
    pub connections: u32,
    pub idle_connections: u32,
}

impl DatabaseHealthDto {
    /// The pool keeps one idle connection open while Postgres is reachable.
    pub fn is_ready(&self) -> bool {
        self.connections > 0
    }
}
