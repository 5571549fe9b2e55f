use axum::{
    Json,
    http::StatusCode as HttpStatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard JSON envelope for dispatch responses
///
/// Controllers are free to answer however they like; the dispatcher itself only
/// produces error envelopes (unknown controller, missing route values).
///
/// # Example
/// ```
/// use keyed_dispatch::common::ApiResponse;
/// use axum::http::StatusCode;
///
/// let response: ApiResponse<()> = ApiResponse::failure(StatusCode::NOT_FOUND, "No controller");
/// assert!(!response.success);
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    pub success: bool,

    pub timestamp: String,

    #[serde(skip)]
    pub http_status: HttpStatusCode,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response with data
    ///
    /// Defaults to HTTP 200 OK.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            success: true,
            timestamp: chrono::Utc::now().to_rfc3339(),
            http_status: HttpStatusCode::OK,
        }
    }

    /// Create an error response
    ///
    /// The error `code` is the canonical reason phrase of `status` with the
    /// spaces removed, e.g. `NotFound`.
    pub fn failure(status: HttpStatusCode, message: impl Into<String>) -> Self {
        let code = status
            .canonical_reason()
            .unwrap_or("Unknown")
            .replace(' ', "");

        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            success: false,
            timestamp: chrono::Utc::now().to_rfc3339(),
            http_status: status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}
