use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors raised by configuration and request plumbing.
///
/// A controller that cannot be resolved is *not* an error: resolution
/// entry points return `None` and the host decides what a miss means.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("Missing route value: {name}")]
    MissingRouteValue { name: String },
}

impl DispatchError {
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn missing_route_value(name: impl Into<String>) -> Self {
        Self::MissingRouteValue { name: name.into() }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = match &self {
            DispatchError::MissingRouteValue { .. } => axum::http::StatusCode::BAD_REQUEST,
            DispatchError::InvalidConfig { .. } => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        crate::common::ApiResponse::<()>::failure(status, self.to_string()).into_response()
    }
}
