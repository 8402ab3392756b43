use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

use crate::error::ReportError;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    status: &'a str,
    message: &'a str,
}

/// Unified error type that renders as an HTML error page with an
/// appropriate HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "Request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "Request rejected");
        }

        let status = self.status.to_string();
        let page = ErrorTemplate {
            status: &status,
            message: &self.message,
        };
        let body = page
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}"));
        (self.status, Html(body)).into_response()
    }
}

impl From<ReportError> for AppError {
    fn from(e: ReportError) -> Self {
        match &e {
            ReportError::InvalidRequest(msg) => AppError::bad_request(msg.clone()),
            ReportError::StationTimestamp { .. } | ReportError::Upstream(_) => {
                AppError::bad_gateway(e.to_string())
            }
            ReportError::Content(msg) => AppError::not_found(msg.clone()),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::internal(format!("Template error: {e}"))
    }
}
