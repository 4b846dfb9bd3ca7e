//! Error handling for the catalog HTTP layer

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::{NoContext, Timestamp, Uuid};

use crate::html;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    /// Placeholder for an operation that exists in the route table but has
    /// no behavior yet
    #[error("not implemented: {operation}")]
    NotImplemented { operation: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// `operation` is shown verbatim, e.g. `"Genre delete GET"`
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            AppError::NotImplemented { operation } => {
                tracing::info!(operation = %operation, "unimplemented operation requested");
                return (
                    StatusCode::NOT_IMPLEMENTED,
                    format!("NOT IMPLEMENTED: {operation}"),
                )
                    .into_response();
            }
            AppError::NotFound { message, code } => (StatusCode::NOT_FOUND, code, message),
            AppError::BadRequest { message, code } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error".to_string(),
                format!("{e:#}"),
            ),
        };

        let error_id = Uuid::new_v7(Timestamp::now(NoContext));
        let timestamp = OffsetDateTime::now_utc();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                error = %message,
                "Request error"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request error"
            );
        }

        // Internal details stay in the logs for release builds
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let body = format!(
            "<h1>{}</h1>\n<h2>{}</h2>\n<p class=\"trace\">trace id {} at {}</p>",
            html::escape(&message),
            status.as_u16(),
            error_id,
            timestamp.unix_timestamp()
        );

        (
            status,
            [("x-error-code", error_code)],
            Html(html::document("Error", &body)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_not_found_constructor() {
        match AppError::not_found("Genre not found") {
            AppError::NotFound { message, code } => {
                assert_eq!(message, "Genre not found");
                assert_eq!(code, "not_found");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[tokio::test]
    async fn test_not_found_renders_error_page() {
        let response = AppError::not_found("Genre not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-error-code"], "not_found");
        let body = body_text(response).await;
        assert!(body.contains("<h1>Genre not found</h1>"));
        assert!(body.contains("<h2>404</h2>"));
    }

    #[tokio::test]
    async fn test_not_implemented_is_plain_text() {
        let response = AppError::not_implemented("Genre delete GET").into_response();

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body_text(response).await, "NOT IMPLEMENTED: Genre delete GET");
    }

    #[tokio::test]
    async fn test_internal_error_mapping() {
        let internal_error = anyhow::anyhow!("Database connection failed");
        let response = AppError::Internal(internal_error).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["x-error-code"], "internal_error");
    }

    #[tokio::test]
    async fn test_messages_are_escaped() {
        let response = AppError::bad_request("<b>bad</b>").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.contains("&lt;b&gt;bad&lt;&#x2F;b&gt;"));
        assert!(!body.contains("<b>bad</b>"));
    }
}
