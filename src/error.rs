//! Error handling

use axum::response::IntoResponse;
use tracing::info;

/// definitions for the stamps application.
#[derive(Debug)]
pub enum StampError {
    /// When you didn't do the right thing
    BadRequest,
    /// A generation is already in flight; submissions aren't queued
    Busy,
    /// When a requested stamp is not found
    NotFound(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl From<std::io::Error> for StampError {
    fn from(err: std::io::Error) -> Self {
        StampError::InternalServerError(err.to_string())
    }
}

impl From<axum::http::Error> for StampError {
    fn from(err: axum::http::Error) -> Self {
        StampError::InternalServerError(err.to_string())
    }
}

impl From<url::ParseError> for StampError {
    fn from(err: url::ParseError) -> Self {
        StampError::InternalServerError(err.to_string())
    }
}

impl From<image::ImageError> for StampError {
    fn from(err: image::ImageError) -> Self {
        StampError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for StampError {
    fn into_response(self) -> axum::response::Response {
        match self {
            StampError::BadRequest => {
                info!("Bad request received");
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Bad Request"));
                *response.status_mut() = axum::http::StatusCode::BAD_REQUEST;
                response
            }
            StampError::Busy => {
                info!("Submission rejected: a generation is already in flight");
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    "A stamp is already being generated.",
                ));
                *response.status_mut() = axum::http::StatusCode::CONFLICT;
                response
            }
            StampError::NotFound(id) => {
                tracing::error!("404 stamp {id}");
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Not Found"));
                *response.status_mut() = axum::http::StatusCode::NOT_FOUND;
                response
            }
            StampError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Internal server error"));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}
