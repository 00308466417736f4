use axum::{
    response::{IntoResponse, Response},
    Json,
};
use error_stack::Report;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::properties::SlugProperties;

/// The top-level error type for the service
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read or parse a configuration file
    #[error("Configuration error")]
    Config,
    /// Failed to start the server
    #[error("Failed to start server")]
    ServerStart,
    /// Failure while shutting down
    #[error("Encountered error while shutting down")]
    Shutdown,
    /// The requested item was not found
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A wrapper around a Report<Error> to let it be returned from an Axum
    /// handler, since we can't implement IntoResponse on Report
    #[error("{0}")]
    WrapReport(Report<Error>),
}

impl From<Report<Error>> for Error {
    fn from(value: Report<Error>) -> Self {
        Error::WrapReport(value)
    }
}

impl Error {
    pub fn error_kind(&self) -> &'static str {
        match self {
            Error::WrapReport(e) => e.current_context().error_kind(),
            Error::Config => "config",
            Error::ServerStart => "server_start",
            Error::Shutdown => "shutdown",
            Error::NotFound(_) => "not_found",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::WrapReport(e) => e.current_context().status_code(),
            Error::Config => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ServerStart => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Shutdown => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "kind": self.error_kind(),
                "message": self.to_string(),
            }
        });

        (self.status_code(), Json(body)).into_response()
    }
}

/// Which resolution step failed for a request that reached a real slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// The GitHub repository behind the slug does not exist or is not visible
    RepositoryNotFound,
    /// The repository exists but holds no document at the requested path
    PageNotFound,
}

/// Everything the error templates need to describe a failed render.
///
/// Callers build one of these once resolution or page building has failed.
/// Rendering never mutates it.
#[derive(Debug, Clone)]
pub struct RenderError {
    /// 404 for resolution failures, 500 for build failures
    pub status_code: StatusCode,
    /// What failed to resolve, when known
    pub error_type: Option<ErrorType>,
    /// The slug the request addressed
    pub properties: SlugProperties,
}

impl RenderError {
    /// The repository behind the slug could not be found.
    pub fn repo_not_found(properties: SlugProperties) -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            error_type: Some(ErrorType::RepositoryNotFound),
            properties,
        }
    }

    /// The repository exists, but the requested document does not.
    pub fn page_not_found(properties: SlugProperties) -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            error_type: Some(ErrorType::PageNotFound),
            properties,
        }
    }

    /// Something failed while building the page.
    pub fn server_error(properties: SlugProperties) -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_type: None,
            properties,
        }
    }

    /// A 404 with no classification, for requests that never matched a slug.
    pub fn not_found() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            error_type: None,
            properties: SlugProperties::default(),
        }
    }
}
