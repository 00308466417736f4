use axum::response::{IntoResponse, Response};
use error_stack::Report;
use http::StatusCode;
use maud::{html, Markup};

use super::{
    components::{dark_mode_toggle, footer, quick_links},
    layout::page_wrapper,
    not_found::{not_found_message, not_found_page},
    server_error::{server_error_message, server_error_page},
};
use crate::{
    error::{Error, ErrorType, RenderError},
    properties::SlugProperties,
};

/// The display strings for one class of render failure.
struct ErrorTitle {
    title: &'static str,
    subtitle: &'static str,
}

const REPOSITORY_NOT_FOUND: ErrorTitle = ErrorTitle {
    title: "404",
    subtitle: "Repository Not Found",
};

const DOCUMENT_NOT_FOUND: ErrorTitle = ErrorTitle {
    title: "404",
    subtitle: "Document Not Found",
};

const PAGE_NOT_FOUND: ErrorTitle = ErrorTitle {
    title: "404",
    subtitle: "Page Not Found",
};

const SERVER_ERROR: ErrorTitle = ErrorTitle {
    title: "500",
    subtitle: "Whoops! Something Went Wrong",
};

/// Pick the title block for an error. Total over every status and
/// classification; an unclassified 404 falls through to the plain page entry.
fn error_title(error: &RenderError) -> &'static ErrorTitle {
    if error.status_code == StatusCode::INTERNAL_SERVER_ERROR {
        return &SERVER_ERROR;
    }

    match error.error_type {
        Some(ErrorType::RepositoryNotFound) => &REPOSITORY_NOT_FOUND,
        Some(ErrorType::PageNotFound) => &DOCUMENT_NOT_FOUND,
        None => &PAGE_NOT_FOUND,
    }
}

/// Render the full error page for a failed request.
///
/// The body message comes from the server error template when the status is
/// 500 and from the not-found templates otherwise, so a 500 never leaks a
/// stale not-found classification.
pub fn error_page(error: &RenderError) -> Markup {
    let title = error_title(error);

    let head = html! {
        meta name="robots" content="noindex";
        link rel="preconnect" href="https://fonts.gstatic.com";
        link
            href="https://fonts.googleapis.com/css2?family=Anton&display=swap"
            rel="stylesheet";
    };

    let body = html! {
        header class="header-bar" {
            div class="header-bar-inner" {
                (dark_mode_toggle())
            }
        }
        section class="error-page" {
            div class="error-title" {
                h1 { (title.title) }
                h2 { (title.subtitle) }
            }
            div class="prose" {
                @if error.status_code == StatusCode::INTERNAL_SERVER_ERROR {
                    (server_error_message(error))
                } @else {
                    (not_found_message(error))
                }
            }
            (quick_links())
            (footer())
        }
    };

    page_wrapper(&format!("{}: {}", title.title, title.subtitle), head, body)
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        let markup = error_page(&self);
        (self.status_code, markup).into_response()
    }
}

/// Adapts [`Error`] to the HTML surface, so page handlers can use `?` and
/// still produce a styled response instead of the JSON one.
pub struct HtmlError(pub Error);

impl From<Error> for HtmlError {
    fn from(value: Error) -> Self {
        HtmlError(value)
    }
}

impl From<Report<Error>> for HtmlError {
    fn from(value: Report<Error>) -> Self {
        HtmlError(Error::WrapReport(value))
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        match self.0.status_code() {
            StatusCode::NOT_FOUND => not_found_page(),
            _ => server_error_page(SlugProperties::default()),
        }
    }
}
