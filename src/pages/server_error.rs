use axum::response::{IntoResponse, Response};
use maud::{html, Markup};

use super::components::{external_link, ISSUES_URL};
use crate::{error::RenderError, properties::SlugProperties};

/// The message block for failed page builds. Static apart from the links.
pub fn server_error_message(error: &RenderError) -> Markup {
    let properties = &error.properties;

    html! {
        p { "Something went wrong whilst building the page." }
        p {
            "This could have happened because of an issue with the remote "
            "Markdown content, or something internal. To help fix this problem, "
            "you can "
            a href=(properties.debug_url()) { "debug" }
            " this page or "
            (external_link(ISSUES_URL, "report an issue"))
            "."
        }
    }
}

/// The complete 500 page.
pub fn server_error_page(properties: SlugProperties) -> Response {
    let error = RenderError::server_error(properties);
    let markup = super::error::error_page(&error);
    (error.status_code, markup).into_response()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn message_links_debugging_and_issues() {
        let properties = SlugProperties {
            owner: "acme".into(),
            repository: "widgets".into(),
            ..Default::default()
        };
        let html = server_error_message(&RenderError::server_error(properties)).into_string();

        assert!(html.contains("Something went wrong whilst building the page."));
        assert!(html.contains(r#"href="/_debug/acme/widgets""#));
        assert!(html.contains(ISSUES_URL));
    }

    #[test]
    fn page_carries_a_500_status() {
        let response = server_error_page(SlugProperties::default());
        assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
