use axum::response::{IntoResponse, Response};
use maud::{html, Markup};

use super::components::{external_link, ISSUES_URL};
use crate::error::{ErrorType, RenderError};

/// Where GitHub sends people to create a brand-new repository.
const NEW_REPO_URL: &str = "https://github.com/new";

/// The message block for 404s, selected by the error's classification.
///
/// An unclassified 404 renders nothing. The title block already says the page
/// was not found, and without a resolved slug there is no repository context
/// to explain.
pub fn not_found_message(error: &RenderError) -> Markup {
    let properties = &error.properties;

    match error.error_type {
        Some(ErrorType::RepositoryNotFound) => html! {
            p {
                "The GitHub repository "
                (external_link(
                    &properties.github_url(),
                    &format!("{}/{}", properties.owner, properties.repository),
                ))
                " was not found."
            }
            p {
                "To get started, create a new repository on "
                (external_link(NEW_REPO_URL, "GitHub"))
                ". If you were expecting a page to be here, you can "
                a href=(properties.debug_url()) { "debug" }
                " this page or "
                (external_link(ISSUES_URL, "report an issue"))
                "."
            }
        },
        Some(ErrorType::PageNotFound) => html! {
            p {
                "No valid file matching the path "
                code { "/" (properties.path) }
                " could be found."
            }
            p {
                "To get started, create a new "
                code { ".md" }
                " or "
                code { ".mdx" }
                " file on "
                (external_link(&properties.new_file_url(), "GitHub"))
                ". If you were expecting a page to be here, you can "
                a href=(properties.debug_url()) { "debug" }
                " this page or "
                (external_link(ISSUES_URL, "report an issue"))
                "."
            }
        },
        None => html! {},
    }
}

/// The complete page for a request that never matched a document.
pub fn not_found_page() -> Response {
    let error = RenderError::not_found();
    let markup = super::error::error_page(&error);
    (error.status_code, markup).into_response()
}

/// Router fallback for unknown paths.
pub async fn not_found_fallback() -> Response {
    not_found_page()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::properties::SlugProperties;

    fn props() -> SlugProperties {
        SlugProperties {
            owner: "acme".into(),
            repository: "widgets".into(),
            git_ref: "main".into(),
            path: "guides/install".into(),
        }
    }

    #[test]
    fn repository_message_links_repo_creation_and_debugging() {
        let html = not_found_message(&RenderError::repo_not_found(props())).into_string();

        assert!(html.contains("acme/widgets"));
        assert!(html.contains("was not found"));
        assert!(html.contains(r#"href="https://github.com/acme/widgets""#));
        assert!(html.contains(NEW_REPO_URL));
        assert!(html.contains(r#"href="/_debug/acme/widgets~main/guides/install""#));
        assert!(html.contains(ISSUES_URL));
    }

    #[test]
    fn document_message_links_file_creation() {
        let html = not_found_message(&RenderError::page_not_found(props())).into_string();

        assert!(html.contains("No valid file matching the path"));
        assert!(html.contains("<code>/guides/install</code>"));
        assert!(html.contains("https://github.com/acme/widgets/new/main/docs/guides/install"));
        assert!(html.contains(".mdx"));
        assert!(html.contains(r#"href="/_debug/acme/widgets~main/guides/install""#));
    }

    #[test]
    fn unclassified_message_is_empty() {
        assert!(not_found_message(&RenderError::not_found())
            .into_string()
            .is_empty());
    }

    #[test]
    fn page_carries_a_404_status() {
        let response = not_found_page();
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
    }
}
