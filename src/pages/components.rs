use chrono::Datelike;
use maud::{html, Markup};

/// Canonical home of the project, linked from the footer and quick links.
pub const GITHUB_URL: &str = "https://github.com/docpage/docpage";
/// Where users report problems with hosted pages.
pub const ISSUES_URL: &str = "https://github.com/docpage/docpage/issues";

/// An anchor that opens in a new tab without handing `window.opener` to the
/// target.
pub fn external_link(href: &str, label: &str) -> Markup {
    html! {
        a href=(href) target="_blank" rel="noopener noreferrer" { (label) }
    }
}

/// The header control that flips the document's `dark` class. The choice is
/// not persisted; the host application owns that.
pub fn dark_mode_toggle() -> Markup {
    html! {
        button
            type="button"
            class="dark-mode-toggle"
            aria-label="Toggle dark mode"
            onclick="document.documentElement.classList.toggle('dark')"
        {
            "☾"
        }
    }
}

/// Navigation rendered under every error message.
pub fn quick_links() -> Markup {
    html! {
        section class="quick-links" {
            h2 { "Quick Links" }
            ul {
                li { a href="/" { "Homepage" } }
                li { (external_link(GITHUB_URL, "GitHub")) }
                li { (external_link(ISSUES_URL, "Issue tracker")) }
            }
        }
    }
}

pub fn footer() -> Markup {
    let year = chrono::Utc::now().year();

    html! {
        footer class="site-footer" {
            p {
                "© " (year) " docpage. Powered by "
                (external_link(GITHUB_URL, "docpage"))
                "."
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn external_links_do_not_leak_the_opener() {
        let html = external_link("https://example.com", "Example").into_string();
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(">Example</a>"));
    }

    #[test]
    fn quick_links_cover_home_and_project() {
        let html = quick_links().into_string();
        assert!(html.contains("Quick Links"));
        assert!(html.contains(r#"href="/""#));
        assert!(html.contains(GITHUB_URL));
        assert!(html.contains(ISSUES_URL));
    }

    #[test]
    fn footer_shows_the_current_year() {
        let html = footer().into_string();
        assert!(html.contains(&chrono::Utc::now().year().to_string()));
    }
}
