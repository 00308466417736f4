use maud::{html, Markup, DOCTYPE};

/// The HTML shell that every page should be wrapped in to enable basic
/// styling. `head` carries page-specific tags such as robots directives or
/// font links, and `slot` is the page body.
pub fn page_wrapper(title: &str, head: Markup, slot: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                link rel="stylesheet" href="/static/app.css";
                (head)
                title { (title) }
            }
            body {
                (slot)
            }
        }
    }
}
