//! Shared page layout and markup.
//!
//! The class names used here are defined in `static/main.css`.

use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{endpoints, header::Header};

/// The class of the `main` element that holds a page's content.
pub const PAGE_CLASS: &str = "page";

pub fn base(title: &str, language: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(language)
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Finance Dashboard" }
                link rel="icon" type="image/svg+xml" href="/static/total.svg";
                link href="/static/main.css" rel="stylesheet";
            }

            body
            {
                (content)
            }
        }
    }
}

/// A full page for a request that could not be served, with the app header, the
/// `status` code and a link back to the dashboard.
pub fn error_view(title: &str, status: StatusCode, message: &str, language: &str) -> Markup {
    let content = html!(
        (Header::new("").into_html())

        main class=(PAGE_CLASS)
        {
            div class="error-panel"
            {
                h1 class="error-status" { (status.as_u16()) }

                p { (message) }

                a href=(endpoints::DASHBOARD_VIEW) class="button"
                {
                    "Voltar para a listagem"
                }
            }
        }
    );

    base(title, language, &content)
}

/// An error message box with a bold `message` followed by `details`.
pub fn error_alert(message: &str, details: &str) -> Markup {
    html!(
        div
            id="alert"
            role="alert"
            class="alert"
        {
            strong { (message) }

            @if !details.is_empty() {
                " " (details)
            }
        }
    )
}
