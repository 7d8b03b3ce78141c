//! This file defines the page header with the app name and navigation links.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the header.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let class = if self.is_current {
            "nav-link nav-link-current"
        } else {
            "nav-link"
        };

        html!(
            a
                href=(self.url)
                class=(class)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct Header<'a> {
    links: Vec<Link<'a>>,
}

impl Header<'_> {
    /// Get the page header.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> Header<'_> {
        let links = vec![Link {
            url: endpoints::DASHBOARD_VIEW,
            title: "Listagem",
            is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
        }];

        Header { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            header class="page-header"
            {
                div class="page-header-content"
                {
                    a
                        href=(endpoints::ROOT)
                        class="brand"
                    {
                        "Finance Dashboard"
                    }

                    nav
                    {
                        @for link in self.links {
                            (link.into_html())
                        }
                    }
                }
            }
        )
    }
}
