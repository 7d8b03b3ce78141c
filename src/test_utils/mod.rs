#![allow(missing_docs)]

pub(crate) mod api;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use api::{spawn_test_api, transactions_api, transactions_body};
pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, parse_json};
