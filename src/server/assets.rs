use std::borrow::Cow;

use axum::{
    body::Body,
    extract::Path,
    response::{IntoResponse, Response},
};
use http::{header, StatusCode};
use rust_embed::RustEmbed;

use crate::pages::not_found_page;

/// Stylesheets and other files compiled into the binary. In debug builds
/// rust-embed reads from disk instead, so styles can be edited without a
/// rebuild.
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct StaticAssets;

/// Serve one embedded asset. Content only changes across deploys, so a short
/// client cache is enough.
pub async fn serve_asset(Path(path): Path<String>) -> Response {
    let Some(asset) = StaticAssets::get(&path) else {
        return not_found_page();
    };

    let body = match asset.data {
        Cow::Borrowed(data) => Body::from(data),
        Cow::Owned(data) => Body::from(data),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.metadata.mimetype())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
