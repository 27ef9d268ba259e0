//! HTTP server for the typecase catalog (made by Kotype)
//!
//! The manifest registers exactly once at startup; every request after that
//! reads the same catalog and head sink. The server is the Rust stand-in for
//! the page that would otherwise consume the pipeline's injections.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use typecase_core::catalog::{Catalog, CatalogEntry};
use typecase_core::head::DocumentHead;
use typecase_core::manifest::RawFontRecord;
use typecase_core::register::register_manifest;

use crate::build_query_from_parts;

/// Catalog and rendered head, built once at startup.
pub struct CatalogState {
    catalog: Catalog,
    head: DocumentHead,
}

/// Filter keys accepted on `GET /fonts`; absent keys impose no constraint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Category to match exactly ("All" imposes no constraint)
    pub category: Option<String>,
    /// Case-insensitive substring on the family name
    pub search: Option<String>,
    /// Exact match on the lead style name
    pub style: Option<String>,
    /// Regex that must match the family name
    pub name: Option<String>,
    /// Premium flag to match
    pub premium: Option<bool>,
    /// Variable flag to match
    pub variable: Option<bool>,
}

/// Run the registration pipeline once and wrap the result for the router.
pub fn catalog_state(records: &[RawFontRecord]) -> Arc<CatalogState> {
    let mut catalog = Catalog::new();
    let mut head = DocumentHead::new();
    register_manifest(records, &mut catalog, &mut head);
    Arc::new(CatalogState { catalog, head })
}

/// Register the manifest and serve it until interrupted.
pub async fn serve(records: &[RawFontRecord], bind: &str) -> Result<()> {
    let state = catalog_state(records);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    axum::serve(listener, router(state))
        .await
        .context("serving HTTP")?;
    Ok(())
}

pub fn router(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/fonts", get(fonts_handler))
        .route("/fonts.css", get(css_handler))
        .route("/head.html", get(head_handler))
        .route("/fonts/:id", get(font_handler))
        .with_state(state)
}

async fn fonts_handler(
    State(state): State<Arc<CatalogState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<CatalogEntry>>, (StatusCode, String)> {
    let name_patterns: Vec<String> = params.name.clone().into_iter().collect();
    let query = build_query_from_parts(
        &params.category,
        &params.search,
        &params.style,
        &name_patterns,
        params.premium,
        params.variable,
    )
    .map_err(to_bad_request)?;

    let entries: Vec<CatalogEntry> = state
        .catalog
        .filter(&query)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(entries))
}

async fn font_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<u32>,
) -> Result<Json<CatalogEntry>, (StatusCode, String)> {
    state
        .catalog
        .by_id(id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("no font with id {id}")))
}

async fn css_handler(State(state): State<Arc<CatalogState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        state.head.render_css(),
    )
}

async fn head_handler(State(state): State<Arc<CatalogState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        state.head.render_html(),
    )
}

fn to_bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}
