//! HTTP front end: HTML pages, JSON form endpoints and static files.

mod api;
mod pages;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use press_kit_client::{ContentSource, MailSender};
use press_kit_core::Config;
use press_kit_generator::PageMeta;
use press_kit_generator::render;
use serde_json::Value;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ContentSource>,
    pub mailer: Arc<dyn MailSender>,
    pub config: Arc<Config>,
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir);

    let pages = Router::new()
        .route("/", get(pages::home))
        .route("/search", get(pages::search))
        .route("/contact", get(pages::contact))
        .route("/posts/categories", get(pages::categories))
        .route("/posts/authors", get(pages::authors))
        .route("/posts/tags", get(pages::tags))
        .route("/posts/{slug}", get(pages::post))
        .route("/{slug}", get(pages::slug))
        .layer(middleware::from_fn_with_state(state.clone(), maintenance));

    let api = Router::new()
        .route("/search", get(api::search))
        .route("/contact", post(api::contact))
        .route("/newsletter", post(api::newsletter))
        .route("/comments", post(api::comment))
        .route("/submit-rating", post(api::rating));

    Router::new()
        .merge(pages)
        .nest("/api", api)
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the maintenance page instead of any HTML route while the remote
/// switch is on
async fn maintenance(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.source.maintenance_mode().await {
        return next.run(request).await;
    }

    info!(path = %request.uri().path(), "maintenance mode on");
    let site = &state.config.site;
    let html = render::document(
        site,
        &PageMeta::maintenance(site),
        None,
        &[],
        &render::maintenance_page(site),
    );
    (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response()
}

/// Wrap a body in the site layout, with the navigation menu
async fn render_page(
    state: &AppState,
    meta: &PageMeta,
    schema: &[Value],
    body: &str,
) -> Html<String> {
    let menu = state.source.menu(&state.config.wordpress.menu_location).await;
    Html(render::document(
        &state.config.site,
        meta,
        menu.as_ref(),
        schema,
        body,
    ))
}

async fn not_found(state: &AppState) -> Response {
    let meta = PageMeta::not_found(&state.config.site);
    let html = render_page(state, &meta, &[], &render::not_found_page()).await;
    (StatusCode::NOT_FOUND, html).into_response()
}
