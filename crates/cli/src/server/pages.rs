use super::{AppState, not_found, render_page};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use press_kit_client::{PostQuery, ResolveOptions, View, load_post_view, load_view, resolve};
use press_kit_generator::{PageMeta, build_meta, render, schema, schema_for};
use serde::Deserialize;
use tracing::debug;

/// Posts shown on the home page
const HOME_POSTS: u32 = 12;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

pub async fn home(State(state): State<AppState>) -> Response {
    let site = &state.config.site;
    let query = PostQuery::default().per_page(HOME_POSTS);
    let (posts, categories) = tokio::join!(state.source.posts(&query), state.source.categories());

    let body = render::home_page(site, &posts, &categories);
    render_page(&state, &PageMeta::home(site), &[schema::website(site)], &body)
        .await
        .into_response()
}

/// Any root-level slug: post, page, category, tag or author
pub async fn slug(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let options = ResolveOptions {
        include_tags: state.config.wordpress.resolve_tags,
    };
    let resolved = resolve(state.source.as_ref(), &slug, options).await;
    debug!(slug = %slug, kind = resolved.kind(), "resolved slug");

    let view = load_view(state.source.as_ref(), resolved).await;
    render_view(&state, view).await
}

/// `/posts/{slug}` only ever names a post
pub async fn post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(post) = state.source.post_by_slug(&slug).await else {
        return not_found(&state).await;
    };
    let view = load_post_view(state.source.as_ref(), post).await;
    render_view(&state, View::Post(Box::new(view))).await
}

pub async fn categories(State(state): State<AppState>) -> Response {
    let categories = state.source.categories().await;
    let meta = PageMeta::listing(
        &state.config.site,
        "Categories",
        "Browse every category",
        "posts/categories",
    );
    render_page(&state, &meta, &[], &render::category_index(&categories))
        .await
        .into_response()
}

pub async fn authors(State(state): State<AppState>) -> Response {
    let authors = state.source.authors().await;
    let meta = PageMeta::listing(
        &state.config.site,
        "Authors",
        "Meet the people who write here",
        "posts/authors",
    );
    render_page(&state, &meta, &[], &render::author_index(&authors))
        .await
        .into_response()
}

pub async fn tags(State(state): State<AppState>) -> Response {
    let tags = state.source.tags().await;
    let meta = PageMeta::listing(&state.config.site, "Tags", "Browse posts by tag", "posts/tags");
    render_page(&state, &meta, &[], &render::tag_index(&tags))
        .await
        .into_response()
}

pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let site = &state.config.site;
    let query = params.q.trim();
    let posts = if query.is_empty() {
        Vec::new()
    } else {
        state.source.posts(&PostQuery::search(query)).await
    };

    let body = render::search_results(query, &posts);
    render_page(&state, &PageMeta::search(site, query), &[schema::website(site)], &body)
        .await
        .into_response()
}

pub async fn contact(State(state): State<AppState>) -> Response {
    let meta = PageMeta::contact(&state.config.site);
    render_page(&state, &meta, &[], &render::contact_page())
        .await
        .into_response()
}

async fn render_view(state: &AppState, view: View) -> Response {
    let body = match &view {
        View::Post(v) => render::post_article(v),
        View::Page(v) => render::page_article(v),
        View::Category(v) => render::term_listing("Category", v),
        View::Tag(v) => render::term_listing("Tag", v),
        View::Author(v) => render::author_profile(v),
        View::NotFound => return not_found(state).await,
    };

    let site = &state.config.site;
    let meta = build_meta(site, &view);
    let blocks = schema_for(site, &view);
    render_page(state, &meta, &blocks, &body).await.into_response()
}
