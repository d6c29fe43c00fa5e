//! HTTP server and route handlers

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{ContentError, PostDetail, PostStore, PostSummary};
use crate::templates::{SiteContext, TemplateRenderer};
use crate::Site;

const POST_NOT_FOUND: &str = "Post not found";
const PAGE_NOT_FOUND: &str = "Page not found";

/// Shared, read-only state built once at startup
pub struct AppState {
    config: SiteConfig,
    store: PostStore,
    templates: TemplateRenderer,
    site_context: SiteContext,
    stylesheet: Option<String>,
}

impl AppState {
    pub fn new(site: &Site) -> Result<Self> {
        let store = site.post_store();
        let stylesheet = store.renderer().stylesheet();
        let site_context = SiteContext::new(&site.config, stylesheet.is_some());

        Ok(Self {
            config: site.config.clone(),
            store,
            templates: TemplateRenderer::new()?,
            site_context,
            stylesheet,
        })
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.templates.render(template_name, context)?))
    }

    /// 404 page, falling back to plain text if the template fails
    fn not_found(&self, message: &str) -> Response {
        let mut context = self.site_context.to_context();
        context.insert("message", message);
        match self.templates.render("not_found.html", &context) {
            Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render not-found page: {:#}", e);
                (StatusCode::NOT_FOUND, message.to_string()).into_response()
            }
        }
    }
}

/// Any failure that should surface as a 500
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Build the application router
pub fn router(site: &Site) -> Result<Router> {
    let state = Arc::new(AppState::new(site)?);

    Ok(Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/:slug", get(blog_post_handler))
        .route("/highlight.css", get(stylesheet_handler))
        .nest_service("/static", ServeDir::new(&site.static_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving posts from {:?}", site.content_dir);
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_posts(state: &Arc<AppState>) -> Result<Vec<PostSummary>, ContentError> {
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || state.store.list_posts()).await {
        Ok(result) => result,
        Err(e) => Err(ContentError::Io(std::io::Error::other(e))),
    }
}

async fn load_post(state: &Arc<AppState>, slug: String) -> Result<PostDetail, ContentError> {
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || state.store.load_post(&slug)).await {
        Ok(result) => result,
        Err(e) => Err(ContentError::Io(std::io::Error::other(e))),
    }
}

/// Home page: identity, projects and the latest posts
async fn home_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let mut recent_posts = list_posts(&state).await?;
    recent_posts.truncate(state.config.recent_posts);

    let mut context = state.site_context.to_context();
    context.insert("tagline", &state.config.tagline);
    context.insert("projects", &state.config.projects);
    context.insert("recent_posts", &recent_posts);

    state.render("index.html", &context)
}

/// Liveness probe
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn blog_index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let posts = list_posts(&state).await?;

    let mut context = state.site_context.to_context();
    context.insert("posts", &posts);

    state.render("blog_list.html", &context)
}

async fn blog_post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let post = match load_post(&state, slug).await {
        Ok(post) => post,
        Err(e) if e.is_not_found() => {
            tracing::debug!("{}", e);
            return Ok(state.not_found(POST_NOT_FOUND));
        }
        Err(e) => return Err(e.into()),
    };

    let mut context = state.site_context.to_context();
    context.insert("post", &post);

    Ok(state.render("blog_post.html", &context)?.into_response())
}

async fn stylesheet_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.stylesheet {
        Some(css) => ([(header::CONTENT_TYPE, "text/css")], css.clone()).into_response(),
        None => state.not_found(PAGE_NOT_FOUND),
    }
}

async fn fallback_handler(State(state): State<Arc<AppState>>) -> Response {
    state.not_found(PAGE_NOT_FOUND)
}
