//! HTTP front-end: listing, post, and page routes over the content pipeline

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::content::{
    listing, ContentCategory, ContentIdentifier, ContentResolver, MdxCompiler,
};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Shared server state
struct ServerState {
    config: SiteConfig,
    resolver: Arc<ContentResolver>,
    compiler: Arc<MdxCompiler>,
    templates: TemplateRenderer,
}

/// Start the blog server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        config: blog.config.clone(),
        resolver: Arc::new(ContentResolver::from_dir(&blog.content_dir)),
        compiler: Arc::new(MdxCompiler::with_theme(&blog.config.highlight.theme)),
        templates: TemplateRenderer::new()?,
    });

    let app = router(state, &blog.assets_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>, assets_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/posts/*slug", get(post_handler))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Listing page over all posts
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let entries = listing::build(
        Arc::clone(&state.resolver),
        Arc::clone(&state.compiler),
    )
    .await;

    match state.templates.render_index(&state.config, &entries) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Post article route: /posts/{slug...}
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    render_content(state, &slug, ContentCategory::Post).await
}

/// Fallback route: any other path is looked up as a static page
async fn page_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    render_content(state, uri.path(), ContentCategory::Page).await
}

/// Resolve, compile, and render one content item.
///
/// Absence is a 404 through the not-found shell; a compile failure fails
/// the request with a 500 and is logged, never masked.
async fn render_content(
    state: Arc<ServerState>,
    path: &str,
    category: ContentCategory,
) -> Response {
    let Some(identifier) = ContentIdentifier::from_path(path) else {
        return not_found(&state);
    };

    let resolver = Arc::clone(&state.resolver);
    let compiler = Arc::clone(&state.compiler);
    let outcome = tokio::task::spawn_blocking(move || {
        resolver
            .resolve(&identifier, category)
            .map(|raw| compiler.compile(&raw, category))
    })
    .await;

    match outcome {
        Ok(None) => not_found(&state),
        Ok(Some(Ok(content))) => match state.templates.render_article(&state.config, &content) {
            Ok(html) => Html(html).into_response(),
            Err(e) => internal_error(e),
        },
        Ok(Some(Err(e))) => {
            tracing::error!("compilation failed for {:?} {}: {}", category, path, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("compilation failed: {}", e),
            )
                .into_response()
        }
        Err(e) => internal_error(e.into()),
    }
}

fn not_found(state: &ServerState) -> Response {
    match state.templates.render_not_found(&state.config) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::error!("request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}
