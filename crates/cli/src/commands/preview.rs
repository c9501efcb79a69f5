use super::{STATIC_DIR, load_site, resolve_variant};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use blog_kit_core::ArticleVariant;
use blog_kit_generator::{components::MANIFEST_PATH, manifest::manifest_json, render_page};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{net::SocketAddr, path::PathBuf};
use tokio::sync::broadcast::{self, error::RecvError};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

const RELOAD_SCRIPT: &str = r#"<script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => location.reload();
        eventSource.onerror = () => eventSource.close();
    </script>"#;

#[derive(Clone)]
struct AppState {
    site_path: PathBuf,
    variant_override: Option<ArticleVariant>,
    reload_tx: broadcast::Sender<()>,
}

/// Start preview server with hot reload for local development.
///
/// Pages are rendered from site.toml and content/ on every request, static
/// files are served from static/, and any change under the site directory
/// triggers a browser reload.
pub async fn run(
    path: PathBuf,
    port: u16,
    variant_override: Option<ArticleVariant>,
) -> Result<()> {
    println!("📝 Starting preview server...");
    println!("   Site: {}", path.display());

    let (site, pages) = load_site(&path)?;
    println!("   ✓ Loaded: {}", site.config.info.title);
    println!("   ✓ Pages: {}", pages.len());

    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        site_path: path.clone(),
        variant_override,
        reload_tx: reload_tx.clone(),
    };

    let app = router(state);

    let watcher_path = path.clone();
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, watcher_tx).await {
            tracing::error!("File watcher error: {}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.site_path.join(STATIC_DIR));

    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/{slug}/", get(page_handler))
        .route("/{slug}/index.html", get(page_handler))
        .route(&format!("/{}", MANIFEST_PATH), get(manifest_handler))
        .route("/_reload", get(sse_handler))
        .fallback_service(static_files)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Forward file system events to connected browsers
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;
    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        if is_site_change(&event) {
            tracing::info!(paths = ?event.paths, "site changed, reloading");
            // No subscribers is fine: nobody has the page open yet
            let _ = reload_tx.send(());
        }
    }

    Ok(())
}

/// Content edits count, access events and editor scratch files do not
fn is_site_change(event: &NotifyEvent) -> bool {
    let edits = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    edits
        && event.paths.iter().any(|p| {
            let name = p.file_name().unwrap_or_default().to_string_lossy();
            !name.starts_with('.') && !name.ends_with('~') && !name.ends_with(".swp")
        })
}

/// One `reload` event per broadcast; ends when the sender side is gone
fn reload_events(
    mut rx: broadcast::Receiver<()>,
) -> impl futures::Stream<Item = Result<Event, std::convert::Infallible>> {
    async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) => {
                    yield Ok(Event::default().data("reload"));
                }
                // Missed reloads collapse into the next one
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    }
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    Sse::new(reload_events(state.reload_tx.subscribe())).keep_alive(KeepAlive::default())
}

async fn index_handler(State(state): State<AppState>) -> Response {
    render(&state, "index")
}

async fn page_handler(State(state): State<AppState>, UrlPath(slug): UrlPath<String>) -> Response {
    render(&state, &slug)
}

async fn manifest_handler(State(state): State<AppState>) -> Response {
    let result = load_site(&state.site_path)
        .and_then(|(site, _)| manifest_json(&site.config).map_err(anyhow::Error::from));

    match result {
        Ok(json) => ([(header::CONTENT_TYPE, "application/manifest+json")], json).into_response(),
        Err(e) => error_page(&e),
    }
}

/// Render one page fresh from disk, with the reload script injected
fn render(state: &AppState, slug: &str) -> Response {
    let (mut site, pages) = match load_site(&state.site_path) {
        Ok(loaded) => loaded,
        Err(e) => return error_page(&e),
    };
    // Everything is served from `/` locally, so links must not carry the prefix
    site.config.info.path_prefix = None;

    let Some(page) = pages.iter().find(|p| p.slug == slug) else {
        return (
            StatusCode::NOT_FOUND,
            Html(format!("<h1>404</h1><p>No page named '{}'</p>", slug)),
        )
            .into_response();
    };

    let variant = resolve_variant(&site, state.variant_override);
    let html = inject_before_body_end(
        &render_page(&site, page, variant),
        &format!(
            r#"<div class="preview-badge">PREVIEW - Live Reload Active</div>{}"#,
            RELOAD_SCRIPT
        ),
    );

    Html(html).into_response()
}

/// Insert `snippet` before the document's closing body tag. Content
/// fragments may contain `</body>` themselves, so only the last one counts.
fn inject_before_body_end(html: &str, snippet: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => format!("{}{}{}", &html[..at], snippet, &html[at..]),
        None => format!("{}{}", html, snippet),
    }
}

fn error_page(err: &anyhow::Error) -> Response {
    tracing::warn!("preview render failed: {:#}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!(
            r#"<!DOCTYPE html>
<html>
<head><title>Error</title></head>
<body>
    <h1>Error loading site</h1>
    <pre>{:#}</pre>
    {}
</body>
</html>"#,
            err, RELOAD_SCRIPT
        )),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use std::fs;
    use tower::ServiceExt;

    async fn app(dir: &std::path::Path, variant: Option<ArticleVariant>) -> Router {
        let site = dir.join("site");
        init::run(site.clone(), None, None).await.unwrap();
        fs::write(site.join(STATIC_DIR).join("robots.txt"), "User-agent: *").unwrap();

        let (reload_tx, _) = broadcast::channel(1);
        router(AppState {
            site_path: site,
            variant_override: variant,
            reload_tx,
        })
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_has_reload_script() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_body(app(dir.path(), None).await, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Welcome</h1>"));
        assert!(body.contains("/_reload"));
    }

    #[tokio::test]
    async fn test_variant_override_applies() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), Some(ArticleVariant::WithAd)).await;
        let (_, body) = get_body(app, "/index.html").await;
        assert!(body.contains(r#"id="codefund""#));
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = get_body(app(dir.path(), None).await, "/missing/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), None).await;

        let (status, body) = get_body(app.clone(), "/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User-agent: *");

        let (status, body) = get_body(app, "/manifest.webmanifest").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"short_name\": \"My Blog\""));
    }

    #[tokio::test]
    async fn test_path_prefix_dropped_in_preview() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), None).await;
        let site_toml = dir.path().join("site").join(crate::commands::SITE_TOML);
        let config = fs::read_to_string(&site_toml).unwrap();
        fs::write(
            &site_toml,
            config.replacen("language = \"en\"", "language = \"en\"\npath_prefix = \"/blog\"", 1),
        )
        .unwrap();

        let (status, body) = get_body(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"href="/manifest.webmanifest""#));
        assert!(body.contains(r#"src="/images/jpg/avatar.jpg""#));
        assert!(!body.contains("/blog/"));

        let (status, _) = get_body(app, "/manifest.webmanifest").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_inject_before_last_body_end() {
        let html = "<body><pre>&lt;/body&gt;</pre><p></body></p></body></html>";
        let injected = inject_before_body_end(html, "<script></script>");

        assert_eq!(injected.matches("<script></script>").count(), 1);
        assert!(injected.ends_with("<script></script></body></html>"));
        assert_eq!(inject_before_body_end("<p>x</p>", "!"), "<p>x</p>!");
    }

    #[tokio::test]
    async fn test_reload_events_end_when_sender_dropped() {
        use futures::StreamExt;

        let (tx, rx) = broadcast::channel(4);
        tx.send(()).unwrap();
        tx.send(()).unwrap();
        drop(tx);

        let events: Vec<_> = reload_events(rx).collect().await;
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_is_site_change() {
        use notify::event::{AccessKind, ModifyKind};

        let edit = NotifyEvent::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("site/content/about.html"));
        assert!(is_site_change(&edit));

        let swap = NotifyEvent::new(EventKind::Create(notify::event::CreateKind::File))
            .add_path(PathBuf::from("site/content/.about.html.swp"));
        assert!(!is_site_change(&swap));

        let read = NotifyEvent::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("site/site.toml"));
        assert!(!is_site_change(&read));
    }
}
