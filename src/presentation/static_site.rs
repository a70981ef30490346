// Static web app serving - entry page injection, directory listing, ServeDir fallthrough
use crate::domain::web_env::inject_env;
use crate::infrastructure::http_response::html_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;

const ENTRY_FILE: &str = "index.html";

/// Fallback handler for every path the dashboard API does not claim
pub async fn serve_static_site(State(state): State<Arc<AppState>>, req: Request) -> Response {
    let path = req.uri().path();

    if path == "/" || path == "/index.html" {
        if let Some(response) = render_entry_page(&state).await {
            return response;
        }
    }

    if let Some(response) = render_directory_listing(&state.app_dir, path).await {
        return response;
    }

    match ServeDir::new(&state.app_dir).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// The entry page with the environment substituted in; `None` if it cannot be read
async fn render_entry_page(state: &AppState) -> Option<Response> {
    let entry = state.app_dir.join(ENTRY_FILE);
    match tokio::fs::read_to_string(&entry).await {
        Ok(html) => Some(html_response(inject_env(&html, &state.web_env))),
        Err(e) => {
            tracing::warn!("Could not read entry page {}: {}", entry.display(), e);
            None
        }
    }
}

/// Listing for a directory request (trailing slash) whose directory has no index page
async fn render_directory_listing(app_dir: &Path, request_path: &str) -> Option<Response> {
    if !request_path.ends_with('/') {
        return None;
    }
    let dir = resolve_asset_path(app_dir, request_path)?;
    let is_dir = tokio::fs::metadata(&dir).await.is_ok_and(|m| m.is_dir());
    let has_entry = tokio::fs::metadata(dir.join(ENTRY_FILE))
        .await
        .is_ok_and(|m| m.is_file());
    if !is_dir || has_entry {
        return None;
    }

    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Could not list {}: {}", dir.display(), e);
            return None;
        }
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    Some(html_response(listing_html(&names)))
}

/// Map a URL path onto the asset directory, refusing anything that climbs out of it
fn resolve_asset_path(app_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let mut resolved = app_dir.to_path_buf();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

fn listing_html(names: &[String]) -> String {
    let mut html = String::from("<pre>\n");
    for name in names {
        let href = match name.strip_suffix('/') {
            Some(dir) => format!("{}/", urlencoding::encode(dir)),
            None => urlencoding::encode(name).into_owned(),
        };
        html.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            href,
            escape_html(name)
        ));
    }
    html.push_str("</pre>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
