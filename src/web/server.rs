//! HTTP server implementation.
//!
//! axum-based server for the task list UI: every page handler loads the
//! collection from the store, applies at most one mutation, and responds with
//! rendered HTML or a redirect back to the list.

use axum::{
    Router,
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Json, Redirect},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::templates;
use crate::config::ServerConfig;
use crate::error::AppResult;
use crate::store::TaskStore;
use crate::types::Task;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct WebServer {
    /// Reference to the task store.
    store: Arc<TaskStore>,
    /// Port the server is listening on.
    port: u16,
}

impl WebServer {
    /// Create a new server instance.
    pub fn new(store: Arc<TaskStore>, port: u16) -> Self {
        Self { store, port }
    }

    /// Get the store reference.
    pub fn store(&self) -> &Arc<TaskStore> {
        &self.store
    }

    /// Get the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Root endpoint - renders the full task list page.
async fn index(State(state): State<WebServer>) -> Html<String> {
    let tasks = state.store().load().await;
    Html(render_index(&tasks))
}

/// Form data for the add endpoint.
#[derive(Debug, serde::Deserialize)]
struct AddForm {
    task: String,
}

/// Append a new task and bounce back to the list.
async fn add_task(State(state): State<WebServer>, Form(form): Form<AddForm>) -> Redirect {
    state.store().add(form.task).await;
    Redirect::to("/")
}

/// Mark the addressed task as completed.
async fn complete_task(
    State(state): State<WebServer>,
    Path(task_index): Path<usize>,
) -> AppResult<Redirect> {
    state.store().complete(task_index).await?;
    Ok(Redirect::to("/"))
}

/// Remove the addressed task.
async fn delete_task(
    State(state): State<WebServer>,
    Path(task_index): Path<usize>,
) -> AppResult<Redirect> {
    state.store().remove(task_index).await?;
    Ok(Redirect::to("/"))
}

/// Render the edit form prefilled with the current description.
async fn edit_task(
    State(state): State<WebServer>,
    Path(task_index): Path<usize>,
) -> AppResult<Html<String>> {
    let task = state.store().get(task_index).await?;
    Ok(Html(render_edit(task_index, &task)))
}

/// Form data for the update endpoint.
#[derive(Debug, serde::Deserialize)]
struct UpdateForm {
    updated_task: String,
}

/// Replace the addressed task's description.
async fn update_task(
    State(state): State<WebServer>,
    Path(task_index): Path<usize>,
    Form(form): Form<UpdateForm>,
) -> AppResult<Redirect> {
    state.store().update(task_index, form.updated_task).await?;
    Ok(Redirect::to("/"))
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Render the task list page.
fn render_index(tasks: &[Task]) -> String {
    templates::INDEX_TEMPLATE.replace("{{tasks}}", &render_task_list(tasks))
}

/// Render the task list fragment: one row per task with its action controls.
fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return r#"<div class="empty-state">No tasks yet. Add one above.</div>"#.to_string();
    }

    let mut html = String::from(r#"<ul class="task-list">"#);
    for (index, task) in tasks.iter().enumerate() {
        let row_class = if task.completed {
            "task completed"
        } else {
            "task"
        };
        // Completed tasks keep edit/delete but lose the Done button.
        let complete_form = if task.completed {
            String::new()
        } else {
            format!(
                r#"<form action="/complete/{index}" method="post"><button type="submit" class="btn btn-sm">Done</button></form>"#
            )
        };
        html.push_str(&format!(
            r#"<li class="{row_class}">
                <span class="task-description">{description}</span>
                <span class="task-actions">
                    {complete_form}
                    <a class="btn btn-sm" href="/edit/{index}">Edit</a>
                    <form action="/delete/{index}" method="post"><button type="submit" class="btn btn-sm btn-danger">Delete</button></form>
                </span>
            </li>"#,
            row_class = row_class,
            description = html_escape(&task.description),
            complete_form = complete_form,
            index = index,
        ));
    }
    html.push_str("</ul>");
    html
}

/// Render the edit form page for the task at `index`.
fn render_edit(index: usize, task: &Task) -> String {
    templates::EDIT_TEMPLATE
        .replace("{{index}}", &index.to_string())
        .replace("{{description}}", &html_escape(&task.description))
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Build the router with all routes.
fn build_router(state: WebServer, static_dir: &std::path::Path) -> Router {
    // Permissive CORS, same as the dashboard this UI is modeled on.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page routes
        .route("/", get(index))
        .route("/add", post(add_task))
        .route("/complete/{task_index}", post(complete_task))
        .route("/delete/{task_index}", post(delete_task))
        .route("/edit/{task_index}", get(edit_task))
        .route("/update/{task_index}", post(update_task))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        // API routes
        .route("/api/health", get(health))
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle for managing the server lifecycle.
pub struct WebHandle {
    /// Channel to signal shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Address the server is bound to.
    addr: SocketAddr,
    /// The serve task, awaited during shutdown.
    task: JoinHandle<()>,
}

impl WebHandle {
    /// The actual bound address (useful when the configured port is 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

/// Start the HTTP server on the configured port.
///
/// Binds immediately and serves in a background task; returns a handle
/// carrying the bound address and a graceful-shutdown trigger.
pub async fn start_server(store: Arc<TaskStore>, config: &ServerConfig) -> anyhow::Result<WebHandle> {
    let state = WebServer::new(store, config.port);
    let app = build_router(state, &config.static_dir);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Task list server listening on http://{}", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Server shutting down");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(WebHandle {
        shutdown_tx: Some(shutdown_tx),
        addr: bound_addr,
        task,
    })
}
