// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod directory;
mod live;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use planboard::{
    Directory, DirectoryFetch, ProjectPanels, Session, TimelineView, UserAssignments, UserPanels,
    fetch_directory,
};
use planboard_api::{
    ApiError, AssignmentDatesRequest, CancelPendingResponse, ClearResponse, CommitResponse,
    DropRequest, DropResponse, ImportResponse, PendingAssignmentInfo, ReapResponse,
    RefreshResponse, SearchQuery, StatsResponse, TimelineQuery,
};
use planboard_domain::{Project, Tz, local_today, parse_timezone};
use planboard_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::directory::{FileDirectory, HttpDirectory, StaticDirectory};
use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Planboard Server - HTTP server for the resource planning dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Key the snapshot is stored under
    #[arg(long)]
    snapshot_key: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Base URL of the tracker proxy (e.g. `http://localhost:3001/api`)
    #[arg(long, conflicts_with = "directory_file")]
    directory_url: Option<String>,

    /// JSON file holding users, projects and epics
    #[arg(long)]
    directory_file: Option<PathBuf>,

    /// IANA timezone that decides what "today" is
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// Seconds between expiry sweeps
    #[arg(long, default_value_t = 60)]
    reap_interval_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The planning session; every read and write goes through this lock.
    session: Arc<Mutex<Session<Persistence>>>,
    /// Source of users, projects and epics.
    directory: Arc<dyn Directory>,
    /// Live event fan-out.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// Timezone "today" is evaluated in.
    timezone: Tz,
    /// Wall clock.
    clock: fn() -> DateTime<Utc>,
}

impl AppState {
    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn today(&self) -> NaiveDate {
        local_today(self.now(), self.timezone)
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn announce_commit(app_state: &AppState, response: &CommitResponse) {
    if let Some(warning) = &response.persist_warning {
        warn!(%warning, "Committed change was not saved");
    }
    if let Some(event) = LiveEvent::from_change(&response.change) {
        app_state.broadcaster.broadcast(&event);
    }
}

/// Sweeps expired assignments and announces what was removed.
///
/// Sweep failures are logged; they never fail the surrounding request.
fn sweep_expired(app_state: &AppState, session: &mut Session<Persistence>) {
    match planboard_api::reap_expired(session, app_state.today(), app_state.now()) {
        Ok(response) if !response.removed.is_empty() => {
            info!(count = response.removed.len(), "Swept expired assignments");
            app_state.broadcaster.broadcast(&LiveEvent::AssignmentsReaped {
                count: response.removed.len(),
            });
        }
        Ok(_) => {}
        Err(err) => error!(error = %err, "Expiry sweep failed"),
    }
}

/// Fetches directory data outside the session lock and applies it.
async fn refresh_directory(app_state: &AppState) -> RefreshResponse {
    let known_projects: Vec<Project> = app_state.session.lock().await.projects().to_vec();
    let fetch: DirectoryFetch = fetch_directory(app_state.directory.as_ref(), &known_projects).await;

    let response: RefreshResponse = {
        let mut session = app_state.session.lock().await;
        planboard_api::apply_refresh(&mut session, fetch)
    };
    app_state
        .broadcaster
        .broadcast(&LiveEvent::DirectoryRefreshed {
            users: response.user_count,
            projects: response.project_count,
            notices: response.notices.len(),
        });
    response
}

/// Handler for GET `/api/users`.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<UserPanels> {
    let mut session = app_state.session.lock().await;
    sweep_expired(&app_state, &mut session);
    Json(planboard_api::list_users(&session, &query, app_state.today()))
}

/// Handler for GET `/api/users/{user_id}/assignments`.
async fn handle_user_assignments(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserAssignments>, HttpError> {
    let session = app_state.session.lock().await;
    let response: UserAssignments =
        planboard_api::get_user_assignments(&session, &user_id, app_state.today())?;
    Ok(Json(response))
}

/// Handler for GET `/api/projects`.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<ProjectPanels> {
    let mut session = app_state.session.lock().await;
    sweep_expired(&app_state, &mut session);
    Json(planboard_api::list_projects(&session, &query))
}

/// Handler for GET `/api/projects/{project_id}/timeline`.
async fn handle_project_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<TimelineView>, HttpError> {
    let session = app_state.session.lock().await;
    let view: TimelineView =
        planboard_api::get_project_timeline(&session, &project_id, &query, app_state.today())?;
    Ok(Json(view))
}

/// Handler for POST `/api/drop`.
async fn handle_drop(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<DropRequest>,
) -> Json<DropResponse> {
    let mut session = app_state.session.lock().await;
    Json(planboard_api::drop_user(&mut session, request))
}

/// Handler for GET `/api/pending`.
async fn handle_get_pending(
    AxumState(app_state): AxumState<AppState>,
) -> Json<Option<PendingAssignmentInfo>> {
    let session = app_state.session.lock().await;
    Json(planboard_api::get_pending(&session))
}

/// Handler for POST `/api/pending/confirm`.
async fn handle_confirm_pending(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<AssignmentDatesRequest>,
) -> Result<Json<CommitResponse>, HttpError> {
    let response: CommitResponse = {
        let mut session = app_state.session.lock().await;
        planboard_api::confirm_pending(&mut session, &request, app_state.now())?
    };
    announce_commit(&app_state, &response);
    Ok(Json(response))
}

/// Handler for POST `/api/pending/cancel`.
async fn handle_cancel_pending(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CancelPendingResponse>, HttpError> {
    let mut session = app_state.session.lock().await;
    Ok(Json(planboard_api::cancel_pending(&mut session)?))
}

/// Handler for PUT `/api/projects/{project_id}/assignments/{user_id}`.
async fn handle_assign(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, user_id)): Path<(String, String)>,
    Json(request): Json<AssignmentDatesRequest>,
) -> Result<Json<CommitResponse>, HttpError> {
    let response: CommitResponse = {
        let mut session = app_state.session.lock().await;
        planboard_api::assign_user(&mut session, &project_id, &user_id, &request, app_state.now())?
    };
    announce_commit(&app_state, &response);
    Ok(Json(response))
}

/// Handler for DELETE `/api/projects/{project_id}/assignments/{user_id}`.
async fn handle_remove_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path((project_id, user_id)): Path<(String, String)>,
) -> Result<Json<CommitResponse>, HttpError> {
    let response: CommitResponse = {
        let mut session = app_state.session.lock().await;
        planboard_api::remove_assignment(&mut session, &project_id, &user_id, app_state.now())?
    };
    announce_commit(&app_state, &response);
    Ok(Json(response))
}

/// Handler for POST `/api/reap`.
async fn handle_reap(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ReapResponse>, HttpError> {
    let response: ReapResponse = {
        let mut session = app_state.session.lock().await;
        planboard_api::reap_expired(&mut session, app_state.today(), app_state.now())?
    };
    if !response.removed.is_empty() {
        app_state.broadcaster.broadcast(&LiveEvent::AssignmentsReaped {
            count: response.removed.len(),
        });
    }
    Ok(Json(response))
}

/// Handler for POST `/api/refresh`.
async fn handle_refresh(AxumState(app_state): AxumState<AppState>) -> Json<RefreshResponse> {
    Json(refresh_directory(&app_state).await)
}

/// Handler for GET `/api/snapshot`.
async fn handle_export_snapshot(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Response, HttpError> {
    let mut session = app_state.session.lock().await;
    let body: String = planboard_api::export_snapshot(&mut session)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Handler for PUT `/api/snapshot`.
async fn handle_import_snapshot(
    AxumState(app_state): AxumState<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, HttpError> {
    let response: ImportResponse = {
        let mut session = app_state.session.lock().await;
        planboard_api::import_snapshot(&mut session, &body)?
    };
    app_state.broadcaster.broadcast(&LiveEvent::LedgerReloaded {
        assignments: response.imported.assignment_count,
    });
    Ok(Json(response))
}

/// Handler for DELETE `/api/snapshot`.
async fn handle_clear_snapshot(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ClearResponse>, HttpError> {
    let response: ClearResponse = {
        let mut session = app_state.session.lock().await;
        planboard_api::clear_snapshot(&mut session)?
    };
    app_state
        .broadcaster
        .broadcast(&LiveEvent::LedgerReloaded { assignments: 0 });
    Ok(Json(response))
}

/// Handler for GET `/api/stats`.
async fn handle_stats(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<StatsResponse>, HttpError> {
    let mut session = app_state.session.lock().await;
    Ok(Json(planboard_api::get_stats(&mut session)?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(handle_list_users))
        .route("/api/users/{user_id}/assignments", get(handle_user_assignments))
        .route("/api/projects", get(handle_list_projects))
        .route(
            "/api/projects/{project_id}/timeline",
            get(handle_project_timeline),
        )
        .route(
            "/api/projects/{project_id}/assignments/{user_id}",
            put(handle_assign).delete(handle_remove_assignment),
        )
        .route("/api/drop", post(handle_drop))
        .route("/api/pending", get(handle_get_pending))
        .route("/api/pending/confirm", post(handle_confirm_pending))
        .route("/api/pending/cancel", post(handle_cancel_pending))
        .route("/api/reap", post(handle_reap))
        .route("/api/refresh", post(handle_refresh))
        .route(
            "/api/snapshot",
            get(handle_export_snapshot)
                .put(handle_import_snapshot)
                .delete(handle_clear_snapshot),
        )
        .route("/api/stats", get(handle_stats))
        .route("/api/live", get(live_events_handler))
        .with_state(app_state)
}

/// Sweeps expired assignments on a fixed interval.
fn spawn_reaper(app_state: AppState, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker: tokio::time::Interval = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let mut session = app_state.session.lock().await;
            sweep_expired(&app_state, &mut session);
        }
    })
}

fn select_directory(args: &Args) -> Result<Arc<dyn Directory>, Box<dyn std::error::Error>> {
    if let Some(url) = &args.directory_url {
        info!("Using directory proxy at: {}", url);
        return Ok(Arc::new(HttpDirectory::new(url)?));
    }
    if let Some(path) = &args.directory_file {
        info!("Using directory file at: {}", path.display());
        return Ok(Arc::new(FileDirectory::new(path.clone())));
    }
    warn!("No directory configured; users and projects will be empty");
    Ok(Arc::new(StaticDirectory::default()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Planboard Server");

    let timezone: Tz = parse_timezone(&args.timezone)?;

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    if let Some(key) = &args.snapshot_key {
        persistence = persistence.with_snapshot_key(key);
    }

    // A snapshot that cannot be read aborts startup
    let session: Session<Persistence> = Session::open(persistence)?;

    let app_state: AppState = AppState {
        session: Arc::new(Mutex::new(session)),
        directory: select_directory(&args)?,
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
        timezone,
        clock: Utc::now,
    };

    let initial: RefreshResponse = refresh_directory(&app_state).await;
    info!(
        users = initial.user_count,
        projects = initial.project_count,
        notices = initial.notices.len(),
        "Loaded directory"
    );

    let _reaper = spawn_reaper(
        app_state.clone(),
        Duration::from_secs(args.reap_interval_secs.max(1)),
    );

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
