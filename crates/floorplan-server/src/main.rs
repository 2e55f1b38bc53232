//! Floor-plan design storage server
//!
//! Stores designs as JSON files and serves them back to editors.
//!
//! ## Endpoints
//!
//! ```text
//! POST /api/designs       { "fileName"?: "...", ...design }  -> { "success": true, "fileName": "..." }
//! GET  /api/files                                            -> [ "design_....json", ... ]
//! POST /api/designs/load  { "fileName": "..." }              -> { "success": true, "design": {...} }
//! GET  /health                                               -> "ok"
//! ```
//!
//! Failures answer `{ "success": false, "error": "..." }` with a matching status.
//!
//! Configured through `FLOORPLAN_ADDR` (default `0.0.0.0:5000`) and
//! `FLOORPLAN_DATA_DIR` (default: the user data directory).

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use floorplan_core::storage::FileStorage;
use floorplan_core::{DesignDocument, Storage, StorageError};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// Shared application state
struct AppState {
    storage: FileStorage,
}

/// Body of a save request: the design plus an optional target file name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest {
    #[serde(default, alias = "file_name")]
    file_name: Option<String>,
    #[serde(flatten)]
    design: DesignDocument,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadRequest {
    #[serde(alias = "file_name")]
    file_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveResponse {
    success: bool,
    file_name: String,
}

#[derive(Debug, Serialize)]
struct LoadResponse {
    success: bool,
    design: DesignDocument,
}

/// Error answered as `{ success: false, error }`.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let status = match err {
            StorageError::NotFound(_) => StatusCode::NOT_FOUND,
            StorageError::Serialization(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StorageError::Io(_) | StorageError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn data_dir() -> Result<PathBuf, StorageError> {
    match std::env::var_os("FLOORPLAN_DATA_DIR") {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => FileStorage::default_path(),
    }
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/designs", post(save_design))
        .route("/api/designs/load", post(load_design))
        .route("/api/files", get(list_files))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floorplan_server=info,tower_http=info".into()),
        )
        .init();

    let storage = match data_dir().and_then(FileStorage::new) {
        Ok(storage) => storage,
        Err(e) => {
            error!("Cannot open design directory: {}", e);
            std::process::exit(1);
        }
    };
    info!("Storing designs in {}", storage.base_path().display());

    let addr_var = std::env::var("FLOORPLAN_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = match addr_var.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid FLOORPLAN_ADDR {:?}: {}", addr_var, e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Floor-plan server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app(Arc::new(AppState { storage }))).await {
        error!("Server error: {}", e);
    }
}

/// Index page
async fn index() -> &'static str {
    "Floor-plan design server - see /api/files"
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Save a design, under its requested name or a generated one.
async fn save_design(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    let SaveRequest {
        file_name,
        mut design,
    } = request;
    let dropped = design.constrain_to_grid();
    if !dropped.is_empty() {
        warn!("Dropped {} elements outside the grid before saving", dropped.len());
    }
    let overlaps = design.layer_overlaps();
    if !overlaps.is_empty() {
        warn!("Saving design with {} cells claimed by both layers", overlaps.len());
    }

    let file_name = match file_name {
        Some(name) => {
            let file_name = FileStorage::normalize_file_name(&name);
            state.storage.save_as(&file_name, &design).await?;
            file_name
        }
        None => state.storage.save(&design).await?,
    };
    info!("Saved {} ({} elements)", file_name, design.len());

    Ok(Json(SaveResponse {
        success: true,
        file_name,
    }))
}

/// List saved design file names.
async fn list_files(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let files = state.storage.list().await?;
    Ok(Json(files))
}

/// Load a design by file name.
async fn load_design(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<LoadResponse>, ApiError> {
    let design = state.storage.load(&request.file_name).await.inspect_err(|e| {
        warn!("Load of {} failed: {}", request.file_name, e);
    })?;
    Ok(Json(LoadResponse {
        success: true,
        design,
    }))
}
