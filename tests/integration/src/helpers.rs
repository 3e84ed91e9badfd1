//! Test helpers for integration tests
//!
//! Provides an in-process reactions API speaking the same REST contract as
//! the production backend, plus builders for service contexts over each
//! store backend.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cheer_core::{DomainError, NewReaction, ReactionStore, SubjectId, VoterId};
use cheer_service::ServiceContext;
use cheer_store::models::{ReactionRequest, StoredReaction};
use cheer_store::{DeviceIdentity, HttpReactionStore, LocalReactionStore, MemoryStorage};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Shared state of the test backend
#[derive(Clone)]
struct BackendState {
    store: Arc<LocalReactionStore>,
    delay_ms: Arc<AtomicU64>,
    forced_status: Arc<Mutex<Option<StatusCode>>>,
}

impl BackendState {
    /// Apply injected latency and failures; `Some` short-circuits the request
    async fn intercept(&self) -> Option<Response> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let forced = *self.forced_status.lock();
        forced.map(|status| (status, Json(json!({ "code": "INJECTED" }))).into_response())
    }
}

/// Domain error rendered the way the reactions API renders it
struct BackendError(DomainError);

impl From<DomainError> for BackendError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = if self.0.is_conflict() {
            StatusCode::CONFLICT
        } else if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = json!({ "code": self.0.code(), "message": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteQuery {
    device_id: String,
}

async fn list_reactions(
    State(state): State<BackendState>,
    Path(subject): Path<String>,
) -> BackendResult<Response> {
    if let Some(response) = state.intercept().await {
        return Ok(response);
    }
    let subject = SubjectId::parse(subject).map_err(DomainError::from)?;
    let records: Vec<StoredReaction> = state
        .store
        .list(&subject)
        .await?
        .iter()
        .map(StoredReaction::from)
        .collect();
    Ok(Json(records).into_response())
}

async fn add_reaction(
    State(state): State<BackendState>,
    Json(body): Json<ReactionRequest>,
) -> BackendResult<Response> {
    if let Some(response) = state.intercept().await {
        return Ok(response);
    }
    let subject = SubjectId::parse(body.employee_id).map_err(DomainError::from)?;
    let voter = VoterId::parse(body.device_id).map_err(DomainError::from)?;
    let created = state
        .store
        .insert(NewReaction::new(subject, voter, body.reaction_type))
        .await?;
    Ok((StatusCode::CREATED, Json(StoredReaction::from(&created))).into_response())
}

async fn update_reaction(
    State(state): State<BackendState>,
    Path(subject): Path<String>,
    Json(body): Json<ReactionRequest>,
) -> BackendResult<Response> {
    if let Some(response) = state.intercept().await {
        return Ok(response);
    }
    let subject = SubjectId::parse(subject).map_err(DomainError::from)?;
    let voter = VoterId::parse(body.device_id).map_err(DomainError::from)?;
    let updated = state
        .store
        .replace(&subject, &voter, body.reaction_type)
        .await?;
    Ok(Json(StoredReaction::from(&updated)).into_response())
}

async fn remove_reaction(
    State(state): State<BackendState>,
    Path(subject): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> BackendResult<Response> {
    if let Some(response) = state.intercept().await {
        return Ok(response);
    }
    let subject = SubjectId::parse(subject).map_err(DomainError::from)?;
    let voter = VoterId::parse(query.device_id).map_err(DomainError::from)?;
    state.store.delete(&subject, &voter).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// In-process reactions API on an ephemeral port
pub struct TestBackend {
    pub addr: SocketAddr,
    state: BackendState,
    _handle: JoinHandle<()>,
}

impl TestBackend {
    /// Start a new backend with an empty in-memory store
    pub async fn start() -> Result<Self> {
        let store = LocalReactionStore::open(Arc::new(MemoryStorage::new()))?;
        let state = BackendState {
            store: Arc::new(store),
            delay_ms: Arc::new(AtomicU64::new(0)),
            forced_status: Arc::new(Mutex::new(None)),
        };

        let app = Router::new()
            .route("/api/reactions", post(add_reaction))
            .route(
                "/api/reactions/:subject",
                get(list_reactions)
                    .put(update_reaction)
                    .delete(remove_reaction),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Base URL of the API, as configured in `CHEER_API_URL`
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Store backing the API, for writes made by "another client"
    pub fn store(&self) -> &LocalReactionStore {
        &self.state.store
    }

    /// Delay every response by `delay`
    pub fn set_delay(&self, delay: Duration) {
        self.state
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Answer every request with `status` until cleared with `None`
    pub fn force_status(&self, status: Option<StatusCode>) {
        *self.state.forced_status.lock() = status;
    }

    /// HTTP store pointed at this backend
    pub fn http_store(&self, timeout: Duration) -> Result<HttpReactionStore> {
        Ok(HttpReactionStore::new(&self.api_url(), timeout)?)
    }

    /// Service context whose store is this backend
    pub fn context(&self) -> Result<ServiceContext> {
        let store = self.http_store(Duration::from_secs(5))?;
        Ok(context_with(Arc::new(store)))
    }
}

/// Service context over an in-memory local store
pub fn local_context() -> Result<ServiceContext> {
    let store = LocalReactionStore::open(Arc::new(MemoryStorage::new()))?;
    Ok(context_with(Arc::new(store)))
}

/// Service context over `store` with a fresh in-memory device identity
pub fn context_with(store: Arc<dyn ReactionStore>) -> ServiceContext {
    let identity = DeviceIdentity::new(Arc::new(MemoryStorage::new()));
    ServiceContext::new(store, Arc::new(identity))
}
