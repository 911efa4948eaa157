//! # HTTP API
//!
//! Builds the axum router that exposes the ledger's operation surface.
//!
//! Queries are plain GET endpoints. Every mutation goes through
//! `POST /v1/call`, whose body names the caller identity and the
//! operation -- the node performs no authentication itself, it trusts the
//! front-end that forwarded the request. Malformed identities never reach
//! the ledger: they are rejected here as invalid arguments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fluwix_ledger::error::TokenError;
use fluwix_ledger::events::EventRecord;
use fluwix_ledger::identity::Address;
use fluwix_ledger::service::{Request as LedgerRequest, Response as LedgerResponse, TokenService};

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Handle on the ledger.
    pub service: TokenService,
    /// Binary version string.
    pub version: String,
    /// When this node process started.
    pub started_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/v1/supply", get(supply_handler))
        .route("/v1/balance/:address", get(balance_handler))
        .route("/v1/allowance/:owner/:spender", get(allowance_handler))
        .route("/v1/whitelist/:address", get(whitelist_handler))
        .route("/v1/restriction/:address", get(restriction_handler))
        .route("/v1/events", get(events_handler))
        .route("/v1/call", post(call_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Error Mapping
// ---------------------------------------------------------------------------

/// A ledger or decode error rendered as an HTTP response.
struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_argument",
            message: message.into(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        let status = match &err {
            TokenError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            TokenError::InvalidArgument(_) | TokenError::NonWhitelisted { .. } => {
                StatusCode::BAD_REQUEST
            }
            TokenError::InvalidState { .. } => StatusCode::CONFLICT,
            TokenError::InsufficientBalance { .. }
            | TokenError::InsufficientAllowance { .. }
            | TokenError::Overflow { .. }
            | TokenError::Underflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.kind,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

fn parse_address(label: &str, raw: &str) -> Result<Address, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::invalid_argument(format!("{label}: {e}")))
}

// ---------------------------------------------------------------------------
// Query Endpoints
// ---------------------------------------------------------------------------

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Node and token status summary.
#[derive(Debug, Serialize)]
struct StatusResponse {
    version: String,
    token_name: String,
    token_symbol: String,
    decimals: u8,
    owner: Address,
    pause_state: String,
    total_supply: u128,
    event_count: usize,
    started_at: String,
    timestamp: String,
}

async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let response = state.service.with_ledger(|lg| StatusResponse {
        version: state.version.clone(),
        token_name: lg.info().name.clone(),
        token_symbol: lg.info().symbol.clone(),
        decimals: lg.info().decimals,
        owner: lg.owner(),
        pause_state: lg.pause_state().to_string(),
        total_supply: lg.total_supply(),
        event_count: lg.events().len(),
        started_at: state.started_at.to_rfc3339(),
        timestamp: Utc::now().to_rfc3339(),
    });
    Json(response)
}

#[derive(Debug, Serialize)]
struct SupplyResponse {
    total_supply: u128,
}

async fn supply_handler(State(state): State<AppState>) -> Json<SupplyResponse> {
    Json(SupplyResponse {
        total_supply: state.service.with_ledger(|lg| lg.total_supply()),
    })
}

#[derive(Debug, Serialize)]
struct BalanceResponse {
    address: Address,
    balance: u128,
}

async fn balance_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let address = parse_address("address", &address)?;
    Ok(Json(BalanceResponse {
        address,
        balance: state.service.with_ledger(|lg| lg.balance_of(address)),
    }))
}

#[derive(Debug, Serialize)]
struct AllowanceResponse {
    owner: Address,
    spender: Address,
    allowance: u128,
}

async fn allowance_handler(
    State(state): State<AppState>,
    Path((owner, spender)): Path<(String, String)>,
) -> Result<Json<AllowanceResponse>, ApiError> {
    let owner = parse_address("owner", &owner)?;
    let spender = parse_address("spender", &spender)?;
    Ok(Json(AllowanceResponse {
        owner,
        spender,
        allowance: state.service.with_ledger(|lg| lg.allowance(owner, spender)),
    }))
}

#[derive(Debug, Serialize)]
struct WhitelistResponse {
    address: Address,
    whitelisted: bool,
}

async fn whitelist_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<WhitelistResponse>, ApiError> {
    let address = parse_address("address", &address)?;
    Ok(Json(WhitelistResponse {
        address,
        whitelisted: state.service.with_ledger(|lg| lg.is_whitelist(address)),
    }))
}

#[derive(Debug, Serialize)]
struct RestrictionResponse {
    address: Address,
    code: fluwix_ledger::restriction::RestrictionCode,
    message: &'static str,
}

async fn restriction_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<RestrictionResponse>, ApiError> {
    let address = parse_address("address", &address)?;
    let code = state
        .service
        .with_ledger(|lg| lg.validate_transfer_restricted(address));
    Ok(Json(RestrictionResponse {
        address,
        code,
        message: code.message(),
    }))
}

/// Cursor for the event feed. `since` is the first sequence number the
/// caller has not yet seen.
#[derive(Debug, Deserialize)]
struct EventsQuery {
    #[serde(default)]
    since: u64,
}

async fn events_handler(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<EventRecord>> {
    Json(state.service.events_since(query.since))
}

// ---------------------------------------------------------------------------
// Operation Dispatch
// ---------------------------------------------------------------------------

/// Body of `POST /v1/call`.
///
/// `caller` is the already-authenticated identity the operation executes
/// as; `request` is the operation itself, tagged by its `op` field. Both
/// are decoded here so that any malformed identity or unknown operation
/// surfaces as an invalid-argument error rather than a bare 422.
#[derive(Debug, Deserialize)]
struct CallBody {
    caller: String,
    request: serde_json::Value,
}

async fn call_handler(
    State(state): State<AppState>,
    Json(body): Json<CallBody>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let caller = parse_address("caller", &body.caller)?;
    let request: LedgerRequest = serde_json::from_value(body.request)
        .map_err(|e| ApiError::invalid_argument(format!("request: {e}")))?;

    let response = state.service.handle(caller, request)?;
    Ok(Json(response))
}
