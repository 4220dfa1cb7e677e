use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::warn;

use forge_core::{resolve_conflicts, ChainSnapshot, Ledger, Transaction};

use crate::peers::{self, PeerRegistry};

#[derive(Clone)]
pub struct AppState {
    pub node_id: String,
    pub ledger: Arc<RwLock<Ledger>>,
    pub peers: Arc<RwLock<PeerRegistry>>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(node_id: String) -> Self {
        Self {
            node_id,
            ledger: Arc::new(RwLock::new(Ledger::new())),
            peers: Arc::new(RwLock::new(PeerRegistry::default())),
            http: reqwest::Client::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/mine", get(mine))
        .route("/transactions/new", post(new_transaction))
        .route("/chain", get(chain))
        .route("/nodes/register", post(register_nodes))
        .route("/nodes/resolve", get(resolve))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Serialize)]
struct MineResponse {
    message: &'static str,
    index: u64,
    transactions: Vec<Transaction>,
    proof: u64,
    previous_hash: String,
}

async fn mine(State(state): State<AppState>) -> Result<Json<MineResponse>, (StatusCode, String)> {
    let mut ledger = state.ledger.write().await;
    let block = ledger
        .mine(&state.node_id)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    Ok(Json(MineResponse {
        message: "New Block Forged",
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}

#[derive(Deserialize)]
struct TransactionRequest {
    sender: Option<String>,
    recipient: Option<String>,
    amount: Option<u64>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

async fn new_transaction(
    State(state): State<AppState>,
    Json(req): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, String)> {
    let (Some(sender), Some(recipient), Some(amount)) = (req.sender, req.recipient, req.amount)
    else {
        return Err((StatusCode::BAD_REQUEST, "Missing values".to_string()));
    };
    let index = state
        .ledger
        .write()
        .await
        .new_transaction(&sender, &recipient, amount);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Transaction will be added to Block {index}"),
        }),
    ))
}

async fn chain(State(state): State<AppState>) -> Json<ChainSnapshot> {
    let ledger = state.ledger.read().await;
    Json(ChainSnapshot {
        chain: ledger.chain().to_vec(),
        length: ledger.len() as u64,
    })
}

#[derive(Deserialize)]
struct RegisterRequest {
    nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
struct RegisterResponse {
    message: &'static str,
    total_nodes: Vec<String>,
}

async fn register_nodes(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, String)> {
    let Some(nodes) = req.nodes else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Error: please supply a valid list of nodes".to_string(),
        ));
    };
    let mut registry = state.peers.write().await;
    registry
        .register_all(&nodes)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "New nodes have been added",
            total_nodes: registry.list(),
        }),
    ))
}

/// Pull every registered peer's chain, skipping peers that fail, then let
/// conflict resolution pick the longest valid chain.
async fn resolve(State(state): State<AppState>) -> Json<serde_json::Value> {
    let authorities = state.peers.read().await.list();
    let mut snapshots = Vec::with_capacity(authorities.len());
    for authority in &authorities {
        match peers::fetch_chain(&state.http, authority).await {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(err) => warn!(peer = %authority, error = %err, "skipping peer"),
        }
    }

    let mut ledger = state.ledger.write().await;
    if resolve_conflicts(&mut ledger, snapshots) {
        Json(serde_json::json!({
            "message": "Our chain was replaced",
            "new_chain": ledger.chain(),
        }))
    } else {
        Json(serde_json::json!({
            "message": "Our chain is authoritative",
            "chain": ledger.chain(),
        }))
    }
}
