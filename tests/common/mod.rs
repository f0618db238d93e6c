//! Shared utilities for integration testing.
//!
//! `MockPlatform` is an in-process stand-in for the remote ledger platform:
//! it speaks the same query/variables envelope, assigns request ids to
//! mutations, and replays scripted GetTransaction observations so tests can
//! drive the full submit/poll lifecycle without a network.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Scripted GetTransaction payload: still pending.
pub fn pending() -> Value {
    json!({ "state": "PENDING", "result": null, "events": null })
}

/// Scripted GetTransaction payload: finalized successfully, no events.
pub fn finalized_success() -> Value {
    json!({ "state": "FINALIZED", "result": "EXTRINSIC_SUCCESS", "events": { "edges": [] } })
}

/// Scripted GetTransaction payload: finalized successfully with the
/// collection id the platform assigned.
pub fn finalized_with_collection(collection_id: &str) -> Value {
    json!({
        "state": "FINALIZED",
        "result": "EXTRINSIC_SUCCESS",
        "events": {
            "edges": [
                { "node": { "params": [ { "type": "collection_id", "value": collection_id } ] } }
            ]
        }
    })
}

/// Scripted GetTransaction payload: terminal failure.
pub fn failed() -> Value {
    json!({ "state": "FAILED", "result": "EXTRINSIC_FAILED", "events": null })
}

/// Programmable state behind the mock platform.
#[derive(Default)]
pub struct PlatformState {
    /// Token ids that exist under the collection.
    tokens: Mutex<HashSet<u64>>,
    /// Scripted GetTransaction responses keyed by request id; an exhausted
    /// or missing script finalizes successfully.
    transactions: Mutex<HashMap<u64, VecDeque<Value>>>,
    /// Script installed for the next CreateCollection submission.
    collection_script: Mutex<Option<VecDeque<Value>>>,
    /// Token ids whose creation should finalize failed.
    failing_tokens: Mutex<HashSet<u64>>,
    /// Wallets with a visible address.
    wallets: Mutex<HashMap<String, String>>,
    /// Wallets that become visible after N more GetWallet calls.
    wallet_delays: Mutex<HashMap<String, (u32, String)>>,
    /// When set, GetToken answers 500 instead of resolving.
    fail_token_lookups: AtomicBool,
    /// When set, token mutations answer 500.
    fail_mutations: AtomicBool,

    next_request_id: AtomicU64,
    pub create_collection_calls: AtomicU32,
    pub create_token_calls: AtomicU32,
    pub get_token_calls: AtomicU32,
    pub get_wallet_calls: AtomicU32,
    pub create_wallet_calls: AtomicU32,
    pub mint_calls: AtomicU32,
    pub burn_calls: AtomicU32,
    pub transfer_calls: AtomicU32,
}

impl PlatformState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_request_id: AtomicU64::new(100),
            ..Self::default()
        })
    }

    /// Mark a token as already existing under the collection.
    pub fn add_token(&self, token_id: u64) {
        self.tokens.lock().unwrap().insert(token_id);
    }

    /// Script the GetTransaction observations for the next collection
    /// creation.
    pub fn script_collection_creation(&self, steps: Vec<Value>) {
        *self.collection_script.lock().unwrap() = Some(steps.into());
    }

    /// Make the creation of `token_id` finalize failed.
    pub fn fail_token_creation(&self, token_id: u64) {
        self.failing_tokens.lock().unwrap().insert(token_id);
    }

    /// Make every GetToken lookup answer 500.
    pub fn fail_token_lookups(&self) {
        self.fail_token_lookups.store(true, Ordering::SeqCst);
    }

    /// Make every token mutation answer 500.
    pub fn fail_mutations(&self) {
        self.fail_mutations.store(true, Ordering::SeqCst);
    }

    /// Register a wallet that is immediately visible.
    pub fn add_wallet(&self, external_id: &str, address: &str) {
        self.wallets
            .lock()
            .unwrap()
            .insert(external_id.to_string(), address.to_string());
    }

    /// Register a wallet that reports no address for the first `misses`
    /// GetWallet calls and the given address afterwards.
    pub fn wallet_visible_after(&self, external_id: &str, misses: u32, address: &str) {
        self.wallet_delays
            .lock()
            .unwrap()
            .insert(external_id.to_string(), (misses, address.to_string()));
    }

    fn assign_request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::SeqCst)
    }

    fn install_script(&self, request_id: u64, steps: VecDeque<Value>) {
        self.transactions.lock().unwrap().insert(request_id, steps);
    }
}

/// Start the mock platform on an ephemeral port; returns its address.
pub async fn start_mock_platform(state: Arc<PlatformState>) -> SocketAddr {
    let app = Router::new().route("/", post(handle)).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

pub fn platform_url(addr: SocketAddr) -> url::Url {
    format!("http://{addr}/").parse().unwrap()
}

fn ok(field: &str, payload: Value) -> Response {
    let mut data = serde_json::Map::new();
    data.insert(field.to_string(), payload);
    Json(json!({ "data": data })).into_response()
}

fn submission(state: &PlatformState, field: &str) -> Response {
    let request_id = state.assign_request_id();
    ok(
        field,
        json!({ "id": request_id, "method": field, "state": "PENDING" }),
    )
}

async fn handle(State(state): State<Arc<PlatformState>>, Json(body): Json<Value>) -> Response {
    let query = body["query"].as_str().unwrap_or_default();
    let variables = &body["variables"];

    if query.contains("CreateCollection") {
        state.create_collection_calls.fetch_add(1, Ordering::SeqCst);
        let request_id = state.assign_request_id();
        let script = state
            .collection_script
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| VecDeque::from(vec![finalized_with_collection("42")]));
        state.install_script(request_id, script);
        return ok(
            "CreateCollection",
            json!({ "id": request_id, "method": "CreateCollection", "state": "PENDING" }),
        );
    }

    if query.contains("CreateToken") {
        state.create_token_calls.fetch_add(1, Ordering::SeqCst);
        let token_id = variables["tokenId"].as_u64().unwrap_or_default();
        let request_id = state.assign_request_id();
        if state.failing_tokens.lock().unwrap().contains(&token_id) {
            state.install_script(request_id, VecDeque::from(vec![failed()]));
        }
        return ok(
            "CreateToken",
            json!({ "id": request_id, "method": "CreateToken", "state": "PENDING" }),
        );
    }

    if query.contains("GetToken") {
        state.get_token_calls.fetch_add(1, Ordering::SeqCst);
        if state.fail_token_lookups.load(Ordering::SeqCst) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "lookup backend down").into_response();
        }
        let token_id = variables["tokenId"].as_u64().unwrap_or_default();
        if state.tokens.lock().unwrap().contains(&token_id) {
            return ok("GetToken", json!({ "metadata": {} }));
        }
        return (StatusCode::BAD_REQUEST, "token not found").into_response();
    }

    if query.contains("GetTransaction") {
        let request_id = variables["id"].as_u64().unwrap_or_default();
        let step = state
            .transactions
            .lock()
            .unwrap()
            .get_mut(&request_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(finalized_success);
        return ok("GetTransaction", step);
    }

    if query.contains("GetWallet") {
        state.get_wallet_calls.fetch_add(1, Ordering::SeqCst);
        let external_id = variables["externalId"].as_str().unwrap_or_default();

        if let Some(address) = state.wallets.lock().unwrap().get(external_id) {
            return ok(
                "GetWallet",
                json!({ "account": { "publicKey": "0xpub", "address": address } }),
            );
        }

        let mut delays = state.wallet_delays.lock().unwrap();
        if let Some((remaining, address)) = delays.get_mut(external_id) {
            if *remaining == 0 {
                let address = address.clone();
                delays.remove(external_id);
                state
                    .wallets
                    .lock()
                    .unwrap()
                    .insert(external_id.to_string(), address.clone());
                return ok(
                    "GetWallet",
                    json!({ "account": { "publicKey": "0xpub", "address": address } }),
                );
            }
            *remaining -= 1;
        }

        return ok("GetWallet", Value::Null);
    }

    if query.contains("CreateWallet") {
        state.create_wallet_calls.fetch_add(1, Ordering::SeqCst);
        return ok("CreateWallet", Value::Bool(true));
    }

    if state.fail_mutations.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "mutation backend down").into_response();
    }

    if query.contains("MintToken") {
        state.mint_calls.fetch_add(1, Ordering::SeqCst);
        return submission(&state, "MintToken");
    }

    if query.contains("BurnToken") {
        state.burn_calls.fetch_add(1, Ordering::SeqCst);
        return submission(&state, "Burn");
    }

    if query.contains("SimpleTransferToken") {
        state.transfer_calls.fetch_add(1, Ordering::SeqCst);
        return submission(&state, "SimpleTransferToken");
    }

    (StatusCode::BAD_REQUEST, "unrecognized operation").into_response()
}
