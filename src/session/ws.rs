//! WebSocket server + REST endpoints for the call session.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::manager::SessionManager;
use super::model::{WizardAction, WsMessage};
use crate::error::WizardError;
use crate::script::catalog::{PHASES, STEPS};
use crate::script::objections::{OBJECTIONS, ObjectionId};
use crate::wizard::branch::SelectorId;
use crate::wizard::checklist::ChecklistKey;
use crate::wizard::copy::CopyFeedback;

/// Shared state for session routes.
#[derive(Clone)]
pub struct SessionRouteState {
    pub manager: Arc<SessionManager>,
}

/// Build the Axum router with the session WebSocket and REST routes.
pub fn session_routes(manager: Arc<SessionManager>) -> Router {
    let state = SessionRouteState { manager };

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/api/catalog", get(catalog))
        .route("/api/session", get(get_session))
        .route("/api/session/advance", post(advance))
        .route("/api/session/retreat", post(retreat))
        .route("/api/session/reset", post(reset))
        .route("/api/session/select", post(select))
        .route("/api/session/checklist/{key}/toggle", post(toggle))
        .route("/api/session/objection/{id}", post(open_objection))
        .route("/api/session/objection", delete(close_objection))
        .route("/api/session/copy/{index}", post(copy_card))
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "call-script"
    }))
}

// ── WebSocket ───────────────────────────────────────────────────────────

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SessionRouteState>) -> impl IntoResponse {
    info!("WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, state.manager))
}

async fn send_json(socket: &mut WebSocket, msg: &WsMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            warn!(error = %e, "Failed to serialize WS message");
            true
        }
    }
}

/// Show this connection's copy marker on outgoing snapshots.
fn mark_for_client(mut msg: WsMessage, copy: &CopyFeedback) -> WsMessage {
    if let WsMessage::SessionSync { snapshot } | WsMessage::SessionUpdate { snapshot } = &mut msg {
        snapshot.set_copy_feedback(copy, Utc::now());
    }
    msg
}

async fn handle_socket(mut socket: WebSocket, manager: Arc<SessionManager>) {
    info!("WebSocket client connected");
    let mut copy = manager.copy_feedback();

    // Subscribe before the initial sync so no update slips between them.
    let mut rx = manager.subscribe();

    let sync = WsMessage::SessionSync {
        snapshot: Box::new(manager.snapshot().await),
    };
    if !send_json(&mut socket, &sync).await {
        warn!("Failed to send initial sync, client disconnected");
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(msg) => {
                        let msg = mark_for_client(msg, &copy);
                        if !send_json(&mut socket, &msg).await {
                            debug!("Client disconnected during send");
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind broadcast");
                        // Only the latest state matters, so resync.
                        let sync = WsMessage::SessionSync {
                            snapshot: Box::new(manager.snapshot().await),
                        };
                        let sync = mark_for_client(sync, &copy);
                        if !send_json(&mut socket, &sync).await {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }

            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_client_message(&text, &manager, &mut copy).await {
                            if !send_json(&mut socket, &reply).await {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("WebSocket connection closed");
}

/// Apply a client action. Returns a message for this client only, if any;
/// state changes reach it through the broadcast.
async fn handle_client_message(
    text: &str,
    manager: &SessionManager,
    copy: &mut CopyFeedback,
) -> Option<WsMessage> {
    let action = match serde_json::from_str::<WizardAction>(text) {
        Ok(action) => action,
        Err(e) => {
            debug!(error = %e, text = text, "Unrecognized WS message from client");
            return Some(WsMessage::ActionRejected {
                error: format!("Unrecognized action: {e}"),
                conflict: false,
            });
        }
    };

    match manager.apply_logged(action).await {
        Ok(mut applied) => {
            let text = applied.clipboard.take()?;
            let copied = applied.record_copy(copy, Utc::now());
            Some(WsMessage::Clipboard { text, copied })
        }
        Err(e) => Some(WsMessage::ActionRejected {
            error: e.to_string(),
            conflict: e.is_conflict(),
        }),
    }
}

// ── REST Endpoints ──────────────────────────────────────────────────────

fn error_response(e: WizardError) -> Response {
    let status = if e.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(serde_json::json!({"error": e.to_string()}))).into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": message}))).into_response()
}

/// Parse a JSON request body, answering 400 in the usual error shape.
fn parse_body<T: DeserializeOwned>(body: &Bytes, what: &str) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| bad_request(format!("Invalid {what} body: {e}")))
}

/// Each REST call is its own client, so a copy marker lives only in that response.
async fn run(manager: &SessionManager, action: WizardAction) -> Response {
    match manager.apply_logged(action).await {
        Ok(mut applied) => {
            let mut copy = manager.copy_feedback();
            applied.record_copy(&mut copy, Utc::now());
            Json(applied).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/catalog
///
/// Static call structure: steps, phases, and objections.
async fn catalog() -> impl IntoResponse {
    Json(serde_json::json!({
        "steps": STEPS,
        "phases": PHASES,
        "objections": OBJECTIONS,
    }))
}

async fn get_session(State(state): State<SessionRouteState>) -> impl IntoResponse {
    Json(state.manager.snapshot().await)
}

async fn advance(State(state): State<SessionRouteState>) -> Response {
    run(&state.manager, WizardAction::Advance).await
}

async fn retreat(State(state): State<SessionRouteState>) -> Response {
    run(&state.manager, WizardAction::Retreat).await
}

#[derive(Debug, Default, Deserialize)]
struct ResetBody {
    #[serde(default)]
    confirmed: bool,
}

/// POST /api/session/reset
///
/// An empty body counts as unconfirmed.
async fn reset(State(state): State<SessionRouteState>, body: Bytes) -> Response {
    let body: ResetBody = if body.is_empty() {
        ResetBody::default()
    } else {
        match parse_body(&body, "reset") {
            Ok(b) => b,
            Err(response) => return response,
        }
    };
    run(&state.manager, WizardAction::Reset { confirmed: body.confirmed }).await
}

/// Raw strings so bad values map to wizard errors rather than a bare 422.
#[derive(Debug, Deserialize)]
struct SelectBody {
    selector: String,
    value: String,
}

/// POST /api/session/select
async fn select(State(state): State<SessionRouteState>, body: Bytes) -> Response {
    let body: SelectBody = match parse_body(&body, "select") {
        Ok(b) => b,
        Err(response) => return response,
    };
    let parsed = body
        .selector
        .parse::<SelectorId>()
        .and_then(|selector| Ok((selector, selector.parse_value(&body.value)?)));
    match parsed {
        Ok((selector, value)) => run(&state.manager, WizardAction::Select { selector, value }).await,
        Err(e) => error_response(e),
    }
}

async fn toggle(State(state): State<SessionRouteState>, Path(key): Path<String>) -> Response {
    match key.parse::<ChecklistKey>() {
        Ok(key) => run(&state.manager, WizardAction::Toggle { key }).await,
        Err(e) => error_response(e),
    }
}

async fn open_objection(State(state): State<SessionRouteState>, Path(id): Path<String>) -> Response {
    match id.parse::<ObjectionId>() {
        Ok(objection) => run(&state.manager, WizardAction::OpenObjection { objection }).await,
        Err(e) => error_response(e),
    }
}

async fn close_objection(State(state): State<SessionRouteState>) -> Response {
    run(&state.manager, WizardAction::CloseObjection).await
}

/// POST /api/session/copy/{index}
///
/// Returns the card's plain text; the snapshot carries the "copied" marker.
async fn copy_card(State(state): State<SessionRouteState>, Path(index): Path<String>) -> Response {
    match index.parse::<usize>() {
        Ok(index) => run(&state.manager, WizardAction::CopyCard { index }).await,
        Err(e) => bad_request(format!("Invalid card index {index:?}: {e}")),
    }
}
