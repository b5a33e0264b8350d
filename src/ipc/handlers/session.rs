use crate::ipc::error::{bad_params, ok};
use crate::ipc::helpers::to_json;
use crate::ipc::types::{AppState, Request};
use crate::nav::NavConfig;
use crate::session::Session;
use serde_json::json;
use tracing::info;

fn handle_session_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let config: NavConfig = if req.params.is_null() {
        NavConfig::default()
    } else {
        match serde_json::from_value(req.params.clone()) {
            Ok(c) => c,
            Err(e) => return bad_params(&req.id, format!("invalid session config: {e}")),
        }
    };

    if let Some(prev) = state.session.take() {
        info!(session = %prev.id(), "session replaced");
    }
    let session = Session::new(config);
    let result = json!({
        "sessionId": session.id(),
        "layout": config.layout,
        "rosterDrill": config.roster_drill_enabled(),
        "view": to_json(&session.view()),
    });
    state.session = Some(session);
    ok(&req.id, result)
}

fn handle_session_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    let closed = match state.session.take() {
        Some(s) => {
            info!(session = %s.id(), "session closed");
            true
        }
        None => false,
    };
    ok(&req.id, json!({ "closed": closed }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.open" => Some(handle_session_open(state, req)),
        "session.close" => Some(handle_session_close(state, req)),
        _ => None,
    }
}
