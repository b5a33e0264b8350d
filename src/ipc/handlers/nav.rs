use crate::ipc::error::{bad_params, ok};
use crate::ipc::helpers::{session_mut, session_ref, to_json};
use crate::ipc::types::{AppState, Request};
use crate::nav::{Intent, Outcome};
use crate::session::Session;
use serde_json::json;

fn transition_result(session: &Session, outcome: Outcome) -> serde_json::Value {
    json!({
        "handled": outcome.handled(),
        "view": to_json(&session.view()),
    })
}

fn handle_nav_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_mut(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let intent: Intent = match serde_json::from_value(req.params.clone()) {
        Ok(i) => i,
        Err(e) => return bad_params(&req.id, format!("invalid intent: {e}")),
    };
    let outcome = session.open(&intent);
    ok(&req.id, transition_result(session, outcome))
}

fn handle_nav_back(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_mut(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let outcome = session.back();
    ok(&req.id, transition_result(session, outcome))
}

fn handle_nav_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_mut(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let outcome = session.reset();
    ok(&req.id, transition_result(session, outcome))
}

fn handle_nav_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let nav = session.nav();
    ok(
        &req.id,
        json!({
            "view": nav.view(),
            "layout": nav.config().layout,
            "context": nav.context(),
            "canGoBack": nav.can_go_back(),
            "depth": nav.depth(),
            "revision": session.revision(),
        }),
    )
}

fn handle_view_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    ok(&req.id, to_json(&session.view()))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "nav.open" => Some(handle_nav_open(state, req)),
        "nav.back" => Some(handle_nav_back(state, req)),
        "nav.reset" => Some(handle_nav_reset(state, req)),
        "nav.state" => Some(handle_nav_state(state, req)),
        "view.current" => Some(handle_view_current(state, req)),
        _ => None,
    }
}
