use crate::ipc::error::{bad_params, err, ok};
use crate::ipc::helpers::{required_str, session_mut, session_ref, to_json};
use crate::ipc::types::{AppState, Request};
use crate::loader;
use crate::store::SnapshotDelivery;
use serde_json::json;
use std::path::PathBuf;
use tracing::warn;

/// Applies a delivery to the open session. A failed read never reaches here,
/// so the previous snapshot stays in place on error.
fn apply(state: &mut AppState, req: &Request, delivery: SnapshotDelivery) -> serde_json::Value {
    let session = match session_mut(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let report = session.load(delivery);
    ok(
        &req.id,
        json!({
            "counts": report.counts,
            "duplicates": report.duplicates,
            "digest": report.digest,
            "revision": session.revision(),
            "view": to_json(&session.view()),
        }),
    )
}

fn load_failed(req: &Request, e: anyhow::Error) -> serde_json::Value {
    warn!(method = %req.method, error = %format!("{e:#}"), "snapshot load rejected");
    err(&req.id, "load_failed", format!("{e:#}"), None)
}

fn handle_snapshot_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = session_ref(state, req) {
        return e;
    }
    let delivery = match loader::from_params(&req.params) {
        Ok(d) => d,
        Err(e) => return bad_params(&req.id, format!("{e:#}")),
    };
    if delivery.is_empty() {
        return bad_params(&req.id, "expected at least one of students, classes, scores");
    }
    apply(state, req, delivery)
}

fn handle_snapshot_open_file(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = session_ref(state, req) {
        return e;
    }
    let path = match required_str(req, "path") {
        Ok(p) => PathBuf::from(p),
        Err(e) => return e,
    };
    match loader::read_json_file(&path) {
        Ok(d) => apply(state, req, d),
        Err(e) => load_failed(req, e),
    }
}

fn handle_snapshot_open_sqlite(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = session_ref(state, req) {
        return e;
    }
    let path = match required_str(req, "path") {
        Ok(p) => PathBuf::from(p),
        Err(e) => return e,
    };
    match loader::read_sqlite(&path) {
        Ok(d) => apply(state, req, d),
        Err(e) => load_failed(req, e),
    }
}

fn handle_snapshot_info(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let store = session.store();
    ok(
        &req.id,
        json!({
            "counts": store.counts(),
            "digest": store.digest(),
            "revision": session.revision(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "snapshot.load" => Some(handle_snapshot_load(state, req)),
        "snapshot.openFile" => Some(handle_snapshot_open_file(state, req)),
        "snapshot.openSqlite" => Some(handle_snapshot_open_sqlite(state, req)),
        "snapshot.info" => Some(handle_snapshot_info(state, req)),
        _ => None,
    }
}
