use crate::ipc::error::ok;
use crate::ipc::helpers::{required_id, session_ref};
use crate::ipc::types::{AppState, Request};
use crate::query;
use serde_json::json;

fn handle_students_sorted(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let students = query::students_sorted_by_id(session.store());
    ok(&req.id, json!({ "students": students }))
}

fn handle_student_scores(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let student_id = match required_id(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let scores = query::scores_for_student(session.store(), &student_id);
    ok(&req.id, json!({ "scores": scores }))
}

fn handle_class_scores(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let class_id = match required_id(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let scores = query::scores_for_class(session.store(), &class_id);
    ok(&req.id, json!({ "scores": scores }))
}

fn handle_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let student_id = match required_id(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let student = query::student_by_id(session.store(), &student_id);
    ok(&req.id, json!({ "student": student }))
}

fn handle_class(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_ref(state, req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let class_id = match required_id(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let class = query::class_by_id(session.store(), &class_id);
    ok(&req.id, json!({ "class": class }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "query.studentsSorted" => Some(handle_students_sorted(state, req)),
        "query.studentScores" => Some(handle_student_scores(state, req)),
        "query.classScores" => Some(handle_class_scores(state, req)),
        "query.student" => Some(handle_student(state, req)),
        "query.class" => Some(handle_class(state, req)),
        _ => None,
    }
}
