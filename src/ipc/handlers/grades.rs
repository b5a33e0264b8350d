use crate::grade::{classify, grade_bars, grade_counts, score_summary};
use crate::ipc::error::{bad_params, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn parse_values(req: &Request) -> Result<Vec<i64>, serde_json::Value> {
    let Some(arr) = req.params.get("values").and_then(|v| v.as_array()) else {
        return Err(bad_params(&req.id, "missing values"));
    };
    arr.iter()
        .map(|v| {
            v.as_i64()
                .ok_or_else(|| bad_params(&req.id, "values must be integers"))
        })
        .collect()
}

fn handle_grades_classify(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(value) = req.params.get("value").and_then(|v| v.as_i64()) else {
        return bad_params(&req.id, "value must be an integer");
    };
    ok(&req.id, json!({ "value": value, "grade": classify(value) }))
}

fn handle_grades_counts(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let values = match parse_values(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let counts = grade_counts(values.iter().copied());
    ok(
        &req.id,
        json!({
            "gradeCounts": counts,
            "total": counts.total(),
            "bars": grade_bars(&counts),
            "summary": score_summary(values),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.classify" => Some(handle_grades_classify(state, req)),
        "grades.counts" => Some(handle_grades_counts(state, req)),
        _ => None,
    }
}
